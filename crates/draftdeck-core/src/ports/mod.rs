//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod blog_api;
mod cache;
mod clock;

pub use blog_api::{BlogApi, LinkPreviewApi, PostPatch, PostUpdate, SourceApi};
pub use cache::{Cache, CacheError};
pub use clock::{Clock, SystemClock};
