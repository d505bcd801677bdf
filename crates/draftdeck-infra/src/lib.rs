//! # DraftDeck Infrastructure
//!
//! Concrete implementations of the ports defined in `draftdeck-core`:
//! the HTTP content service client, key/value stores and markdown export.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Storage and export only, no HTTP client
//! - `http` - reqwest-based client for the content service

pub mod cache;
pub mod convert;
pub mod export;

#[cfg(feature = "http")]
pub mod http;

pub use cache::{FileCache, InMemoryCache};
pub use export::{ExportError, write_markdown};

#[cfg(feature = "http")]
pub use http::{HttpApiConfig, HttpBlogApi};
