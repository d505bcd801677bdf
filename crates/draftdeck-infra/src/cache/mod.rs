//! Key/value stores backing the link-preview cache.

mod file;
mod memory;

pub use file::FileCache;
pub use memory::InMemoryCache;
