//! # DraftDeck Core
//!
//! Client-side domain layer of DraftDeck: the post store, the editor surface,
//! link previews and source import.
//! Network and storage access go through the traits in [`ports`].

pub mod domain;
pub mod editor;
pub mod error;
pub mod ports;
pub mod preview;
pub mod sources;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;
pub use store::{PostStore, StoreConfig};
