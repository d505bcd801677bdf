//! # DraftDeck Shared
//!
//! Wire types exchanged with the content service.
//! These mirror the backend's JSON exactly; conversion into domain types
//! happens in `draftdeck-infra`.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, LinkPreviewEnvelope};
