//! Response envelopes used by the content service.

use serde::{Deserialize, Serialize};

use crate::dto::LinkPreviewData;

/// Wrapper around `GET /api/link-preview` results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkPreviewEnvelope {
    #[serde(default)]
    pub data: LinkPreviewData,
}

/// Error body returned by the backend (FastAPI style).
///
/// `detail` is either a plain string or a list of validation objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the body carried one.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}
