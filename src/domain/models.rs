use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::FlowError;

/// A short link as the server reports it. Never modified client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLinkRecord {
    pub code: String,
    pub long_url: String,
    pub hit_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Counters and list pulled in one `GET /admin/stats` call.
///
/// A snapshot is always applied as a whole; nothing is merged into the
/// previously displayed one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_links: u64,
    pub total_hits: u64,
    #[serde(default)]
    pub links: Vec<ShortLinkRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRequest {
    pub long_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
}

impl CreateRequest {
    /// Builds a request from raw form values. An empty custom code means
    /// "let the server pick one".
    pub fn from_form(long_url: &str, custom_code: &str) -> Result<Self, FlowError> {
        if long_url.is_empty() {
            return Err(FlowError::Validation);
        }
        Ok(Self {
            long_url: long_url.to_string(),
            custom_code: (!custom_code.is_empty()).then(|| custom_code.to_string()),
        })
    }
}

/// Body of a successful `POST /api/shorten`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLink {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
}
