use serde::{Deserialize, Serialize};

/// Upper bound for `?limit=` on the history endpoint.
pub const MAX_HISTORY_LIMIT: u32 = 500;

/// Multipart field carrying the uploaded picture.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryOptions {
    pub limit: Option<u32>,
}

impl HistoryOptions {
    pub fn effective_limit(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default).min(MAX_HISTORY_LIMIT)
    }
}
