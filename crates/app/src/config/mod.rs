use serde::{Deserialize, Serialize};

/// Entries fetched for a history request when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
/// Entries shown in a chat history reply.
pub const HISTORY_DISPLAY_LIMIT: usize = 5;
const MAX_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

impl HistoryParams {
    pub fn resolved_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT)
    }
}
