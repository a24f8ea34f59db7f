use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize, Default)]
pub struct HistoryRequest {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SetLevelRequest {
    pub amount: Option<i64>,
}

/// Who is asking. Privileged commands check this before touching the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub is_admin: bool,
}

impl Caller {
    pub fn admin() -> Self {
        Self { is_admin: true }
    }

    pub fn member() -> Self {
        Self { is_admin: false }
    }
}
