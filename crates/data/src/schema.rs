use serde::{Deserialize, Serialize};
use yahtzee_core::MatchResult;

pub const RESULTS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResult {
    pub id: u64,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// On-disk layout of the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultFile {
    pub version: u32,
    pub next_id: u64,
    #[serde(default)]
    pub results: Vec<StoredResult>,
}

impl Default for ResultFile {
    fn default() -> Self {
        Self {
            version: RESULTS_SCHEMA_VERSION,
            next_id: 1,
            results: Vec::new(),
        }
    }
}
