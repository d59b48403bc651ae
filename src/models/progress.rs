use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::PayloadItem;
use super::finding::CaseStatus;

/// Per-reference-test progress kept by the guide view: a status plus the
/// payloads the user collected while working through the test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub status: CaseStatus,
    #[serde(default)]
    pub user_payloads: Vec<PayloadItem>,
}

impl Default for ProgressEntry {
    fn default() -> Self {
        Self { status: CaseStatus::NotStarted, user_payloads: Vec::new() }
    }
}

/// Reference-test id -> progress entry.
pub type ProgressMap = HashMap<String, ProgressEntry>;
