use serde::{Deserialize, Serialize};

use super::finding::Severity;

/// An example payload attached to a reference test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub code: String,
    pub description: String,
}

/// An immutable catalogue entry describing a standard security test
/// procedure. Loaded once at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTest {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub payloads: Vec<PayloadItem>,
    #[serde(default)]
    pub strategy: String,
    /// Default / typical severity for this test.
    pub severity: Severity,
}

/// A WSTG area grouping an ordered list of reference tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub tests: Vec<ReferenceTest>,
}
