use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finding::TestCase;

/// A user-defined grouping of test cases. New cases are inserted
/// newest-first by convention; consumers must not rely on the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Project {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            test_cases: Vec::new(),
        }
    }

    /// Clone the project and every case under a fresh identity. The copy is
    /// named "<name> (Copy)" and its cases are re-parented onto the new id.
    pub fn duplicate(&self) -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        let test_cases = self
            .test_cases
            .iter()
            .map(|tc| {
                let mut copy = tc.duplicate();
                copy.project_id = id.clone();
                copy
            })
            .collect();

        Self {
            id,
            name: format!("{} (Copy)", self.name),
            description: self.description.clone(),
            created_at: Utc::now(),
            test_cases,
        }
    }
}
