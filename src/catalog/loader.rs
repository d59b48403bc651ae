use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::errors::WstgkitError;
use crate::models::catalog::{Category, ReferenceTest};

/// The reference catalogue: WSTG categories loaded from YAML files, indexed
/// by reference-test id. Read-only after load.
pub struct Catalog {
    categories: Vec<Category>,
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Load every `*.yaml` category file under `dir`. A missing directory
    /// yields an empty catalogue; a malformed file is a startup error.
    pub fn load(dir: &Path) -> Result<Self, WstgkitError> {
        let mut categories = Vec::new();

        if !dir.exists() {
            warn!(dir = %dir.display(), "Catalog directory not found, starting empty");
            return Ok(Self::from_categories(categories));
        }

        let pattern = dir.join("*.yaml");
        let pattern_str = pattern.to_string_lossy();

        for entry in glob::glob(&pattern_str)
            .map_err(|e| WstgkitError::Catalog(format!("Invalid glob pattern: {}", e)))?
        {
            let path = entry.map_err(|e| WstgkitError::Catalog(format!("Glob error: {}", e)))?;
            let content = std::fs::read_to_string(&path)?;
            let category: Category = serde_yaml::from_str(&content)?;
            info!(category = %category.id, tests = category.tests.len(), "Loaded catalog category");
            categories.push(category);
        }

        categories.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(Self::from_categories(categories))
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut index = HashMap::new();
        for (ci, category) in categories.iter().enumerate() {
            for (ti, test) in category.tests.iter().enumerate() {
                index.insert(test.id.clone(), (ci, ti));
            }
        }
        Self { categories, index }
    }

    pub fn get(&self, wstg_id: &str) -> Option<&ReferenceTest> {
        self.index
            .get(wstg_id)
            .map(|&(ci, ti)| &self.categories[ci].tests[ti])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn total_tests(&self) -> usize {
        self.categories.iter().map(|c| c.tests.len()).sum()
    }
}
