use chrono::{DateTime, Utc};
use tracing::warn;

use crate::errors::WstgkitError;
use crate::models::project::Project;

use super::Database;

fn map_project_meta(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    let created_str: String = row.get(3)?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        created_at: DateTime::parse_from_rfc3339(&created_str)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        test_cases: Vec::new(),
    })
}

impl Database {
    pub fn create_project(&self, name: &str, description: &str) -> Result<Project, WstgkitError> {
        let project = Project::new(name, description);
        self.insert_project(&project)?;
        Ok(project)
    }

    pub fn insert_project(&self, project: &Project) -> Result<(), WstgkitError> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO projects (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    project.id,
                    project.name,
                    project.description,
                    project.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| WstgkitError::Database(format!("Failed to insert project: {}", e)))?;
        }
        for case in &project.test_cases {
            self.insert_case(case)?;
        }
        Ok(())
    }

    pub fn get_project(&self, id: &str) -> Result<Option<Project>, WstgkitError> {
        let meta = {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn
                .prepare("SELECT id, name, description, created_at FROM projects WHERE id = ?1")
                .map_err(|e| WstgkitError::Database(format!("Query failed: {}", e)))?;
            match stmt.query_row(rusqlite::params![id], map_project_meta) {
                Ok(p) => p,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(WstgkitError::Database(format!("Query error: {}", e))),
            }
        };

        let mut project = meta;
        project.test_cases = self.get_cases(&project.id)?;
        Ok(Some(project))
    }

    /// Full project list, newest-first, cases included.
    pub fn get_projects(&self) -> Result<Vec<Project>, WstgkitError> {
        let metas = {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, description, created_at FROM projects \
                     ORDER BY created_at DESC",
                )
                .map_err(|e| WstgkitError::Database(format!("Query failed: {}", e)))?;
            let rows = stmt
                .query_map([], map_project_meta)
                .map_err(|e| WstgkitError::Database(format!("Query error: {}", e)))?;

            let mut metas = Vec::new();
            for row in rows {
                metas.push(row.map_err(|e| WstgkitError::Database(format!("Row error: {}", e)))?);
            }
            metas
        };

        let mut projects = Vec::with_capacity(metas.len());
        for mut meta in metas {
            meta.test_cases = self.get_cases(&meta.id)?;
            projects.push(meta);
        }
        Ok(projects)
    }

    pub fn update_project(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<bool, WstgkitError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "UPDATE projects SET name = ?2, description = ?3 WHERE id = ?1",
                rusqlite::params![id, name, description],
            )
            .map_err(|e| WstgkitError::Database(format!("Failed to update project: {}", e)))?;
        Ok(affected > 0)
    }

    pub fn delete_project(&self, id: &str) -> Result<bool, WstgkitError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute("DELETE FROM projects WHERE id = ?1", rusqlite::params![id])
            .map_err(|e| WstgkitError::Database(format!("Failed to delete project: {}", e)))?;
        Ok(affected > 0)
    }

    pub fn duplicate_project(&self, id: &str) -> Result<Option<Project>, WstgkitError> {
        let Some(project) = self.get_project(id)? else {
            return Ok(None);
        };
        let copy = project.duplicate();
        self.insert_project(&copy)?;
        Ok(Some(copy))
    }

    /// Import externally supplied project data. Entries are validated
    /// minimally (string id, non-empty name, list-typed `testCases`);
    /// invalid or already-present entries are skipped silently. Returns the
    /// number of projects added.
    pub fn import_projects(&self, entries: &[serde_json::Value]) -> Result<usize, WstgkitError> {
        let mut imported = 0;
        for entry in entries {
            let valid = entry.get("id").and_then(|v| v.as_str()).is_some_and(|s| !s.is_empty())
                && entry.get("name").and_then(|v| v.as_str()).is_some_and(|s| !s.is_empty())
                && entry.get("testCases").map(|v| v.is_array()).unwrap_or(false);
            if !valid {
                warn!("Skipping invalid project entry during import");
                continue;
            }

            let project: Project = match serde_json::from_value(entry.clone()) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "Skipping unparseable project entry during import");
                    continue;
                }
            };

            if self.get_project(&project.id)?.is_some() {
                continue;
            }

            self.insert_project(&project)?;
            imported += 1;
        }
        Ok(imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_and_get_project() {
        let db = Database::in_memory().unwrap();
        let project = db.create_project("E-Banking App", "internet banking scope").unwrap();

        let loaded = db.get_project(&project.id).unwrap().unwrap();
        assert_eq!(loaded.name, "E-Banking App");
        assert_eq!(loaded.description, "internet banking scope");
        assert!(loaded.test_cases.is_empty());
    }

    #[test]
    fn test_delete_project_cascades_to_cases() {
        let db = Database::in_memory().unwrap();
        let project = db.create_project("Doomed", "").unwrap();
        let case = crate::models::TestCase::new(&project.id, "t", "WSTG-INFO-01", "");
        db.insert_case(&case).unwrap();

        assert!(db.delete_project(&project.id).unwrap());
        assert!(db.get_project(&project.id).unwrap().is_none());
        assert!(db.get_cases(&project.id).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_project_copies_cases_under_new_identity() {
        let db = Database::in_memory().unwrap();
        let project = db.create_project("HRM", "").unwrap();
        let case = crate::models::TestCase::new(&project.id, "Test search", "WSTG-INPV-01", "x");
        db.insert_case(&case).unwrap();

        let copy = db.duplicate_project(&project.id).unwrap().unwrap();
        assert_eq!(copy.name, "HRM (Copy)");

        let loaded = db.get_project(&copy.id).unwrap().unwrap();
        assert_eq!(loaded.test_cases.len(), 1);
        assert_eq!(loaded.test_cases[0].project_id, copy.id);
        assert_ne!(loaded.test_cases[0].id, case.id);
    }

    #[test]
    fn test_import_skips_malformed_entries() {
        let db = Database::in_memory().unwrap();

        let entries = vec![
            json!({
                "id": "p-1",
                "name": "Valid Project",
                "description": "",
                "createdAt": 1700000000000_i64,
                "testCases": [],
            }),
            // Missing name: must be skipped, not imported and not an error.
            json!({
                "id": "p-2",
                "createdAt": 1700000000000_i64,
                "testCases": [],
            }),
        ];

        let imported = db.import_projects(&entries).unwrap();
        assert_eq!(imported, 1);
        assert!(db.get_project("p-1").unwrap().is_some());
        assert!(db.get_project("p-2").unwrap().is_none());
    }

    #[test]
    fn test_import_skips_existing_ids() {
        let db = Database::in_memory().unwrap();
        let project = db.create_project("Existing", "").unwrap();

        let entries = vec![json!({
            "id": project.id,
            "name": "Existing (again)",
            "createdAt": 1700000000000_i64,
            "testCases": [],
        })];

        assert_eq!(db.import_projects(&entries).unwrap(), 0);
        assert_eq!(db.get_project(&project.id).unwrap().unwrap().name, "Existing");
    }
}
