use chrono::{DateTime, Utc};

use crate::cvss::MetricSelection;
use crate::errors::WstgkitError;
use crate::models::finding::{CaseStatus, ReportDraft, Severity, TestCase, TestCaseUpdate};

use super::Database;

pub(crate) const CASE_COLUMNS: &str = "id, project_id, title, wstg_id, description, status, \
     severity, notes, tags, target, vuln_description, impact, poc, recommendation, refs, \
     cvss_score, cvss_vector, created_at";

pub(crate) fn map_case_row(row: &rusqlite::Row) -> rusqlite::Result<TestCase> {
    let status_str: String = row.get(5)?;
    let severity_str: String = row.get(6)?;
    let tags_json: String = row.get::<_, Option<String>>(8)?.unwrap_or_default();
    let created_str: String = row.get(17)?;

    Ok(TestCase {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        wstg_id: row.get(3)?,
        description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        status: CaseStatus::from_str_or_default(&status_str),
        severity: Severity::from_str_or_info(&severity_str),
        notes: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        target: row.get(9)?,
        vuln_description: row.get(10)?,
        impact: row.get(11)?,
        poc: row.get(12)?,
        recommendation: row.get(13)?,
        references: row.get(14)?,
        cvss_score: row.get(15)?,
        cvss_vector: row.get(16)?,
        created_at: DateTime::parse_from_rfc3339(&created_str)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

impl Database {
    pub fn insert_case(&self, case: &TestCase) -> Result<(), WstgkitError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO cases (id, project_id, title, wstg_id, description, status, severity, \
             notes, tags, target, vuln_description, impact, poc, recommendation, refs, \
             cvss_score, cvss_vector, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            rusqlite::params![
                case.id,
                case.project_id,
                case.title,
                case.wstg_id,
                case.description,
                case.status.as_str(),
                case.severity.as_str(),
                case.notes,
                serde_json::to_string(&case.tags)?,
                case.target,
                case.vuln_description,
                case.impact,
                case.poc,
                case.recommendation,
                case.references,
                case.cvss_score,
                case.cvss_vector,
                case.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| WstgkitError::Database(format!("Failed to insert case: {}", e)))?;
        Ok(())
    }

    /// Cases for a project, newest-first (insertion-order convention, not a
    /// contract consumers may rely on).
    pub fn get_cases(&self, project_id: &str) -> Result<Vec<TestCase>, WstgkitError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM cases WHERE project_id = ?1 ORDER BY created_at DESC",
            CASE_COLUMNS
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| WstgkitError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![project_id], map_case_row)
            .map_err(|e| WstgkitError::Database(format!("Query error: {}", e)))?;

        let mut cases = Vec::new();
        for row in rows {
            cases.push(row.map_err(|e| WstgkitError::Database(format!("Row error: {}", e)))?);
        }
        Ok(cases)
    }

    pub fn get_case(
        &self,
        project_id: &str,
        case_id: &str,
    ) -> Result<Option<TestCase>, WstgkitError> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM cases WHERE project_id = ?1 AND id = ?2",
            CASE_COLUMNS
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| WstgkitError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![project_id, case_id], map_case_row) {
            Ok(case) => Ok(Some(case)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(WstgkitError::Database(format!("Query error: {}", e))),
        }
    }

    fn save_case(&self, case: &TestCase) -> Result<(), WstgkitError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE cases SET title = ?3, wstg_id = ?4, description = ?5, status = ?6, \
             severity = ?7, notes = ?8, tags = ?9, target = ?10, vuln_description = ?11, \
             impact = ?12, poc = ?13, recommendation = ?14, refs = ?15, cvss_score = ?16, \
             cvss_vector = ?17 WHERE project_id = ?1 AND id = ?2",
            rusqlite::params![
                case.project_id,
                case.id,
                case.title,
                case.wstg_id,
                case.description,
                case.status.as_str(),
                case.severity.as_str(),
                case.notes,
                serde_json::to_string(&case.tags)?,
                case.target,
                case.vuln_description,
                case.impact,
                case.poc,
                case.recommendation,
                case.references,
                case.cvss_score,
                case.cvss_vector,
            ],
        )
        .map_err(|e| WstgkitError::Database(format!("Failed to update case: {}", e)))?;
        Ok(())
    }

    /// Partial merge: unspecified fields keep their stored values.
    pub fn update_case(
        &self,
        project_id: &str,
        case_id: &str,
        update: TestCaseUpdate,
    ) -> Result<Option<TestCase>, WstgkitError> {
        let Some(mut case) = self.get_case(project_id, case_id)? else {
            return Ok(None);
        };
        case.apply_update(update);
        self.save_case(&case)?;
        Ok(Some(case))
    }

    /// The save-report flow: scores the draft (unless the case is a recon
    /// task), marks it COMPLETED and commits the merged record.
    pub fn complete_case(
        &self,
        project_id: &str,
        case_id: &str,
        metrics: &MetricSelection,
        draft: ReportDraft,
    ) -> Result<Option<TestCase>, WstgkitError> {
        let Some(mut case) = self.get_case(project_id, case_id)? else {
            return Ok(None);
        };
        case.apply_report(metrics, draft);
        self.save_case(&case)?;
        Ok(Some(case))
    }

    pub fn duplicate_case(
        &self,
        project_id: &str,
        case_id: &str,
    ) -> Result<Option<TestCase>, WstgkitError> {
        let Some(case) = self.get_case(project_id, case_id)? else {
            return Ok(None);
        };
        let copy = case.duplicate();
        self.insert_case(&copy)?;
        Ok(Some(copy))
    }

    pub fn delete_case(&self, project_id: &str, case_id: &str) -> Result<bool, WstgkitError> {
        let conn = self.conn.lock().unwrap();
        let affected = conn
            .execute(
                "DELETE FROM cases WHERE project_id = ?1 AND id = ?2",
                rusqlite::params![project_id, case_id],
            )
            .map_err(|e| WstgkitError::Database(format!("Failed to delete case: {}", e)))?;
        Ok(affected > 0)
    }
}
