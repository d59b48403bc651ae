use crate::models::project::Project;

use super::{filename_stem, ExportDocument, MIME_CSV};

/// UTF-8 byte-order marker. Spreadsheet consumers need it to pick up
/// non-ASCII text correctly.
const BOM: &str = "\u{FEFF}";

const HEADERS: [&str; 15] = [
    "ID",
    "Title",
    "Target",
    "Tags",
    "WSTG Ref",
    "Status",
    "Severity",
    "CVSS Score",
    "CVSS Vector",
    "Vuln Description/Summary",
    "Impact",
    "PoC/Findings",
    "Recommendation",
    "References",
    "Notes",
];

/// One row per case, every case regardless of status. Text fields are
/// quoted with embedded quotes doubled; missing text renders as an empty
/// quoted string, missing scores as 0.
pub fn render_csv(project: &Project) -> String {
    let mut out = String::from(BOM);
    out.push_str(&HEADERS.join(","));

    for tc in &project.test_cases {
        let row = [
            tc.id.clone(),
            quote(&tc.title),
            quote(tc.target.as_deref().unwrap_or_default()),
            quote(&tc.tags.join(", ")),
            tc.wstg_id.clone(),
            tc.status.to_string(),
            tc.severity.to_string(),
            format!("{}", tc.cvss_score.unwrap_or(0.0)),
            quote(tc.cvss_vector.as_deref().unwrap_or_default()),
            quote(tc.vuln_description.as_deref().unwrap_or(&tc.description)),
            quote(tc.impact.as_deref().unwrap_or_default()),
            quote(tc.poc.as_deref().unwrap_or_default()),
            quote(tc.recommendation.as_deref().unwrap_or_default()),
            quote(tc.references.as_deref().unwrap_or_default()),
            quote(&tc.notes),
        ];
        out.push('\n');
        out.push_str(&row.join(","));
    }

    out
}

pub fn export_csv(project: &Project) -> ExportDocument {
    ExportDocument {
        filename: format!("{}_pentest_report.csv", filename_stem(&project.name)),
        mime_type: MIME_CSV,
        bytes: render_csv(project).into_bytes(),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cvss::MetricSelection;
    use crate::models::finding::{ReportDraft, TestCase};

    #[test]
    fn test_csv_starts_with_bom_and_headers() {
        let project = Project::new("My App", "");
        let csv = render_csv(&project);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv.contains("ID,Title,Target,Tags,WSTG Ref,Status,Severity,CVSS Score"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled_and_field_stays_quoted() {
        let mut project = Project::new("P", "");
        let mut case = TestCase::new(&project.id, "t", "WSTG-INPV-01", "");
        case.vuln_description = Some(r#"payload "><script> worked"#.into());
        project.test_cases.push(case);

        let csv = render_csv(&project);
        assert!(csv.contains(r#""payload ""><script> worked""#));
    }

    #[test]
    fn test_missing_fields_render_empty_quoted_and_zero_score() {
        let mut project = Project::new("P", "");
        project.test_cases.push(TestCase::new(&project.id, "open case", "WSTG-ATHN-01", ""));

        let csv = render_csv(&project);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",NOT_STARTED,Info,0,"));
        assert!(row.ends_with(r#""""#)); // empty quoted notes field
    }

    #[test]
    fn test_completed_case_exports_score_and_vector() {
        let mut project = Project::new("P", "");
        let mut case = TestCase::new(&project.id, "SQLi", "WSTG-INPV-05", "");
        let metrics =
            MetricSelection::parse("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        case.apply_report(&metrics, ReportDraft::default());
        project.test_cases.push(case);

        let csv = render_csv(&project);
        assert!(csv.contains(",COMPLETED,Critical,9.8,"));
        assert!(csv.contains(r#""CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H""#));
    }

    #[test]
    fn test_export_document_metadata() {
        let project = Project::new("E-Banking App", "");
        let doc = export_csv(&project);
        assert_eq!(doc.filename, "E-Banking_App_pentest_report.csv");
        assert_eq!(doc.mime_type, "text/csv");
    }
}
