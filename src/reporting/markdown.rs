use crate::catalog::{is_recon_task, Catalog};
use crate::models::finding::TestCase;

use super::{filename_stem, ExportDocument, MIME_MARKDOWN, NOT_AVAILABLE};

/// Narrative report for a single finding, built from the committed
/// record. Recon tasks produce a short two-section summary; everything
/// else gets the full vulnerability write-up.
pub fn render_markdown(case: &TestCase, catalog: &Catalog) -> String {
    let reference_title = catalog
        .get(&case.wstg_id)
        .map(|test| test.title.as_str())
        .unwrap_or("Unknown");

    let mut doc = format!(
        "# {title}\n\n\
         **WSTG Reference:** {wstg} ({reference})\n\
         **Target:** {target}\n\
         **Status:** {status}\n",
        title = case.title,
        wstg = case.wstg_id,
        reference = reference_title,
        target = case.target.as_deref().unwrap_or(NOT_AVAILABLE),
        status = case.status,
    );

    if is_recon_task(&case.wstg_id) {
        doc.push_str("\n## Summary\n\n");
        doc.push_str(case.vuln_description.as_deref().unwrap_or(NOT_AVAILABLE));
        doc.push_str("\n\n## Collected Data\n\n```\n");
        doc.push_str(case.poc.as_deref().unwrap_or(NOT_AVAILABLE));
        doc.push_str("\n```\n");
        return doc;
    }

    doc.push_str(&format!(
        "**Severity:** {severity}\n\
         **CVSS Score:** {score}\n\
         **CVSS Vector:** `{vector}`\n",
        severity = case.severity,
        score = case
            .cvss_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        vector = case.cvss_vector.as_deref().unwrap_or(NOT_AVAILABLE),
    ));

    doc.push_str("\n## Description\n\n");
    doc.push_str(
        case.vuln_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(case.description.as_str()),
    );

    doc.push_str("\n\n## Impact\n\n");
    doc.push_str(case.impact.as_deref().unwrap_or(NOT_AVAILABLE));

    doc.push_str("\n\n## Proof of Concept\n\n```\n");
    doc.push_str(case.poc.as_deref().unwrap_or(NOT_AVAILABLE));
    doc.push_str("\n```\n");

    doc.push_str("\n## Recommendation\n\n");
    doc.push_str(case.recommendation.as_deref().unwrap_or(NOT_AVAILABLE));

    doc.push_str("\n\n## References\n\n");
    doc.push_str(case.references.as_deref().unwrap_or(NOT_AVAILABLE));
    doc.push('\n');

    doc
}

pub fn export_markdown(case: &TestCase, catalog: &Catalog) -> ExportDocument {
    ExportDocument {
        filename: format!("{}_report.md", filename_stem(&case.title)),
        mime_type: MIME_MARKDOWN,
        bytes: render_markdown(case, catalog).into_bytes(),
    }
}
