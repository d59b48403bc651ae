use crate::catalog::is_recon_task;
use crate::models::finding::{CaseStatus, TestCase};
use crate::models::project::Project;

use super::stats::ProjectStats;
use super::{filename_stem, ExportDocument, MIME_HTML, NOT_AVAILABLE};

/// Full project report: severity summary followed by one block per
/// COMPLETED finding. Incomplete cases are silently excluded.
pub fn render_html(project: &Project) -> String {
    let stats = ProjectStats::compute(project);
    let completed: Vec<&TestCase> = project
        .test_cases
        .iter()
        .filter(|tc| tc.status == CaseStatus::Completed)
        .collect();

    let date = chrono::Utc::now().format("%Y-%m-%d");

    let mut findings = String::new();
    if completed.is_empty() {
        findings.push_str("        <p>No findings have been recorded yet.</p>\n");
    }
    for tc in &completed {
        findings.push_str(&render_finding(tc));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Pentest Report - {name}</title>
    <style>
        body {{ font-family: -apple-system, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 960px; margin: 0 auto; padding: 40px; background: #f9fafb; }}
        .container {{ background: #fff; padding: 40px; border-radius: 8px; }}
        h1 {{ color: #111; border-bottom: 2px solid #4f46e5; padding-bottom: 10px; }}
        h2 {{ color: #1f2937; margin-top: 30px; border-bottom: 1px solid #e5e7eb; padding-bottom: 5px; }}
        .meta {{ color: #6b7280; font-size: 0.9em; margin-bottom: 40px; }}
        .summary-box {{ display: flex; gap: 20px; margin-bottom: 40px; }}
        .card {{ flex: 1; padding: 20px; background: #f3f4f6; border-radius: 8px; text-align: center; }}
        .card strong {{ display: block; font-size: 2em; color: #4f46e5; }}
        .badge {{ padding: 4px 8px; border-radius: 4px; font-size: 0.8em; font-weight: bold; text-transform: uppercase; display: inline-block; }}
        .Critical {{ background: #fee2e2; color: #991b1b; }}
        .High {{ background: #ffedd5; color: #9a3412; }}
        .Medium {{ background: #fef3c7; color: #92400e; }}
        .Low {{ background: #dbeafe; color: #1e40af; }}
        .Info {{ background: #f3f4f6; color: #374151; }}
        .finding {{ border: 1px solid #e5e7eb; border-radius: 8px; padding: 20px; margin-bottom: 20px; }}
        .finding-header {{ display: flex; justify-content: space-between; margin-bottom: 15px; }}
        .wstg-ref {{ font-family: monospace; background: #eef2ff; color: #4f46e5; padding: 2px 6px; border-radius: 4px; margin-right: 10px; }}
        pre {{ background: #1f2937; color: #f9fafb; padding: 15px; border-radius: 6px; overflow-x: auto; font-size: 0.9em; }}
        .section-label {{ font-weight: bold; color: #4b5563; font-size: 0.85em; text-transform: uppercase; margin-top: 15px; display: block; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Penetration Test Report</h1>
        <div class="meta">
            <p><strong>Project:</strong> {name}</p>
            <p><strong>Date:</strong> {date}</p>
            <p><strong>Description:</strong> {description}</p>
        </div>

        <h2>Executive Summary</h2>
        <div class="summary-box">
            <div class="card"><strong>{critical}</strong><span>Critical</span></div>
            <div class="card"><strong>{high}</strong><span>High</span></div>
            <div class="card"><strong>{medium}</strong><span>Medium</span></div>
            <div class="card"><strong>{low}</strong><span>Low</span></div>
        </div>

        <h2>Findings</h2>
{findings}    </div>
</body>
</html>
"#,
        name = escape(&project.name),
        date = date,
        description = escape(&project.description),
        critical = stats.severity_counts.critical,
        high = stats.severity_counts.high,
        medium = stats.severity_counts.medium,
        low = stats.severity_counts.low,
        findings = findings,
    )
}

pub fn export_html(project: &Project) -> ExportDocument {
    ExportDocument {
        filename: format!("{}_Full_Report.html", filename_stem(&project.name)),
        mime_type: MIME_HTML,
        bytes: render_html(project).into_bytes(),
    }
}

fn render_finding(tc: &TestCase) -> String {
    let recon = is_recon_task(&tc.wstg_id);

    let badge = if !recon && tc.cvss_score.is_some() {
        format!("{} ({})", tc.severity, tc.cvss_score.unwrap_or(0.0))
    } else {
        tc.severity.to_string()
    };

    let summary_label = if recon { "Analysis / Summary" } else { "Description / Summary" };
    let summary = tc
        .vuln_description
        .as_deref()
        .map(|d| escape(d).replace('\n', "<br>"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut block = format!(
        r#"        <div class="finding">
            <div class="finding-header">
                <div><span class="wstg-ref">{wstg}</span>{target}<span class="finding-title">{title}</span></div>
                <span class="badge {severity}">{badge}</span>
            </div>
            <span class="section-label">{summary_label}:</span>
            <p>{summary}</p>
"#,
        wstg = escape(&tc.wstg_id),
        target = tc
            .target
            .as_deref()
            .map(|t| format!(r#"<span class="target-tag">{}</span> "#, escape(t)))
            .unwrap_or_default(),
        title = escape(&tc.title),
        severity = tc.severity,
        badge = badge,
        summary_label = summary_label,
        summary = summary,
    );

    // Impact, recommendation and the CVSS vector only make sense for
    // vulnerability findings; recon blocks omit them.
    if !recon {
        if let Some(impact) = tc.impact.as_deref() {
            block.push_str(&format!(
                "            <span class=\"section-label\">Impact:</span>\n            <p>{}</p>\n",
                escape(impact).replace('\n', "<br>")
            ));
        }
    }

    if let Some(poc) = tc.poc.as_deref() {
        let poc_label = if recon { "Collected Data" } else { "Proof of Concept" };
        block.push_str(&format!(
            "            <span class=\"section-label\">{}:</span>\n            <pre>{}</pre>\n",
            poc_label,
            escape(poc)
        ));
    }

    if !recon {
        if let Some(rec) = tc.recommendation.as_deref() {
            block.push_str(&format!(
                "            <span class=\"section-label\">Recommendation:</span>\n            <p>{}</p>\n",
                escape(rec).replace('\n', "<br>")
            ));
        }
        if let Some(vector) = tc.cvss_vector.as_deref() {
            block.push_str(&format!(
                "            <span class=\"section-label\">CVSS Vector:</span>\n            <p style=\"font-family:monospace;\">{}</p>\n",
                escape(vector)
            ));
        }
    }

    block.push_str("        </div>\n");
    block
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
