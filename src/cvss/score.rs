use crate::models::finding::Severity;

use super::metrics::{MetricSelection, Scope};

/// CVSS v3.1 Base score for a metric selection. Temporal and Environmental
/// metric groups are out of scope. Infallible: the input domain is closed.
pub fn base_score(m: &MetricSelection) -> f64 {
    // ISS = 1 - (1-C)(1-I)(1-A)
    let iss = 1.0
        - (1.0 - m.c.weight()) * (1.0 - m.i.weight()) * (1.0 - m.a.weight());

    let impact = match m.s {
        Scope::Unchanged => 6.42 * iss,
        Scope::Changed => 7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powi(15),
    };

    let exploitability =
        8.22 * m.av.weight() * m.ac.weight() * m.pr.weight(m.s) * m.ui.weight();

    if impact <= 0.0 {
        return 0.0;
    }

    let raw = match m.s {
        Scope::Unchanged => (impact + exploitability).min(10.0),
        Scope::Changed => (1.08 * (impact + exploitability)).min(10.0),
    };

    round_up(raw)
}

/// Severity band for a rounded score. Lower bounds are inclusive: 4.0 is
/// Medium, 7.0 is High, 9.0 is Critical.
pub fn severity_from_score(score: f64) -> Severity {
    if score <= 0.0 {
        Severity::Info
    } else if score < 4.0 {
        Severity::Low
    } else if score < 7.0 {
        Severity::Medium
    } else if score < 9.0 {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Round up to one decimal place, per the CVSS v3.1 "Roundup" definition.
/// Scales to five decimals first so float representation noise (e.g. a
/// computed 7.2 stored as 7.2000000000000004) does not bump the result.
fn round_up(value: f64) -> f64 {
    let scaled = (value * 100_000.0).round() as i64;
    if scaled % 10_000 == 0 {
        scaled as f64 / 100_000.0
    } else {
        ((scaled as f64 / 10_000.0).floor() + 1.0) / 10.0
    }
}
