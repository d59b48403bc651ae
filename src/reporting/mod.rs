pub mod csv;
pub mod html;
pub mod markdown;
pub mod stats;

pub use stats::{ProjectStats, SeverityCounts};

pub const MIME_CSV: &str = "text/csv";
pub const MIME_HTML: &str = "text/html";
pub const MIME_MARKDOWN: &str = "text/markdown";

/// A rendered export: the composer defines only the bytes, filename and MIME
/// type; delivery (file, download, clipboard) is up to the caller.
pub struct ExportDocument {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Collapse whitespace runs to underscores for use in export filenames.
pub(crate) fn filename_stem(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Placeholder for optional narrative fields in document encodings.
pub(crate) const NOT_AVAILABLE: &str = "N/A";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_stem_collapses_whitespace() {
        assert_eq!(filename_stem("E-Banking  App v2"), "E-Banking_App_v2");
        assert_eq!(filename_stem("single"), "single");
    }
}
