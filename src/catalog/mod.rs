pub mod loader;

pub use loader::Catalog;

/// Reconnaissance tests are information-gathering, not vulnerability-finding:
/// they are exempt from CVSS scoring entirely. Both the save path and the
/// export paths consult this single predicate.
pub fn is_recon_task(wstg_id: &str) -> bool {
    wstg_id.starts_with("WSTG-INFO")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recon_classification_by_id_prefix() {
        assert!(is_recon_task("WSTG-INFO-01"));
        assert!(is_recon_task("WSTG-INFO-10"));
        assert!(!is_recon_task("WSTG-INPV-05"));
        assert!(!is_recon_task("WSTG-ATHN-01"));
        assert!(!is_recon_task(""));
    }
}
