//! Command handlers for the Orgkey CLI.

mod inspect;
mod misc;
mod unwrap;

use std::collections::BTreeMap;
use std::path::Path;

use orgkey_core::{parse_record_map, TransportRecord};

pub use inspect::handle_inspect;
pub use misc::handle_completions;
pub use unwrap::handle_unwrap;

/// Read a JSON file mapping organization ids to encrypted key records.
fn read_record_file(path: &Path) -> anyhow::Result<BTreeMap<String, TransportRecord>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read key file {}: {}", path.display(), e))?;
    parse_record_map(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse key file {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        std::fs::write(
            &path,
            r#"{"org-a":{"type":"organization","key":"ct1"},"org-b":{"type":"unknown","key":"ct3"}}"#,
        )
        .unwrap();

        let records = read_record_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records["org-b"].tag(), Some("unknown"));
    }

    #[test]
    fn test_read_record_file_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = read_record_file(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse key file"));
        assert!(err.contains("keys.json"));
    }
}
