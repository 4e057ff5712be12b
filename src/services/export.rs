//! Export file writing
//!
//! The browser-download step of the original workflow becomes a plain file
//! write into the configured export directory, with filenames embedding
//! the calendar date.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename for the JSON data export, e.g. `viber-data-2025-08-29.json`.
pub fn json_export_filename(date: NaiveDate) -> String {
    format!("viber-data-{}.json", date.format("%Y-%m-%d"))
}

/// Filename for the CSV history export, e.g. `viber-historik-2025-08-29.csv`.
pub fn csv_export_filename(date: NaiveDate) -> String {
    format!("viber-historik-{}.csv", date.format("%Y-%m-%d"))
}

/// Write an export payload into the directory, creating it if needed.
/// Returns the full path of the written file.
pub fn write_export(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    }
    let path = dir.join(filename);
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filenames_embed_the_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 29).unwrap();
        assert_eq!(json_export_filename(date), "viber-data-2025-08-29.json");
        assert_eq!(csv_export_filename(date), "viber-historik-2025-08-29.csv");
    }

    #[test]
    fn test_write_export_creates_directory_and_file() {
        let dir = std::env::temp_dir().join("market-tui-export-test");
        let _ = fs::remove_dir_all(&dir);

        let path = write_export(&dir, "out.csv", b"a,b\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"a,b\n");

        let _ = fs::remove_dir_all(&dir);
    }
}
