// crates/infra/src/persistence/file_reader.rs
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use year_range_filter_shared_kernel::{InfraResult, InfrastructureError};

/// Convenience helpers for reading input files with consistent error handling.
pub struct FileReader;

impl FileReader {
    /// Open the file at `path` with buffered reading.
    pub fn open_buffered(path: &Path) -> InfraResult<BufReader<File>> {
        File::open(path).map(BufReader::new).map_err(|source| InfrastructureError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the entire file as UTF-8 text.
    pub fn read_to_string(path: &Path) -> InfraResult<String> {
        let mut reader = Self::open_buffered(path)?;
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|source| InfrastructureError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(text)
    }

    /// Lower-cased extension of `path`, or an empty string.
    pub fn extension(path: &Path) -> String {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "beginjaar,eindjaar").unwrap();
        assert_eq!(FileReader::read_to_string(file.path()).unwrap(), "beginjaar,eindjaar");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.geojson");
        match FileReader::read_to_string(&path).unwrap_err() {
            InfrastructureError::FileRead { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(FileReader::extension(Path::new("Percelen.GeoJSON")), "geojson");
        assert_eq!(FileReader::extension(Path::new("settings")), "");
    }
}
