//! Where distance tables come from.
//!
//! The engine never reads files itself; a [`DistanceSource`] hands it a
//! parsed [`DistanceMatrix`] and the service caches the result.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::distance::DistanceMatrix;
use crate::error::FreightResult;

/// Produces a parsed distance matrix on demand.
pub trait DistanceSource: Send + Sync {
    /// Loads and parses the table.
    fn load(&self) -> FreightResult<DistanceMatrix>;
}

/// Reads a semicolon-delimited distance file on each [`load`](DistanceSource::load).
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DistanceSource for CsvFileSource {
    fn load(&self) -> FreightResult<DistanceMatrix> {
        let file = File::open(&self.path)?;
        let matrix = DistanceMatrix::from_reader(BufReader::new(file))?;
        info!(
            path = %self.path.display(),
            cities = matrix.size(),
            "distance table loaded"
        );
        Ok(matrix)
    }
}

/// An already-parsed matrix serves as its own source.
impl DistanceSource for DistanceMatrix {
    fn load(&self) -> FreightResult<DistanceMatrix> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FreightError;
    use std::io::Write;

    #[test]
    fn test_csv_file_source() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "RECIFE;NATAL\n0;297\n297;0\n").expect("write");
        let source = CsvFileSource::new(file.path());
        let dm = source.load().expect("valid");
        assert_eq!(dm.distance_between("RECIFE", "NATAL").expect("known"), 297);
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = CsvFileSource::new(dir.path().join("absent.csv"));
        assert!(matches!(source.load(), Err(FreightError::Io(_))));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "A;B\n0;1\n").expect("write");
        let source = CsvFileSource::new(file.path());
        assert!(matches!(
            source.load(),
            Err(FreightError::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_matrix_is_its_own_source() {
        let dm = DistanceMatrix::from_table_str("A;B\n0;3\n3;0").expect("valid");
        let loaded = DistanceSource::load(&dm).expect("infallible");
        assert_eq!(loaded, dm);
    }
}
