mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::Perfume;

#[derive(Debug)]
pub enum CollectionImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingField { row: usize, field: &'static str },
}

impl std::fmt::Display for CollectionImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionImportError::Io(err) => {
                write!(f, "failed to read collection export: {}", err)
            }
            CollectionImportError::Csv(err) => write!(f, "invalid collection CSV data: {}", err),
            CollectionImportError::MissingField { row, field } => {
                write!(f, "row {} is missing required field '{}'", row, field)
            }
        }
    }
}

impl std::error::Error for CollectionImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectionImportError::Io(err) => Some(err),
            CollectionImportError::Csv(err) => Some(err),
            CollectionImportError::MissingField { .. } => None,
        }
    }
}

impl From<std::io::Error> for CollectionImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CollectionImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads a perfume collection from a CSV export.
///
/// Expected columns: `Name`, `Brand`, `Family`, `Mood`, `Top Notes`,
/// `Middle Notes`, `Base Notes`, `Usage Contexts`. Multi-value cells are
/// separated with `;`.
pub struct CsvCollectionImporter;

impl CsvCollectionImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Perfume>, CollectionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Perfume>, CollectionImportError> {
        parser::parse_rows(reader)
    }
}
