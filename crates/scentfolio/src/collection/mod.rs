pub mod domain;
pub mod import;

pub use domain::{Perfume, PerfumeId, PerfumeRecord, UserId};
pub use import::{CollectionImportError, CsvCollectionImporter};
