//! Award catalogue: records, browse queries, CSV import and HTTP routes.

pub mod catalogue;
pub mod domain;
pub mod import;
pub mod query;
pub mod repository;
pub mod router;

pub use catalogue::{AwardCatalogue, CatalogueError};
pub use domain::{Award, AwardCategory, AwardId, AwardView};
pub use import::{AwardCsvImporter, AwardImportError};
pub use query::{AwardQuery, AwardSort, SortDirection, SortField};
pub use repository::AwardRepository;
pub use router::catalogue_router;
