//! Award lifecycle classification and application workflow for a university
//! scholarship portal.

pub mod applications;
pub mod awards;
pub mod config;
pub mod dates;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod store;
pub mod telemetry;

pub use store::RepositoryError;

#[cfg(test)]
pub(crate) mod fixtures;
