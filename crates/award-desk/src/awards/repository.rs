use super::domain::{Award, AwardId};
use super::query::AwardQuery;
use crate::store::RepositoryError;

/// Storage abstraction over the hosted award table.
pub trait AwardRepository: Send + Sync {
    fn list(&self, query: &AwardQuery) -> Result<Vec<Award>, RepositoryError>;
    fn fetch(&self, id: &AwardId) -> Result<Option<Award>, RepositoryError>;
    fn upsert(&self, award: Award) -> Result<Award, RepositoryError>;
    /// Flip the administrative switch without touching any other field.
    fn set_active(&self, id: &AwardId, is_active: bool) -> Result<Award, RepositoryError>;
}
