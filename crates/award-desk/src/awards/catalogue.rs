use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::domain::{Award, AwardId, AwardView};
use super::query::AwardQuery;
use super::repository::AwardRepository;
use crate::session::Session;
use crate::store::RepositoryError;

/// Read and administration surface over the award store.
pub struct AwardCatalogue<R> {
    repository: Arc<R>,
}

impl<R> AwardCatalogue<R>
where
    R: AwardRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// List awards matching `query`, each classified as of `today`.
    pub fn browse(
        &self,
        query: &AwardQuery,
        today: NaiveDate,
    ) -> Result<Vec<AwardView>, CatalogueError> {
        let awards = self.repository.list(query)?;
        debug!(count = awards.len(), %today, "classified award listing");
        Ok(awards.iter().map(|award| award.view(today)).collect())
    }

    pub fn get(&self, id: &AwardId, today: NaiveDate) -> Result<AwardView, CatalogueError> {
        let award = self.fetch(id)?;
        Ok(award.view(today))
    }

    pub fn fetch(&self, id: &AwardId) -> Result<Award, CatalogueError> {
        let award = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(award)
    }

    /// Force-close or reopen an award. Admin only.
    pub fn set_active(
        &self,
        session: &Session,
        id: &AwardId,
        is_active: bool,
    ) -> Result<Award, CatalogueError> {
        if !session.is_admin() {
            return Err(CatalogueError::Forbidden);
        }

        let award = self.repository.set_active(id, is_active)?;
        info!(award_id = %id, is_active, admin = %session.user_id, "award activation changed");
        Ok(award)
    }

    /// Create or replace an award. Admin only.
    pub fn publish(&self, session: &Session, award: Award) -> Result<Award, CatalogueError> {
        if !session.is_admin() {
            return Err(CatalogueError::Forbidden);
        }

        let stored = self.repository.upsert(award)?;
        info!(award_id = %stored.id, admin = %session.user_id, "award published");
        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("only administrators may manage awards")]
    Forbidden,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
