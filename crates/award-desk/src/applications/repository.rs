use super::domain::{Application, ApplicationId, StudentId};
use crate::store::RepositoryError;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    /// Stores a new application. Fails with `Conflict` when the id is taken or the
    /// student already holds an application for the same award; the check and the
    /// write happen under one lock or transaction.
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    /// A student's applications in store order.
    fn for_student(&self, student: &StudentId) -> Result<Vec<Application>, RepositoryError>;
}
