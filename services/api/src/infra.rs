use award_desk::applications::{Application, ApplicationId, ApplicationRepository, StudentId};
use award_desk::awards::{Award, AwardId, AwardQuery, AwardRepository};
use award_desk::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

pub(crate) use award_desk::dates::parse_date;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Award table stand-in. Keeps insertion order as the store order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAwardRepository {
    awards: Arc<Mutex<Vec<Award>>>,
}

impl InMemoryAwardRepository {
    pub(crate) fn seeded(awards: Vec<Award>) -> Self {
        Self {
            awards: Arc::new(Mutex::new(awards)),
        }
    }
}

impl AwardRepository for InMemoryAwardRepository {
    fn list(&self, query: &AwardQuery) -> Result<Vec<Award>, RepositoryError> {
        let guard = self.awards.lock().expect("award mutex poisoned");
        Ok(query.apply(guard.iter().cloned()))
    }

    fn fetch(&self, id: &AwardId) -> Result<Option<Award>, RepositoryError> {
        let guard = self.awards.lock().expect("award mutex poisoned");
        Ok(guard.iter().find(|award| &award.id == id).cloned())
    }

    fn upsert(&self, award: Award) -> Result<Award, RepositoryError> {
        let mut guard = self.awards.lock().expect("award mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == award.id) {
            Some(existing) => *existing = award.clone(),
            None => guard.push(award.clone()),
        }
        Ok(award)
    }

    fn set_active(&self, id: &AwardId, is_active: bool) -> Result<Award, RepositoryError> {
        let mut guard = self.awards.lock().expect("award mutex poisoned");
        let award = guard
            .iter_mut()
            .find(|award| &award.id == id)
            .ok_or(RepositoryError::NotFound)?;
        award.is_active = Some(is_active);
        Ok(award.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<Application>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| {
            existing.id == application.id
                || (existing.student_id == application.student_id
                    && existing.award_id == application.award_id)
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == application.id) {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn for_student(&self, student: &StudentId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|existing| &existing.student_id == student)
            .cloned()
            .collect())
    }
}
