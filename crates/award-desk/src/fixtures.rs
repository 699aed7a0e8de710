//! In-memory stores and sample records shared by unit tests.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};

use crate::applications::{Application, ApplicationId, ApplicationRepository, StudentId};
use crate::awards::{Award, AwardCategory, AwardId, AwardQuery, AwardRepository};
use crate::session::{Role, Session};
use crate::store::RepositoryError;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Evaluation day used across fixtures.
pub(crate) fn today() -> NaiveDate {
    date(2024, 3, 1)
}

pub(crate) fn award(id: &str, deadline: NaiveDate, is_active: Option<bool>) -> Award {
    Award {
        id: AwardId(id.to_string()),
        title: format!("Award {id}"),
        description: "Merit based support".to_string(),
        category: AwardCategory::Scholarship,
        value: 1000,
        deadline,
        is_active,
        citizenship: vec!["CA".to_string()],
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// Open (`open-1`), upcoming (`later-1`), closed (`past-1`) and force-closed (`paused-1`) awards.
pub(crate) fn sample_awards() -> Vec<Award> {
    vec![
        award("open-1", date(2024, 3, 10), None),
        award("later-1", date(2024, 5, 1), Some(true)),
        award("past-1", date(2024, 2, 15), None),
        award("paused-1", date(2024, 5, 1), Some(false)),
    ]
}

pub(crate) fn student(id: &str) -> Session {
    Session::new(id, Role::Student)
}

pub(crate) fn reviewer() -> Session {
    Session::new("r-1", Role::Reviewer)
}

pub(crate) fn admin() -> Session {
    Session::new("admin-1", Role::Admin)
}

#[derive(Default)]
pub(crate) struct MemoryAwards {
    awards: Mutex<Vec<Award>>,
}

impl MemoryAwards {
    pub(crate) fn seeded(awards: Vec<Award>) -> Arc<Self> {
        Arc::new(Self {
            awards: Mutex::new(awards),
        })
    }
}

impl AwardRepository for MemoryAwards {
    fn list(&self, query: &AwardQuery) -> Result<Vec<Award>, RepositoryError> {
        let guard = self.awards.lock().expect("awards mutex poisoned");
        Ok(query.apply(guard.iter().cloned()))
    }

    fn fetch(&self, id: &AwardId) -> Result<Option<Award>, RepositoryError> {
        let guard = self.awards.lock().expect("awards mutex poisoned");
        Ok(guard.iter().find(|award| &award.id == id).cloned())
    }

    fn upsert(&self, award: Award) -> Result<Award, RepositoryError> {
        let mut guard = self.awards.lock().expect("awards mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == award.id) {
            Some(existing) => *existing = award.clone(),
            None => guard.push(award.clone()),
        }
        Ok(award)
    }

    fn set_active(&self, id: &AwardId, is_active: bool) -> Result<Award, RepositoryError> {
        let mut guard = self.awards.lock().expect("awards mutex poisoned");
        let award = guard
            .iter_mut()
            .find(|award| &award.id == id)
            .ok_or(RepositoryError::NotFound)?;
        award.is_active = Some(is_active);
        Ok(award.clone())
    }
}

#[derive(Default)]
pub(crate) struct MemoryApplications {
    records: Mutex<Vec<Application>>,
}

impl MemoryApplications {
    pub(crate) fn seeded(applications: Vec<Application>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(applications),
        })
    }

    pub(crate) fn all(&self) -> Vec<Application> {
        self.records.lock().expect("records mutex poisoned").clone()
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.records.lock().expect("records mutex poisoned");
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
        let mut guard = self.records.lock().expect("records mutex poisoned");
        let existing = guard
            .iter_mut()
            .find(|existing| existing.id == application.id)
            .ok_or(RepositoryError::NotFound)?;
        *existing = application;
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let guard = self.records.lock().expect("records mutex poisoned");
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn for_student(&self, student: &StudentId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("records mutex poisoned");
        Ok(guard
            .iter()
            .filter(|existing| &existing.student_id == student)
            .cloned()
            .collect())
    }
}

pub(crate) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("db offline".to_string()))
    }

    fn update(&self, _application: Application) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("db offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("db offline".to_string()))
    }

    fn for_student(&self, _student: &StudentId) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("db offline".to_string()))
    }
}
