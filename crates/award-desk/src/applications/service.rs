use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{Application, ApplicationId, ApplicationStatus, StudentId};
use super::repository::ApplicationRepository;
use crate::awards::{Award, AwardId, AwardQuery, AwardRepository};
use crate::lifecycle::{has_applied, AwardLinkage};
use crate::session::{Role, Session};
use crate::store::RepositoryError;

/// Service composing the award store, the application store and the lifecycle rules.
pub struct ApplicationService<W, R> {
    awards: Arc<W>,
    applications: Arc<R>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<W, R> ApplicationService<W, R>
where
    W: AwardRepository + 'static,
    R: ApplicationRepository + 'static,
{
    pub fn new(awards: Arc<W>, applications: Arc<R>) -> Self {
        Self {
            awards,
            applications,
        }
    }

    /// Open a draft for the calling student.
    pub fn start_draft(
        &self,
        session: &Session,
        award_id: &AwardId,
        today: NaiveDate,
    ) -> Result<Application, ApplicationServiceError> {
        if session.role != Role::Student {
            return Err(ApplicationServiceError::Forbidden {
                role: session.role.label(),
                action: "start an application",
            });
        }

        let award = self.award(award_id)?;
        if !award.status_on(today).accepts_applications() {
            return Err(ApplicationServiceError::AwardClosed(award.id));
        }

        let student_id = StudentId(session.user_id.clone());
        let existing = self.applications.for_student(&student_id)?;
        if has_applied(&existing, award_id) {
            return Err(ApplicationServiceError::AlreadyApplied(award.id));
        }

        let application = Application {
            id: next_application_id(),
            award_id: award.id,
            student_id,
            status: ApplicationStatus::Draft,
            submitted_on: None,
        };

        let stored = match self.applications.insert(application) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => {
                return Err(ApplicationServiceError::AlreadyApplied(award_id.clone()))
            }
            Err(err) => return Err(err.into()),
        };
        info!(application_id = %stored.id.0, award_id = %stored.award_id, "draft opened");
        Ok(stored)
    }

    /// Submit the caller's own draft while the award still accepts applications.
    pub fn submit(
        &self,
        session: &Session,
        application_id: &ApplicationId,
        today: NaiveDate,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self.get(application_id)?;

        if session.role != Role::Student || session.user_id != application.student_id.0 {
            return Err(ApplicationServiceError::Forbidden {
                role: session.role.label(),
                action: "submit this application",
            });
        }

        ensure_transition(application.status, ApplicationStatus::Submitted)?;

        let award = self.award(&application.award_id)?;
        if !award.status_on(today).accepts_applications() {
            return Err(ApplicationServiceError::AwardClosed(award.id));
        }

        application.status = ApplicationStatus::Submitted;
        application.submitted_on = Some(today);
        self.applications.update(application.clone())?;

        info!(application_id = %application.id.0, %today, "application submitted");
        Ok(application)
    }

    /// Record that a reviewer has assessed a submitted application.
    pub fn review(
        &self,
        session: &Session,
        application_id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        if !session.role.can_review() {
            return Err(ApplicationServiceError::Forbidden {
                role: session.role.label(),
                action: "review applications",
            });
        }

        let mut application = self.get(application_id)?;
        ensure_transition(application.status, ApplicationStatus::Reviewed)?;

        application.status = ApplicationStatus::Reviewed;
        self.applications.update(application.clone())?;

        info!(
            application_id = %application.id.0,
            reviewer = %session.user_id,
            "application reviewed"
        );
        Ok(application)
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<Application, ApplicationServiceError> {
        let application = self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    /// How `student` currently relates to a single award.
    pub fn linkage(
        &self,
        student: &StudentId,
        award_id: &AwardId,
        today: NaiveDate,
    ) -> Result<AwardLinkage, ApplicationServiceError> {
        let award = self.award(award_id)?;
        let applications = self.applications.for_student(student)?;
        Ok(AwardLinkage::resolve(
            award.id.clone(),
            &award.window(),
            &applications,
            today,
        ))
    }

    /// Linkage for every award matching `query`, reusing one application snapshot.
    pub fn linkages(
        &self,
        student: &StudentId,
        query: &AwardQuery,
        today: NaiveDate,
    ) -> Result<Vec<AwardLinkage>, ApplicationServiceError> {
        let awards = self.awards.list(query)?;
        let applications = self.applications.for_student(student)?;
        Ok(awards
            .into_iter()
            .map(|award| {
                let window = award.window();
                AwardLinkage::resolve(award.id, &window, &applications, today)
            })
            .collect())
    }

    fn award(&self, award_id: &AwardId) -> Result<Award, ApplicationServiceError> {
        let award = self
            .awards
            .fetch(award_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(award)
    }
}

/// Rejects sessions that may not read `student`'s applications.
pub fn ensure_can_view(
    session: &Session,
    student: &StudentId,
) -> Result<(), ApplicationServiceError> {
    if session.can_view(&student.0) {
        Ok(())
    } else {
        Err(ApplicationServiceError::Forbidden {
            role: session.role.label(),
            action: "view another student's applications",
        })
    }
}

fn ensure_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
) -> Result<(), ApplicationServiceError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(ApplicationServiceError::InvalidTransition {
            from: from.label(),
            to: to.label(),
        })
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{role} may not {action}")]
    Forbidden {
        role: &'static str,
        action: &'static str,
    },
    #[error("award {0} is closed")]
    AwardClosed(AwardId),
    #[error("an application for award {0} already exists")]
    AlreadyApplied(AwardId),
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
