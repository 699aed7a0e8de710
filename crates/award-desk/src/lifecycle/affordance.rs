use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deadline::AwardStatus;
use super::gate::{classify_award, AwardWindow};
use super::linkage::{application_status, has_applied};
use crate::applications::{Application, ApplicationStatus};
use crate::awards::AwardId;

/// Action a student is offered for an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    Apply,
    ContinueDraft,
    ViewApplication,
    Unavailable,
}

impl Affordance {
    pub fn resolve(award: AwardStatus, application: Option<ApplicationStatus>) -> Self {
        match application {
            Some(status) if status.is_submitted() => Self::ViewApplication,
            Some(_) if award.accepts_applications() => Self::ContinueDraft,
            None if award.accepts_applications() => Self::Apply,
            _ => Self::Unavailable,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Apply => "Apply",
            Self::ContinueDraft => "Continue Draft",
            Self::ViewApplication => "View Application",
            Self::Unavailable => "Unavailable",
        }
    }
}

/// A student's engagement with a single award at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardLinkage {
    pub award_id: AwardId,
    pub status: AwardStatus,
    pub has_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<ApplicationStatus>,
    pub affordance: Affordance,
    pub affordance_label: &'static str,
}

impl AwardLinkage {
    pub fn resolve(
        award_id: AwardId,
        window: &AwardWindow,
        applications: &[Application],
        today: NaiveDate,
    ) -> Self {
        let status = classify_award(window, today);
        let applied = has_applied(applications, &award_id);
        let application = application_status(applications, &award_id);
        let affordance = Affordance::resolve(status, application);

        Self {
            award_id,
            status,
            has_applied: applied,
            application_status: application,
            affordance,
            affordance_label: affordance.label(),
        }
    }
}
