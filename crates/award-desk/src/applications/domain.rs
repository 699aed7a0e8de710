use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::awards::AwardId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Student-facing lifecycle of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    Reviewed,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Reviewed => "reviewed",
        }
    }

    /// Reviewed applications count as submitted for linkage purposes.
    pub const fn is_submitted(self) -> bool {
        matches!(self, Self::Submitted | Self::Reviewed)
    }

    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Submitted) | (Self::Submitted, Self::Reviewed)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub award_id: AwardId,
    pub student_id: StudentId,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub submitted_on: Option<NaiveDate>,
}

impl Application {
    pub fn view(&self) -> ApplicationView {
        ApplicationView {
            application_id: self.id.clone(),
            award_id: self.award_id.clone(),
            student_id: self.student_id.clone(),
            status: self.status.label(),
            submitted_on: self.submitted_on,
        }
    }
}

/// Sanitized representation returned by the HTTP layer.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    pub application_id: ApplicationId,
    pub award_id: AwardId,
    pub student_id: StudentId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_on: Option<NaiveDate>,
}
