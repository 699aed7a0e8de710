use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deadline::{classify_deadline, AwardStatus};

/// The two award fields the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardWindow {
    pub deadline: NaiveDate,
    /// Administrative switch. Absent means active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl AwardWindow {
    pub fn new(deadline: NaiveDate, is_active: Option<bool>) -> Self {
        Self {
            deadline,
            is_active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Classify an award, honouring an explicit administrative close.
pub fn classify_award(window: &AwardWindow, today: NaiveDate) -> AwardStatus {
    if window.is_active == Some(false) {
        return AwardStatus::Closed;
    }

    classify_deadline(window.deadline, today)
}
