use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::lifecycle::{classify_award, AwardStatus, AwardWindow};

/// Identifier wrapper for catalogue awards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AwardId(pub String);

impl std::fmt::Display for AwardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardCategory {
    Scholarship,
    Grant,
    Bursary,
    Prize,
}

impl AwardCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scholarship" => Some(Self::Scholarship),
            "grant" => Some(Self::Grant),
            "bursary" => Some(Self::Bursary),
            "prize" => Some(Self::Prize),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Scholarship => "Scholarship",
            Self::Grant => "Grant",
            Self::Bursary => "Bursary",
            Self::Prize => "Prize",
        }
    }
}

/// Award row as normalized from the hosted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub id: AwardId,
    pub title: String,
    pub description: String,
    pub category: AwardCategory,
    /// Award amount in whole dollars.
    pub value: u32,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Citizenships eligible to apply. Empty means unrestricted.
    #[serde(default)]
    pub citizenship: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Award {
    pub fn window(&self) -> AwardWindow {
        AwardWindow::new(self.deadline, self.is_active)
    }

    pub fn status_on(&self, today: NaiveDate) -> AwardStatus {
        classify_award(&self.window(), today)
    }

    pub fn view(&self, today: NaiveDate) -> AwardView {
        let status = self.status_on(today);
        AwardView {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category,
            category_label: self.category.label(),
            value: self.value,
            deadline: self.deadline,
            is_active: self.window().is_active(),
            citizenship: self.citizenship.clone(),
            status,
            status_label: status.label(),
        }
    }
}

/// Browse projection carrying the status derived for a specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardView {
    pub id: AwardId,
    pub title: String,
    pub category: AwardCategory,
    pub category_label: &'static str,
    pub value: u32,
    pub deadline: NaiveDate,
    pub is_active: bool,
    pub citizenship: Vec<String>,
    pub status: AwardStatus,
    pub status_label: &'static str,
}
