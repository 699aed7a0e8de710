use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of calendar days ahead of the evaluation date that still count as open.
pub const OPEN_WINDOW_DAYS: i64 = 30;

/// Display status derived from an award's deadline at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardStatus {
    Open,
    Closed,
    Upcoming,
}

impl AwardStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Upcoming => "upcoming",
        }
    }

    pub const fn accepts_applications(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Classify a deadline relative to `today`.
///
/// A deadline before `today` is closed. A deadline on `today` or within the
/// next [`OPEN_WINDOW_DAYS`] days (inclusive) is open. Anything further out
/// is upcoming.
pub fn classify_deadline(deadline: NaiveDate, today: NaiveDate) -> AwardStatus {
    if deadline < today {
        return AwardStatus::Closed;
    }

    match today.checked_add_signed(Duration::days(OPEN_WINDOW_DAYS)) {
        Some(window_end) if deadline > window_end => AwardStatus::Upcoming,
        _ => AwardStatus::Open,
    }
}
