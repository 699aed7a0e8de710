use crate::applications::{Application, ApplicationStatus};
use crate::awards::AwardId;

/// True when any application in the snapshot targets `award_id`.
pub fn has_applied(applications: &[Application], award_id: &AwardId) -> bool {
    applications
        .iter()
        .any(|application| &application.award_id == award_id)
}

/// Status of the first application in the snapshot that targets `award_id`.
///
/// Later applications to the same award are ignored, so callers must hand in
/// the snapshot in the order the store returned it.
pub fn application_status(
    applications: &[Application],
    award_id: &AwardId,
) -> Option<ApplicationStatus> {
    applications
        .iter()
        .find(|application| &application.award_id == award_id)
        .map(|application| application.status)
}
