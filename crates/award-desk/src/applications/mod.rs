//! Student applications against catalogue awards.
//!
//! Drafts are opened by students, submitted before the award closes, and then
//! picked up by reviewers. The linkage view that drives the student-facing
//! "Apply" / "Continue Draft" / "View Application" choice lives in
//! [`crate::lifecycle`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationId, ApplicationStatus, ApplicationView, StudentId};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ensure_can_view, ApplicationService, ApplicationServiceError};
