//! Award lifecycle classification.
//!
//! Every function here is a pure projection over values the caller already
//! holds. The evaluation date is always passed in; nothing in this module
//! reads the wall clock.

mod affordance;
mod deadline;
mod gate;
mod linkage;

pub use affordance::{Affordance, AwardLinkage};
pub use deadline::{classify_deadline, AwardStatus, OPEN_WINDOW_DAYS};
pub use gate::{classify_award, AwardWindow};
pub use linkage::{application_status, has_applied};
