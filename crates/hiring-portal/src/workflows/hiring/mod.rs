//! Applicant dashboard progression: completion per stage, the focused stage, and access gating.
//!
//! Every computation here is a pure function of an [`ApplicationSnapshot`]. Callers recompute
//! on the initial fetch and after each snapshot replacement; nothing is patched incrementally.

pub mod dashboard;
pub mod domain;
pub mod gate;
pub mod intake;
pub mod navigation;
mod progress;
pub mod router;
mod selector;

#[cfg(test)]
mod tests;

pub use dashboard::{recompute, ApplicantDashboard, DashboardState, DashboardView, StageCard};
pub use domain::{
    ApplicationSnapshot, ApplicationStatus, ComplianceState, ComplianceStatusEntry,
    ComplianceUpdate, InvalidStage, SnapshotBuilder, Stage, StageCompletion,
};
pub use gate::{check_access, AccessDecision, DenialReason};
pub use intake::{ComplianceUpdatePayload, DashboardPayload, IntakeError};
pub use navigation::{DenialNotice, NavigationOutcome, StageNavigationController};
pub use progress::calculate_completion;
pub use router::dashboard_router;
pub use selector::select_active_stage;
