use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{ApplicationSnapshot, ComplianceUpdate, Stage, StageCompletion};
use super::gate::{check_access, AccessDecision};
use super::navigation::{DenialNotice, NavigationOutcome, StageNavigationController};
use super::progress::calculate_completion;
use super::selector::select_active_stage;

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub completion: StageCompletion,
    pub active_stage: Stage,
    pub access: [AccessDecision; 5],
}

impl DashboardState {
    pub fn access_for(&self, stage: Stage) -> AccessDecision {
        self.access[stage.index()]
    }
}

/// Full recomputation: completion, then active stage, then the per-stage gate.
pub fn recompute(snapshot: &ApplicationSnapshot, previous: Stage) -> DashboardState {
    let completion = calculate_completion(snapshot);
    let active_stage = select_active_stage(snapshot, &completion, previous);
    let access = Stage::ordered().map(|stage| check_access(snapshot, &completion, stage));

    DashboardState {
        completion,
        active_stage,
        access,
    }
}

/// One stage as the rendering layer draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCard {
    pub stage: Stage,
    pub label: &'static str,
    pub percent: u8,
    pub active: bool,
    pub access: AccessDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub status: String,
    pub completion: StageCompletion,
    pub active_stage: Stage,
    pub stages: Vec<StageCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<DenialNotice>,
}

/// Dashboard instance for a single applicant: owns the current snapshot and its derived state.
///
/// The snapshot is only ever replaced wholesale, and each replacement triggers a full
/// [`recompute`]. Stage clicks go through the navigation controller and never touch the
/// snapshot.
#[derive(Debug, Clone)]
pub struct ApplicantDashboard {
    snapshot: ApplicationSnapshot,
    state: DashboardState,
    controller: StageNavigationController,
    notice: Option<DenialNotice>,
}

impl ApplicantDashboard {
    pub fn load(snapshot: ApplicationSnapshot, controller: StageNavigationController) -> Self {
        let state = recompute(&snapshot, Stage::Application);
        info!(
            status = snapshot.status.as_str(),
            active_stage = state.active_stage.number(),
            "dashboard loaded"
        );

        Self {
            snapshot,
            state,
            controller,
            notice: None,
        }
    }

    pub fn snapshot(&self) -> &ApplicationSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn active_stage(&self) -> Stage {
        self.state.active_stage
    }

    /// Swap in a freshly fetched snapshot. The latest fetch always wins.
    pub fn replace_snapshot(&mut self, snapshot: ApplicationSnapshot) -> &DashboardState {
        self.state = recompute(&snapshot, self.state.active_stage);
        self.snapshot = snapshot;
        debug!(
            status = self.snapshot.status.as_str(),
            active_stage = self.state.active_stage.number(),
            "snapshot replaced"
        );
        &self.state
    }

    /// Merge a compliance report into a new snapshot and recompute.
    pub fn apply_compliance_update(&mut self, update: &ComplianceUpdate) -> &DashboardState {
        let next = self.snapshot.with_compliance_update(update);
        self.replace_snapshot(next)
    }

    pub fn request_stage(&mut self, target: Stage, now: DateTime<Utc>) -> NavigationOutcome {
        let outcome = self.controller.request(
            &self.snapshot,
            &self.state.completion,
            self.state.active_stage,
            target,
            now,
        );

        match &outcome {
            NavigationOutcome::Transitioned { to, .. } => {
                self.state.active_stage = *to;
                self.notice = None;
            }
            NavigationOutcome::Rejected { notice, .. } => {
                self.notice = Some(notice.clone());
            }
        }

        outcome
    }

    /// Current notice, dropping it once expired.
    pub fn active_notice(&mut self, now: DateTime<Utc>) -> Option<&DenialNotice> {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| !notice.is_active(now))
        {
            self.notice = None;
        }
        self.notice.as_ref()
    }

    pub fn view(&mut self, now: DateTime<Utc>) -> DashboardView {
        let notice = self.active_notice(now).cloned();
        let stages = Stage::ordered()
            .into_iter()
            .map(|stage| StageCard {
                stage,
                label: stage.label(),
                percent: self.state.completion.get(stage),
                active: stage == self.state.active_stage,
                access: self.state.access_for(stage),
            })
            .collect();

        DashboardView {
            status: self.snapshot.status.to_string(),
            completion: self.state.completion,
            active_stage: self.state.active_stage,
            stages,
            notice,
        }
    }
}
