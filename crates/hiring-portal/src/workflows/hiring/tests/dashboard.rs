use chrono::Duration;

use super::common::*;
use crate::workflows::hiring::dashboard::{recompute, ApplicantDashboard};
use crate::workflows::hiring::domain::{ComplianceStatusEntry, ComplianceUpdate, Stage};
use crate::workflows::hiring::gate::{AccessDecision, DenialReason};
use crate::workflows::hiring::navigation::{NavigationOutcome, StageNavigationController};

fn dashboard(snapshot: crate::workflows::hiring::ApplicationSnapshot) -> ApplicantDashboard {
    ApplicantDashboard::load(snapshot, StageNavigationController::new(Duration::seconds(4)))
}

#[test]
fn recompute_reports_scenario_outcomes() {
    let a = recompute(&scenario_a(), Stage::Application);
    assert_eq!(a.completion.as_array(), [100, 50, 0, 0, 0]);
    assert_eq!(a.active_stage, Stage::DocumentUpload);

    let b = recompute(&scenario_b(), Stage::Application);
    assert_eq!(b.completion.as_array(), [100, 100, 100, 100, 0]);
    assert_eq!(b.active_stage, Stage::Decision);
    assert_eq!(b.access_for(Stage::ComplianceCheck), AccessDecision::Allowed);

    let c = recompute(&scenario_c(), Stage::Application);
    assert_eq!(c.completion.as_array(), [100, 100, 100, 100, 0]);
    assert_eq!(c.active_stage, Stage::Decision);
    assert_eq!(
        c.access_for(Stage::ComplianceCheck),
        AccessDecision::Denied(DenialReason::ComplianceDisabledForRejected)
    );

    let d = recompute(&scenario_d(), Stage::Application);
    assert_eq!(d.active_stage, Stage::DocumentUpload);
    assert_eq!(
        d.access_for(Stage::Interview),
        AccessDecision::Denied(DenialReason::DocumentsIncomplete)
    );
}

#[test]
fn compliance_update_replaces_snapshot_and_recomputes() {
    let mut dashboard = dashboard(scenario_b());
    let before = dashboard.snapshot().clone();

    let update = ComplianceUpdate {
        status: None,
        compliance_status: Some(vec![ComplianceStatusEntry::accepted("DBS Check")]),
    };
    let state = dashboard.apply_compliance_update(&update).clone();

    assert_eq!(state.completion.as_array(), [100, 100, 100, 100, 100]);
    assert_eq!(state.active_stage, Stage::Decision);
    assert!(before.compliance_status.is_empty());
    assert_eq!(dashboard.snapshot().compliance_status.len(), 1);
    assert_eq!(dashboard.snapshot().status, before.status);
}

#[test]
fn status_update_moves_focus_to_compliance() {
    let mut dashboard = dashboard(scenario_b());
    let update = ComplianceUpdate {
        status: Some(status("compliance_completed")),
        compliance_status: None,
    };

    let state = dashboard.apply_compliance_update(&update);
    assert_eq!(state.active_stage, Stage::ComplianceCheck);
    assert_eq!(state.completion.get(Stage::ComplianceCheck), 100);
}

#[test]
fn decision_corrections_are_reflected_on_refetch() {
    let mut dashboard = dashboard(scenario_c());
    assert_eq!(
        dashboard.state().access_for(Stage::ComplianceCheck),
        AccessDecision::Denied(DenialReason::ComplianceDisabledForRejected)
    );

    let mut corrected = dashboard.snapshot().clone();
    corrected.status = status("hired");
    let state = dashboard.replace_snapshot(corrected);

    assert_eq!(state.access_for(Stage::ComplianceCheck), AccessDecision::Allowed);
    assert_eq!(state.completion.get(Stage::ComplianceCheck), 100);
}

#[test]
fn stage_requests_update_focus_or_raise_notice() {
    let mut dashboard = dashboard(scenario_c());

    let outcome = dashboard.request_stage(Stage::ComplianceCheck, now());
    assert!(matches!(outcome, NavigationOutcome::Rejected { .. }));
    assert_eq!(dashboard.active_stage(), Stage::Decision);
    assert!(dashboard.active_notice(now()).is_some());

    let outcome = dashboard.request_stage(Stage::Application, now());
    assert!(matches!(outcome, NavigationOutcome::Transitioned { .. }));
    assert_eq!(dashboard.active_stage(), Stage::Application);
    assert!(dashboard.active_notice(now()).is_none());
}

#[test]
fn notices_disappear_after_expiry() {
    let mut dashboard = dashboard(scenario_a());
    dashboard.request_stage(Stage::Decision, now());

    let view = dashboard.view(now() + Duration::seconds(1));
    let notice = view.notice.expect("notice still visible");
    assert_eq!(notice.message, "no final decision yet");

    let later = dashboard.view(now() + Duration::seconds(4));
    assert!(later.notice.is_none());
    assert!(dashboard.active_notice(now()).is_none());
}

#[test]
fn view_lists_every_stage_in_order() {
    let mut dashboard = dashboard(scenario_b());
    let view = dashboard.view(now());

    assert_eq!(view.status, "hired");
    let labels: Vec<&str> = view.stages.iter().map(|card| card.label).collect();
    assert_eq!(
        labels,
        [
            "Application",
            "Document Upload",
            "Interview",
            "Decision",
            "Compliance Check"
        ]
    );
    let active: Vec<Stage> = view
        .stages
        .iter()
        .filter(|card| card.active)
        .map(|card| card.stage)
        .collect();
    assert_eq!(active, [Stage::Decision]);

    let json = serde_json::to_value(&view).expect("view serializes");
    assert_eq!(json["completion"], serde_json::json!([100, 100, 100, 100, 0]));
    assert_eq!(json["active_stage"], 4);
    assert_eq!(json["stages"][2]["access"], serde_json::json!({ "allowed": true }));
    assert!(json.get("notice").is_none());
}
