use super::common::*;
use crate::workflows::hiring::domain::{ApplicationSnapshot, ComplianceStatusEntry, Stage};
use crate::workflows::hiring::gate::{check_access, AccessDecision, DenialReason};

fn access(snapshot: &ApplicationSnapshot, stage: Stage) -> AccessDecision {
    check_access(snapshot, &completion_of(snapshot), stage)
}

#[test]
fn first_two_stages_are_always_open() {
    let mut statuses: Vec<&str> = ALL_STATUSES.to_vec();
    statuses.push("");

    for raw in statuses {
        let snapshot = with_documents(raw, 3, 0);
        assert_eq!(access(&snapshot, Stage::Application), AccessDecision::Allowed);
        assert_eq!(access(&snapshot, Stage::DocumentUpload), AccessDecision::Allowed);
    }
}

#[test]
fn interview_requires_complete_documents() {
    assert_eq!(
        access(&scenario_a(), Stage::Interview),
        AccessDecision::Denied(DenialReason::DocumentsIncomplete)
    );
    assert_eq!(
        access(&documents_complete("applied"), Stage::Interview),
        AccessDecision::Allowed
    );
}

#[test]
fn later_stages_require_a_final_decision() {
    for raw in ["applied", "documents_pending", "interview_scheduled", "interviewed", "Hired"] {
        let snapshot = documents_complete(raw);
        for stage in [Stage::Decision, Stage::ComplianceCheck] {
            assert_eq!(
                access(&snapshot, stage),
                AccessDecision::Denied(DenialReason::NoFinalDecision),
                "{raw} -> {stage}"
            );
        }
    }
}

#[test]
fn decided_applications_still_need_documents() {
    let snapshot = with_documents("hired", 2, 1);
    for stage in [Stage::Decision, Stage::ComplianceCheck] {
        assert_eq!(
            access(&snapshot, stage),
            AccessDecision::Denied(DenialReason::DocumentsIncomplete)
        );
    }
}

#[test]
fn hired_with_documents_opens_decision_and_compliance() {
    let snapshot = scenario_b();
    assert_eq!(access(&snapshot, Stage::Decision), AccessDecision::Allowed);
    assert_eq!(access(&snapshot, Stage::ComplianceCheck), AccessDecision::Allowed);
}

#[test]
fn rejected_applicants_see_decision_but_not_compliance() {
    let snapshot = scenario_c();
    assert_eq!(access(&snapshot, Stage::Decision), AccessDecision::Allowed);

    let decision = access(&snapshot, Stage::ComplianceCheck);
    assert_eq!(
        decision,
        AccessDecision::Denied(DenialReason::ComplianceDisabledForRejected)
    );
    assert_eq!(
        decision.reason().map(DenialReason::message),
        Some("compliance disabled for rejected applications")
    );

    // Rejection wins over missing documents for the compliance stage.
    assert_eq!(
        access(&with_documents("rejected", 2, 0), Stage::ComplianceCheck),
        AccessDecision::Denied(DenialReason::ComplianceDisabledForRejected)
    );
}

#[test]
fn accepted_compliance_items_never_revoke_access() {
    let checklist = ["DBS Check", "Right to Work", "References"];
    for raw in ["hired", "compliance_completed", "onboarded", "rejected"] {
        let base = ApplicationSnapshot::builder(status(raw))
            .documents_required(["Resume"])
            .documents_uploaded(["Resume"])
            .compliance_checklist(checklist)
            .build();

        for accepted in 0..=checklist.len() {
            let mut snapshot = base.clone();
            snapshot.compliance_status = checklist
                .iter()
                .take(accepted)
                .map(|item| ComplianceStatusEntry::accepted(*item))
                .collect();

            for stage in [Stage::Decision, Stage::ComplianceCheck] {
                if access(&base, stage).is_allowed() {
                    assert!(
                        access(&snapshot, stage).is_allowed(),
                        "{raw}: {stage} revoked after {accepted} accepted"
                    );
                }
            }
        }
    }
}

#[test]
fn denial_messages_are_stable() {
    assert_eq!(DenialReason::DocumentsIncomplete.message(), "documents incomplete");
    assert_eq!(DenialReason::NoFinalDecision.message(), "no final decision yet");
    assert_eq!(
        DenialReason::ComplianceDisabledForRejected.message(),
        "compliance disabled for rejected applications"
    );
}
