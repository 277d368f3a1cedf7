use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::hiring::domain::{
    ApplicationSnapshot, ApplicationStatus, ComplianceStatusEntry, StageCompletion,
};
use crate::workflows::hiring::progress::calculate_completion;

pub(super) const ALL_STATUSES: [&str; 8] = [
    "applied",
    "documents_pending",
    "interview_scheduled",
    "interviewed",
    "hired",
    "rejected",
    "compliance_completed",
    "onboarded",
];

pub(super) fn status(raw: &str) -> ApplicationStatus {
    ApplicationStatus::parse(raw)
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 6, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn completion(snapshot: &ApplicationSnapshot) -> [u8; 5] {
    calculate_completion(snapshot).as_array()
}

pub(super) fn completion_of(snapshot: &ApplicationSnapshot) -> StageCompletion {
    calculate_completion(snapshot)
}

/// Requisition asking for `required` documents with the first `uploaded` of them attached.
pub(super) fn with_documents(
    raw_status: &str,
    required: usize,
    uploaded: usize,
) -> ApplicationSnapshot {
    let names: Vec<String> = (1..=required).map(|n| format!("Document {n}")).collect();
    let attached: Vec<String> = names.iter().take(uploaded).cloned().collect();
    ApplicationSnapshot::builder(status(raw_status))
        .documents_required(names)
        .documents_uploaded(attached)
        .build()
}

pub(super) fn documents_complete(raw_status: &str) -> ApplicationSnapshot {
    with_documents(raw_status, 2, 2)
}

/// Resume + ID required, only the resume attached.
pub(super) fn scenario_a() -> ApplicationSnapshot {
    ApplicationSnapshot::builder(status("documents_pending"))
        .documents_required(["Resume", "ID"])
        .documents_uploaded(["Resume"])
        .build()
}

/// Hired with everything uploaded and one outstanding compliance item.
pub(super) fn scenario_b() -> ApplicationSnapshot {
    ApplicationSnapshot::builder(status("hired"))
        .documents_required(["Resume", "ID"])
        .documents_uploaded(["Resume", "ID"])
        .compliance_checklist(["DBS Check"])
        .build()
}

/// Rejected with everything uploaded and an accepted compliance item that must not count.
pub(super) fn scenario_c() -> ApplicationSnapshot {
    ApplicationSnapshot::builder(status("rejected"))
        .documents_required(["Resume", "ID"])
        .documents_uploaded(["Resume", "ID"])
        .compliance_checklist(["DBS Check"])
        .compliance_status(vec![ComplianceStatusEntry::accepted("DBS Check")])
        .build()
}

/// Interviewed with three of five documents uploaded.
pub(super) fn scenario_d() -> ApplicationSnapshot {
    with_documents("interviewed", 5, 3)
}
