use super::domain::{ApplicationSnapshot, ApplicationStatus, StageCompletion};

const COMPLETE: u8 = StageCompletion::COMPLETE;
const INTERVIEW_SCHEDULED: u8 = 50;

/// Derive the completion vector for a snapshot. Always recomputed from scratch.
pub fn calculate_completion(snapshot: &ApplicationSnapshot) -> StageCompletion {
    StageCompletion::new([
        COMPLETE,
        documents_progress(snapshot),
        interview_progress(snapshot),
        decision_progress(&snapshot.status),
        compliance_progress(snapshot),
    ])
}

fn documents_progress(snapshot: &ApplicationSnapshot) -> u8 {
    if snapshot.status.is_compliance_finished() {
        return COMPLETE;
    }

    ratio_percent(
        snapshot.documents_uploaded.len(),
        snapshot.documents_required.len(),
    )
}

fn interview_progress(snapshot: &ApplicationSnapshot) -> u8 {
    match &snapshot.status {
        ApplicationStatus::ComplianceCompleted
        | ApplicationStatus::Onboarded
        | ApplicationStatus::Interviewed
        | ApplicationStatus::Hired
        | ApplicationStatus::Rejected => COMPLETE,
        ApplicationStatus::Applied
        | ApplicationStatus::DocumentsPending
        | ApplicationStatus::InterviewScheduled
        | ApplicationStatus::Unknown(_) => {
            if snapshot.has_interview_schedule {
                INTERVIEW_SCHEDULED
            } else {
                0
            }
        }
    }
}

fn decision_progress(status: &ApplicationStatus) -> u8 {
    if status.has_final_decision() {
        COMPLETE
    } else {
        0
    }
}

fn compliance_progress(snapshot: &ApplicationSnapshot) -> u8 {
    match &snapshot.status {
        ApplicationStatus::ComplianceCompleted | ApplicationStatus::Onboarded => COMPLETE,
        // Blocked once rejected, unreachable while only interviewed.
        ApplicationStatus::Rejected | ApplicationStatus::Interviewed => 0,
        ApplicationStatus::Applied
        | ApplicationStatus::DocumentsPending
        | ApplicationStatus::InterviewScheduled
        | ApplicationStatus::Hired
        | ApplicationStatus::Unknown(_) => ratio_percent(
            snapshot.accepted_compliance_items(),
            snapshot.compliance_checklist.len(),
        ),
    }
}

/// `100 * done / required`, rounded down and capped. Nothing required counts as done.
fn ratio_percent(done: usize, required: usize) -> u8 {
    if required == 0 {
        return COMPLETE;
    }

    let percent = done.saturating_mul(COMPLETE as usize) / required;
    percent.min(COMPLETE as usize) as u8
}
