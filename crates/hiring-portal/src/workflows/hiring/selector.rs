use super::domain::{ApplicationSnapshot, ApplicationStatus, Stage, StageCompletion};
use super::gate::check_access;

/// Pick the stage the dashboard should focus after a fresh snapshot.
///
/// Status-driven rules come first; otherwise the earliest unfinished stage wins. The result is
/// never a stage the gate would deny.
pub fn select_active_stage(
    snapshot: &ApplicationSnapshot,
    completion: &StageCompletion,
    previous: Stage,
) -> Stage {
    let candidate = candidate_stage(snapshot, completion, previous);
    nearest_allowed(snapshot, completion, candidate)
}

fn candidate_stage(
    snapshot: &ApplicationSnapshot,
    completion: &StageCompletion,
    previous: Stage,
) -> Stage {
    let documents_done = completion.documents_complete();
    let unless_documents_pending = |stage: Stage| {
        if documents_done {
            stage
        } else {
            Stage::DocumentUpload
        }
    };

    match &snapshot.status {
        ApplicationStatus::Rejected | ApplicationStatus::Hired => {
            unless_documents_pending(Stage::Decision)
        }
        ApplicationStatus::ComplianceCompleted | ApplicationStatus::Onboarded => {
            unless_documents_pending(Stage::ComplianceCheck)
        }
        ApplicationStatus::Interviewed => unless_documents_pending(Stage::Interview),
        ApplicationStatus::Applied
        | ApplicationStatus::DocumentsPending
        | ApplicationStatus::InterviewScheduled
        | ApplicationStatus::Unknown(_) => match completion.first_incomplete() {
            Some(stage) => stage,
            // A fully complete dashboard should not stay parked on Interview.
            None if previous == Stage::Interview => Stage::Application,
            None => previous,
        },
    }
}

fn nearest_allowed(
    snapshot: &ApplicationSnapshot,
    completion: &StageCompletion,
    candidate: Stage,
) -> Stage {
    let mut stage = candidate;
    loop {
        if check_access(snapshot, completion, stage).is_allowed() {
            return stage;
        }
        match stage.previous() {
            Some(previous) => stage = previous,
            None => return Stage::Application,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::hiring::domain::ComplianceStatusEntry;
    use crate::workflows::hiring::progress::calculate_completion;

    #[test]
    fn denied_candidate_falls_back_to_lower_allowed_stage() {
        let snapshot = ApplicationSnapshot::builder(ApplicationStatus::Applied)
            .documents_required(["Resume"])
            .documents_uploaded(["Resume"])
            .build();
        let completion = calculate_completion(&snapshot);

        assert_eq!(
            nearest_allowed(&snapshot, &completion, Stage::ComplianceCheck),
            Stage::Interview
        );
    }

    #[test]
    fn full_completion_releases_interview_focus() {
        let snapshot = ApplicationSnapshot::builder(ApplicationStatus::Applied).build();
        let done = StageCompletion::new([100; 5]);

        assert_eq!(
            candidate_stage(&snapshot, &done, Stage::Interview),
            Stage::Application
        );
        assert_eq!(
            candidate_stage(&snapshot, &done, Stage::DocumentUpload),
            Stage::DocumentUpload
        );
        assert_eq!(
            candidate_stage(&snapshot, &done, Stage::ComplianceCheck),
            Stage::ComplianceCheck
        );
    }

    #[test]
    fn unknown_status_follows_first_incomplete_stage() {
        let snapshot = ApplicationSnapshot::builder(ApplicationStatus::Unknown("archived".into()))
            .compliance_status(vec![ComplianceStatusEntry::accepted("DBS Check")])
            .interview_scheduled(true)
            .build();
        let completion = calculate_completion(&snapshot);

        let active = select_active_stage(&snapshot, &completion, Stage::Decision);
        assert_eq!(active, Stage::Interview);
    }
}
