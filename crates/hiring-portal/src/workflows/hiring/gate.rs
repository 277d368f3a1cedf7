use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::domain::{ApplicationSnapshot, ApplicationStatus, Stage, StageCompletion};

/// Why a stage cannot be opened. Not an error: the dashboard shows the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    DocumentsIncomplete,
    NoFinalDecision,
    ComplianceDisabledForRejected,
}

impl DenialReason {
    pub const fn message(self) -> &'static str {
        match self {
            Self::DocumentsIncomplete => "documents incomplete",
            Self::NoFinalDecision => "no final decision yet",
            Self::ComplianceDisabledForRejected => {
                "compliance disabled for rejected applications"
            }
        }
    }
}

/// Verdict for navigating to a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(DenialReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

impl Serialize for AccessDecision {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.reason() {
            None => {
                let mut state = serializer.serialize_struct("AccessDecision", 1)?;
                state.serialize_field("allowed", &true)?;
                state.end()
            }
            Some(reason) => {
                let mut state = serializer.serialize_struct("AccessDecision", 2)?;
                state.serialize_field("allowed", &false)?;
                state.serialize_field("reason", reason.message())?;
                state.end()
            }
        }
    }
}

/// Decide whether `target` may be opened for this snapshot.
pub fn check_access(
    snapshot: &ApplicationSnapshot,
    completion: &StageCompletion,
    target: Stage,
) -> AccessDecision {
    match target {
        Stage::Application | Stage::DocumentUpload => AccessDecision::Allowed,
        Stage::Interview => require_documents(completion),
        Stage::Decision => require_decision(&snapshot.status, completion),
        Stage::ComplianceCheck => {
            if snapshot.status == ApplicationStatus::Rejected {
                return AccessDecision::Denied(DenialReason::ComplianceDisabledForRejected);
            }
            require_decision(&snapshot.status, completion)
        }
    }
}

fn require_decision(status: &ApplicationStatus, completion: &StageCompletion) -> AccessDecision {
    if !status.has_final_decision() {
        return AccessDecision::Denied(DenialReason::NoFinalDecision);
    }
    require_documents(completion)
}

fn require_documents(completion: &StageCompletion) -> AccessDecision {
    if completion.documents_complete() {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied(DenialReason::DocumentsIncomplete)
    }
}
