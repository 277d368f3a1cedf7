use std::fmt;

use serde::{Deserialize, Serialize};

/// Status reported by the intake system for a job application.
///
/// Upstream sends bare strings; anything outside the known set is kept verbatim in
/// [`ApplicationStatus::Unknown`] and treated as "in progress" by every rule table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Applied,
    DocumentsPending,
    InterviewScheduled,
    Interviewed,
    Hired,
    Rejected,
    ComplianceCompleted,
    Onboarded,
    Unknown(String),
}

impl ApplicationStatus {
    /// Case-sensitive parse; `"Hired"` is not `hired`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "applied" => Self::Applied,
            "documents_pending" => Self::DocumentsPending,
            "interview_scheduled" => Self::InterviewScheduled,
            "interviewed" => Self::Interviewed,
            "hired" => Self::Hired,
            "rejected" => Self::Rejected,
            "compliance_completed" => Self::ComplianceCompleted,
            "onboarded" => Self::Onboarded,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Applied => "applied",
            Self::DocumentsPending => "documents_pending",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Interviewed => "interviewed",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::ComplianceCompleted => "compliance_completed",
            Self::Onboarded => "onboarded",
            Self::Unknown(raw) => raw,
        }
    }

    /// `compliance_completed` or `onboarded`.
    pub fn is_compliance_finished(&self) -> bool {
        matches!(self, Self::ComplianceCompleted | Self::Onboarded)
    }

    /// A hire/reject decision has been recorded, possibly followed by compliance.
    pub fn has_final_decision(&self) -> bool {
        matches!(
            self,
            Self::Hired | Self::Rejected | Self::ComplianceCompleted | Self::Onboarded
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        match value {
            ApplicationStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a single compliance item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplianceState {
    Pending,
    Accepted,
    Rejected,
    Unknown(String),
}

impl ComplianceState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<String> for ComplianceState {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ComplianceState> for String {
    fn from(value: ComplianceState) -> Self {
        match value {
            ComplianceState::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatusEntry {
    pub item_ref: String,
    pub state: ComplianceState,
}

impl ComplianceStatusEntry {
    pub fn new(item_ref: impl Into<String>, state: ComplianceState) -> Self {
        Self {
            item_ref: item_ref.into(),
            state,
        }
    }

    pub fn accepted(item_ref: impl Into<String>) -> Self {
        Self::new(item_ref, ComplianceState::Accepted)
    }
}

/// Read model of one application and its requisition, as fetched for a single dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSnapshot {
    pub status: ApplicationStatus,
    pub documents_required: Vec<String>,
    pub documents_uploaded: Vec<String>,
    pub compliance_checklist: Vec<String>,
    pub compliance_status: Vec<ComplianceStatusEntry>,
    pub has_interview_schedule: bool,
}

impl ApplicationSnapshot {
    pub fn builder(status: ApplicationStatus) -> SnapshotBuilder {
        SnapshotBuilder::new(status)
    }

    /// Number of compliance entries currently marked accepted.
    pub fn accepted_compliance_items(&self) -> usize {
        self.compliance_status
            .iter()
            .filter(|entry| entry.state.is_accepted())
            .count()
    }

    /// Overlay a compliance update, producing the snapshot that replaces this one.
    pub fn with_compliance_update(&self, update: &ComplianceUpdate) -> ApplicationSnapshot {
        let mut next = self.clone();
        if let Some(status) = &update.status {
            next.status = status.clone();
        }
        if let Some(entries) = &update.compliance_status {
            next.compliance_status = unique_entries(entries.iter().cloned());
        }
        next
    }
}

/// Assembles snapshots; identifier lists and compliance entries are kept as ordered sets.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: ApplicationSnapshot,
}

impl SnapshotBuilder {
    fn new(status: ApplicationStatus) -> Self {
        Self {
            snapshot: ApplicationSnapshot {
                status,
                documents_required: Vec::new(),
                documents_uploaded: Vec::new(),
                compliance_checklist: Vec::new(),
                compliance_status: Vec::new(),
                has_interview_schedule: false,
            },
        }
    }

    pub fn documents_required<I, S>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.snapshot.documents_required = ordered_set(documents);
        self
    }

    pub fn documents_uploaded<I, S>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.snapshot.documents_uploaded = ordered_set(documents);
        self
    }

    pub fn compliance_checklist<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.snapshot.compliance_checklist = ordered_set(items);
        self
    }

    pub fn compliance_status(mut self, entries: Vec<ComplianceStatusEntry>) -> Self {
        self.snapshot.compliance_status = unique_entries(entries);
        self
    }

    pub fn interview_scheduled(mut self, scheduled: bool) -> Self {
        self.snapshot.has_interview_schedule = scheduled;
        self
    }

    pub fn build(self) -> ApplicationSnapshot {
        self.snapshot
    }
}

fn ordered_set<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.into();
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// One entry per `item_ref`; the first report for an item wins.
fn unique_entries<I>(entries: I) -> Vec<ComplianceStatusEntry>
where
    I: IntoIterator<Item = ComplianceStatusEntry>,
{
    let mut out: Vec<ComplianceStatusEntry> = Vec::new();
    for entry in entries {
        if !out.iter().any(|seen| seen.item_ref == entry.item_ref) {
            out.push(entry);
        }
    }
    out
}

/// Fields the compliance collaborator may report after the initial fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_status: Option<Vec<ComplianceStatusEntry>>,
}

/// The five dashboard stages, numbered as the applicant sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    Application = 1,
    DocumentUpload = 2,
    Interview = 3,
    Decision = 4,
    ComplianceCheck = 5,
}

impl Stage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Application,
            Self::DocumentUpload,
            Self::Interview,
            Self::Decision,
            Self::ComplianceCheck,
        ]
    }

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub(crate) const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::DocumentUpload => "Document Upload",
            Self::Interview => "Interview",
            Self::Decision => "Decision",
            Self::ComplianceCheck => "Compliance Check",
        }
    }

    /// The stage immediately before this one, if any.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Application => None,
            Self::DocumentUpload => Some(Self::Application),
            Self::Interview => Some(Self::DocumentUpload),
            Self::Decision => Some(Self::Interview),
            Self::ComplianceCheck => Some(Self::Decision),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stage must be between 1 and 5, got {0}")]
pub struct InvalidStage(pub i64);

impl TryFrom<u8> for Stage {
    type Error = InvalidStage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Application),
            2 => Ok(Self::DocumentUpload),
            3 => Ok(Self::Interview),
            4 => Ok(Self::Decision),
            5 => Ok(Self::ComplianceCheck),
            other => Err(InvalidStage(other.into())),
        }
    }
}

impl TryFrom<i64> for Stage {
    type Error = InvalidStage;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidStage(value))
            .and_then(<Stage as TryFrom<u8>>::try_from)
    }
}

impl From<Stage> for u8 {
    fn from(value: Stage) -> Self {
        value.number()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.number())
    }
}

/// Per-stage completion percentages in `[0, 100]`, indexed by [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StageCompletion([u8; 5]);

impl StageCompletion {
    pub const COMPLETE: u8 = 100;

    pub(crate) fn new(values: [u8; 5]) -> Self {
        Self(values.map(|value| value.min(Self::COMPLETE)))
    }

    pub fn get(&self, stage: Stage) -> u8 {
        self.0[stage.index()]
    }

    pub fn is_complete(&self, stage: Stage) -> bool {
        self.get(stage) == Self::COMPLETE
    }

    pub fn documents_complete(&self) -> bool {
        self.is_complete(Stage::DocumentUpload)
    }

    pub fn all_complete(&self) -> bool {
        self.0.iter().all(|value| *value == Self::COMPLETE)
    }

    /// First stage, in order, that is not yet at 100.
    pub fn first_incomplete(&self) -> Option<Stage> {
        Stage::ordered()
            .into_iter()
            .find(|stage| !self.is_complete(*stage))
    }

    pub fn as_array(&self) -> [u8; 5] {
        self.0
    }
}
