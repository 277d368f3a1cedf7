//! Deserialization of the fetched application payload.
//!
//! The fetch layer hands over loosely shaped JSON: arrays may be missing or `null`, documents
//! arrive either as bare type names or as attachment records, and identifiers are sometimes
//! numeric. Everything is normalized here so the engine only ever sees an
//! [`ApplicationSnapshot`].

use serde::Deserialize;

use super::domain::{
    ApplicationSnapshot, ApplicationStatus, ComplianceState, ComplianceStatusEntry,
    ComplianceUpdate,
};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("application payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Document type names or compliance refs; upstream mixes strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Text(String),
    Numeric(i64),
}

impl Identifier {
    fn into_string(self) -> String {
        match self {
            Identifier::Text(value) => value,
            Identifier::Numeric(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DocumentPayload {
    Identifier(Identifier),
    Attachment {
        #[serde(alias = "type", alias = "name")]
        document_type: Identifier,
    },
}

impl DocumentPayload {
    fn document_type(self) -> String {
        match self {
            DocumentPayload::Identifier(identifier) => identifier.into_string(),
            DocumentPayload::Attachment { document_type } => document_type.into_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComplianceStatusPayload {
    #[serde(alias = "compliance_item", alias = "item")]
    pub item_ref: Identifier,
    #[serde(default)]
    pub state: Option<String>,
}

impl ComplianceStatusPayload {
    fn into_entry(self) -> ComplianceStatusEntry {
        let state = self
            .state
            .map(ComplianceState::from)
            .unwrap_or(ComplianceState::Pending);
        ComplianceStatusEntry::new(self.item_ref.into_string(), state)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobApplicationPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub documents: Option<Vec<DocumentPayload>>,
    #[serde(default)]
    pub compliance_status: Option<Vec<ComplianceStatusPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobRequisitionPayload {
    #[serde(default)]
    pub documents_required: Option<Vec<Identifier>>,
    #[serde(default)]
    pub compliance_checklist: Option<Vec<Identifier>>,
}

/// Application plus requisition, as one fetch returns them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardPayload {
    #[serde(default)]
    pub job_application: Option<JobApplicationPayload>,
    #[serde(default)]
    pub job_requisition: Option<JobRequisitionPayload>,
    #[serde(default)]
    pub schedule_count: Option<u64>,
    #[serde(default)]
    pub schedules: Option<Vec<serde_json::Value>>,
}

impl DashboardPayload {
    pub fn from_json(raw: &str) -> Result<Self, IntakeError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn has_interview_schedule(&self) -> bool {
        self.schedule_count.unwrap_or(0) > 0
            || self
                .schedules
                .as_ref()
                .is_some_and(|schedules| !schedules.is_empty())
    }

    pub fn into_snapshot(self) -> ApplicationSnapshot {
        let scheduled = self.has_interview_schedule();
        let application = self.job_application.unwrap_or_default();
        let requisition = self.job_requisition.unwrap_or_default();

        let status = ApplicationStatus::from(application.status.unwrap_or_default());
        let uploaded = application
            .documents
            .unwrap_or_default()
            .into_iter()
            .map(DocumentPayload::document_type);
        let compliance_status = application
            .compliance_status
            .unwrap_or_default()
            .into_iter()
            .map(ComplianceStatusPayload::into_entry)
            .collect();
        let required = requisition
            .documents_required
            .unwrap_or_default()
            .into_iter()
            .map(Identifier::into_string);
        let checklist = requisition
            .compliance_checklist
            .unwrap_or_default()
            .into_iter()
            .map(Identifier::into_string);

        ApplicationSnapshot::builder(status)
            .documents_required(required)
            .documents_uploaded(uploaded)
            .compliance_checklist(checklist)
            .compliance_status(compliance_status)
            .interview_scheduled(scheduled)
            .build()
    }
}

impl ApplicationSnapshot {
    /// Parse the raw fetch payload straight into a snapshot.
    pub fn from_json(raw: &str) -> Result<Self, IntakeError> {
        DashboardPayload::from_json(raw).map(DashboardPayload::into_snapshot)
    }
}

/// Partial payload sent by the compliance collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceUpdatePayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub compliance_status: Option<Vec<ComplianceStatusPayload>>,
}

impl ComplianceUpdatePayload {
    pub fn from_json(raw: &str) -> Result<Self, IntakeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_update(self) -> ComplianceUpdate {
        ComplianceUpdate {
            status: self.status.map(ApplicationStatus::from),
            compliance_status: self.compliance_status.map(|entries| {
                entries
                    .into_iter()
                    .map(ComplianceStatusPayload::into_entry)
                    .collect()
            }),
        }
    }
}
