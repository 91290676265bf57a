use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::safety::DrugConflict;

/// One row of the patient directory, as returned by `GET /patients/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
}

impl PatientSummary {
    /// Full name as shown in the directory table and file header.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A single encounter on the dossier timeline.
///
/// The backend aggregates encounters from the upstream EMR, so fields are
/// loosely populated: either `summary` or `note` may carry the text, and
/// `drug_interactions` is present only on encounters that raised an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub drug_interactions: Vec<DrugConflict>,
}

impl TimelineEntry {
    /// Text shown on the timeline card: `summary`, falling back to `note`,
    /// falling back to a generic label.
    pub fn display_text(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.note.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("Consultation Recorded")
    }

    /// Date label for the timeline card, or a dash when the backend
    /// omitted the timestamp.
    pub fn display_date(&self) -> String {
        match self.created_at {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => "—".to_string(),
        }
    }

    /// Whether this encounter carries a historical safety alert.
    pub fn has_safety_alert(&self) -> bool {
        !self.drug_interactions.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
}

/// Raw dossier payload from `GET /patients/{id}/file/`.
///
/// The backend composes this from several upstream calls, and a partial
/// failure can yield a body with no `profile`. Such a response is not an
/// empty dossier — it is an unusable one, so validation happens before
/// anything is stored or displayed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientFileResponse {
    #[serde(default)]
    pub profile: Option<PatientSummary>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub medications: Vec<Medication>,
}

impl PatientFileResponse {
    /// Promote the raw payload to a displayable dossier.
    ///
    /// Returns `None` when `profile` is missing — the caller must treat
    /// that as "file not found", never as an empty file.
    pub fn into_validated(self) -> Option<PatientFile> {
        let profile = self.profile?;
        Some(PatientFile {
            profile,
            timeline: self.timeline,
            medications: self.medications,
        })
    }
}

/// A validated, displayable patient dossier. `profile` is always present.
#[derive(Debug, Clone, Serialize)]
pub struct PatientFile {
    pub profile: PatientSummary,
    pub timeline: Vec<TimelineEntry>,
    pub medications: Vec<Medication>,
}

impl PatientFile {
    pub fn id(&self) -> i64 {
        self.profile.id
    }
}
