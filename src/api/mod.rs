//! Backend gateway.
//!
//! [`EmrApi`] is the seam between the workflows and the Dorra EMR backend:
//! commands depend on the trait, the shell wires in [`HttpEmrApi`], and
//! tests script an in-process mock. The wire shapes here mirror the
//! backend's REST endpoints exactly.

pub mod client;
#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{PatientFileResponse, PatientSummary, SafetyResult};
use crate::session::Session;

pub use client::HttpEmrApi;

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Transport and protocol errors from the backend gateway.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach EMR backend at {0}")]
    Connection(String),
    #[error("Request timed out")]
    Timeout,
    #[error("EMR backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Parsing(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

// ═══════════════════════════════════════════════════════════
// Action endpoint response
// ═══════════════════════════════════════════════════════════

/// Raw response of `POST /ai/action/`.
///
/// The endpoint is duck-typed on the backend side: `type` selects the
/// variant, `id` accompanies `enroll`, `safety` accompanies clinical
/// outcomes. [`outcome`](ActionResponse::outcome) converts this into a
/// real sum type; `safety` stays separate because it applies regardless
/// of the tag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub safety: Option<SafetyResult>,
}

/// Interpreted outcome of an AI action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A new patient was enrolled under this id.
    Enrolled { patient_id: i64 },
    /// A clinical record was created for an existing patient.
    EmrProcessed,
    /// The endpoint did not understand the prompt, or answered with a
    /// tag this client does not know. Handled, not a fallthrough.
    Unrecognized,
}

impl ActionResponse {
    pub fn outcome(&self) -> ActionOutcome {
        match self.kind.as_deref() {
            Some("enroll") => match self.id {
                Some(patient_id) => ActionOutcome::Enrolled { patient_id },
                // An enroll tag without an id is unusable.
                None => ActionOutcome::Unrecognized,
            },
            Some("emr") => ActionOutcome::EmrProcessed,
            Some(_) | None => ActionOutcome::Unrecognized,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Gateway trait
// ═══════════════════════════════════════════════════════════

/// Async gateway to the Dorra EMR backend.
///
/// All methods except `login` require the bearer token of an active
/// session; the router guarantees callers hold one.
#[async_trait]
pub trait EmrApi: Send + Sync {
    /// `POST /login/` — exchange credentials for a session.
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError>;

    /// `GET /patients/` — full patient summary list.
    async fn list_patients(&self, token: &str) -> Result<Vec<PatientSummary>, ApiError>;

    /// `GET /patients/{id}/file/` — raw dossier payload.
    async fn fetch_file(&self, token: &str, patient_id: i64)
        -> Result<PatientFileResponse, ApiError>;

    /// `DELETE /patients/{id}/file/` — irrevocable record deletion.
    async fn delete_file(&self, token: &str, patient_id: i64) -> Result<(), ApiError>;

    /// `POST /ai/action/` — free-text prompt, optionally targeting an
    /// existing patient (consultation).
    async fn ai_action(
        &self,
        token: &str,
        prompt: &str,
        patient_id: Option<i64>,
    ) -> Result<ActionResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enroll_response_parses_to_enrolled() {
        let resp: ActionResponse =
            serde_json::from_str(r#"{"type": "enroll", "id": 222}"#).unwrap();
        assert_eq!(resp.outcome(), ActionOutcome::Enrolled { patient_id: 222 });
        assert!(resp.safety.is_none());
    }

    #[test]
    fn enroll_without_id_is_unrecognized() {
        let resp: ActionResponse = serde_json::from_str(r#"{"type": "enroll"}"#).unwrap();
        assert_eq!(resp.outcome(), ActionOutcome::Unrecognized);
    }

    #[test]
    fn emr_response_carries_safety() {
        let resp: ActionResponse = serde_json::from_str(
            r#"{"type": "emr", "safety": {"risk": "HIGH", "alerts": [
                {"drug_a": "Warfarin", "drug_b": "Aspirin", "reason": "bleeding risk"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(resp.outcome(), ActionOutcome::EmrProcessed);
        let safety = resp.safety.unwrap();
        assert!(safety.is_high());
        assert_eq!(safety.rendered_alerts().len(), 1);
    }

    #[test]
    fn unknown_tag_is_a_handled_variant() {
        let resp: ActionResponse =
            serde_json::from_str(r#"{"type": "smalltalk"}"#).unwrap();
        assert_eq!(resp.outcome(), ActionOutcome::Unrecognized);
    }

    #[test]
    fn missing_tag_is_a_handled_variant() {
        let resp: ActionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.outcome(), ActionOutcome::Unrecognized);
    }

    #[test]
    fn safety_applies_independent_of_tag() {
        // A response with safety but an unknown tag still exposes it.
        let resp: ActionResponse = serde_json::from_str(
            r#"{"type": "audit", "safety": {"risk": "LOW", "alerts": []}}"#,
        )
        .unwrap();
        assert_eq!(resp.outcome(), ActionOutcome::Unrecognized);
        assert!(resp.safety.is_some());
    }
}
