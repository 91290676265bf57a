//! Prescription-safety consultation.
//!
//! Single-shot workflow on the same action endpoint as registration,
//! differentiated by the presence of the target patient id. The returned
//! safety verdict drives the banner; a clinical (`emr`) outcome
//! additionally offers to open the patient's file.

use super::{records, CommandError, ConfirmDecision};
use crate::api::{ActionOutcome, EmrApi};
use crate::core_state::CoreState;

/// Result of a completed consultation dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsultationOutcome {
    /// `Some(id)` when the endpoint recorded a clinical entry and the
    /// clinician should be asked whether to open that patient's file.
    /// Resolve with [`resolve_file_offer`].
    pub file_offer: Option<i64>,
}

/// Run a prescription-safety check.
///
/// Both inputs must be non-empty and the patient id numeric; otherwise a
/// validation notice is returned and nothing reaches the network. Any
/// successful response replaces the displayed safety verdict with its
/// `safety` field, independent of the outcome tag.
pub async fn run(
    state: &CoreState,
    api: &dyn EmrApi,
    patient_id: &str,
    prescription: &str,
) -> Result<ConsultationOutcome, CommandError> {
    let id_input = patient_id.trim();
    let note = prescription.trim();
    if id_input.is_empty() || note.is_empty() {
        return Err(CommandError::Validation(
            "Enter Patient ID and Prescription.".to_string(),
        ));
    }
    let target: i64 = id_input.parse().map_err(|_| {
        CommandError::Validation("Patient ID must be a number.".to_string())
    })?;

    let token = state.require_token()?;
    let _busy = state
        .consultation_busy
        .try_begin()
        .ok_or(CommandError::Busy)?;
    let epoch = state.epoch();

    let response = match api.ai_action(&token, note, Some(target)).await {
        Ok(response) => response,
        Err(e) => {
            if !state.epoch_is_current(epoch) {
                return Err(CommandError::SessionEnded);
            }
            tracing::warn!(patient_id = target, error = %e, "consultation dispatch failed");
            return Err(CommandError::Transport(e));
        }
    };
    if !state.epoch_is_current(epoch) {
        tracing::debug!("discarding consultation response from an ended session");
        return Err(CommandError::SessionEnded);
    }

    let outcome = response.outcome();
    // The verdict replaces the banner whatever the tag was; an absent
    // safety field clears it.
    state.set_safety_result(response.safety)?;

    let file_offer = match outcome {
        ActionOutcome::EmrProcessed => Some(target),
        ActionOutcome::Enrolled { .. } | ActionOutcome::Unrecognized => None,
    };
    Ok(ConsultationOutcome { file_offer })
}

/// Resolve the "view the file now?" offer from a clinical outcome.
///
/// Declining is terminal and leaves the consultation view, with its safety
/// banner, untouched. Accepting opens the dossier and the router moves to
/// the file view.
pub async fn resolve_file_offer(
    state: &CoreState,
    api: &dyn EmrApi,
    patient_id: i64,
    decision: ConfirmDecision,
) -> Result<(), CommandError> {
    match decision {
        ConfirmDecision::Declined => Ok(()),
        ConfirmDecision::Confirmed => records::open_file(state, api, patient_id).await,
    }
}
