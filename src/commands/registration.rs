//! Conversational patient registration.
//!
//! The registration view has no structured form: the clinician types free
//! text, the external action endpoint does all the parsing, and this
//! workflow only interprets the three-way outcome tag. The transcript is
//! the durable audit trail of the attempt.

use super::{directory, records, CommandError};
use crate::api::{ActionOutcome, EmrApi};
use crate::chat;
use crate::core_state::CoreState;

/// How a registration turn ended. Every completed turn also appended the
/// matching bot message to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty input: no dispatch, no transcript change.
    Ignored,
    /// Patient enrolled; the dossier was opened and the router moved to
    /// the file view.
    Enrolled { patient_id: i64 },
    /// The endpoint answered with a non-enroll or unknown tag. Recoverable
    /// by rephrasing.
    NotUnderstood,
    /// The endpoint could not be reached. Recoverable by retrying.
    ConnectionFailed,
}

/// Run one registration turn.
///
/// Protocol: ignore empty input; append the user message optimistically;
/// hold the workflow busy until the turn completes (the guard clears on
/// every exit path); dispatch the raw text; interpret the outcome tag.
pub async fn submit(
    state: &CoreState,
    api: &dyn EmrApi,
    input: &str,
) -> Result<TurnOutcome, CommandError> {
    let prompt = input.trim();
    if prompt.is_empty() {
        return Ok(TurnOutcome::Ignored);
    }

    let token = state.require_token()?;
    let _busy = state
        .registration_busy
        .try_begin()
        .ok_or(CommandError::Busy)?;
    let epoch = state.epoch();

    state.push_user_message(prompt)?;

    let result = api.ai_action(&token, prompt, None).await;
    if !state.epoch_is_current(epoch) {
        tracing::debug!("discarding registration response from an ended session");
        return Err(CommandError::SessionEnded);
    }

    match result {
        Ok(response) => match response.outcome() {
            ActionOutcome::Enrolled { patient_id } => {
                state.push_bot_message(&format!(
                    "Success! ID: {patient_id}. Opening file..."
                ))?;
                directory::refresh(state, api).await;
                records::open_file(state, api, patient_id).await?;
                Ok(TurnOutcome::Enrolled { patient_id })
            }
            ActionOutcome::EmrProcessed | ActionOutcome::Unrecognized => {
                state.push_bot_message(chat::NOT_UNDERSTOOD)?;
                Ok(TurnOutcome::NotUnderstood)
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "registration dispatch failed");
            state.push_bot_message(chat::CONNECTION_ERROR)?;
            Ok(TurnOutcome::ConnectionFailed)
        }
    }
}
