//! UI-facing operation layer.
//!
//! Each function here is one user-visible action: the shell calls it with
//! the shared [`CoreState`](crate::core_state::CoreState) and the backend
//! gateway, and renders the returned outcome or error. Errors map onto the
//! notice taxonomy: `Validation` never reaches the network, `AuthFailed` /
//! `FileUnavailable` / `Transport` are blocking notices, `SessionEnded`
//! marks a response quietly discarded after logout. Directory refresh
//! failures are deliberately not errors at all — see [`directory`].

pub mod auth;
pub mod consultation;
pub mod directory;
pub mod records;
pub mod registration;

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::core_state::CoreError;

/// Errors surfaced to the shell as user-facing notices.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Credentials rejected or login unreachable. One attempt per
    /// submission; no retry.
    #[error("Login failed")]
    AuthFailed,
    /// Input rejected before any network effect.
    #[error("{0}")]
    Validation(String),
    /// Dossier response missing its profile — empty or corrupt file.
    #[error("File is empty or corrupt")]
    FileUnavailable,
    /// The workflow already has a submission in flight.
    #[error("Another request is still in progress")]
    Busy,
    /// The session ended while the request was outstanding; the response
    /// was discarded without touching state.
    #[error("Session ended before the response arrived")]
    SessionEnded,
    #[error("Connection error: {0}")]
    Transport(#[from] ApiError),
    #[error(transparent)]
    State(#[from] CoreError),
}

/// Explicit decision value for irrevocable or navigating actions.
///
/// The shell collects the clinician's answer first and passes it in;
/// declining is a valid terminal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmDecision {
    Confirmed,
    Declined,
}
