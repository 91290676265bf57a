//! Patient dossier: open and guarded deletion.

use super::{directory, CommandError, ConfirmDecision};
use crate::api::EmrApi;
use crate::core_state::{CoreError, CoreState};
use crate::router::View;

/// Result of a deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The clinician declined the confirmation; nothing was sent.
    Cancelled,
    /// The record is gone and the router moved back to the directory.
    Deleted,
}

/// Fetch a dossier and make it the active file.
///
/// A payload without a profile is an unusable file: nothing is stored and
/// the view does not change, so the caller surfaces a blocking notice
/// instead of rendering a ghost dossier. A valid payload replaces the
/// active file and the router advances to [`View::File`].
pub async fn open_file(
    state: &CoreState,
    api: &dyn EmrApi,
    patient_id: i64,
) -> Result<(), CommandError> {
    let token = state.require_token()?;
    let _busy = state
        .records_busy
        .try_begin()
        .ok_or(CommandError::Busy)?;
    let epoch = state.epoch();

    let response = match api.fetch_file(&token, patient_id).await {
        Ok(response) => response,
        Err(e) => {
            if !state.epoch_is_current(epoch) {
                return Err(CommandError::SessionEnded);
            }
            tracing::warn!(patient_id, error = %e, "failed to fetch dossier");
            return Err(CommandError::Transport(e));
        }
    };
    if !state.epoch_is_current(epoch) {
        return Err(CommandError::SessionEnded);
    }

    match response.into_validated() {
        Some(file) => {
            state.set_active_file(file)?;
            state.navigate(View::File)?;
            Ok(())
        }
        None => {
            tracing::warn!(patient_id, "dossier response has no profile");
            Err(CommandError::FileUnavailable)
        }
    }
}

/// Delete the active dossier's record.
///
/// The confirmation decision gates the network call entirely: a declined
/// decision performs no request and leaves the dossier displayed. On
/// success the directory is refreshed and the router returns to it; on
/// failure the dossier stays and only a notice is shown.
pub async fn delete_file(
    state: &CoreState,
    api: &dyn EmrApi,
    decision: ConfirmDecision,
) -> Result<DeleteOutcome, CommandError> {
    if decision == ConfirmDecision::Declined {
        return Ok(DeleteOutcome::Cancelled);
    }

    let patient_id = state.active_file_id()?.ok_or(CoreError::NoActiveFile)?;
    let token = state.require_token()?;
    let _busy = state
        .records_busy
        .try_begin()
        .ok_or(CommandError::Busy)?;
    let epoch = state.epoch();

    match api.delete_file(&token, patient_id).await {
        Ok(()) => {
            if !state.epoch_is_current(epoch) {
                return Err(CommandError::SessionEnded);
            }
            tracing::info!(patient_id, "patient record deleted");
            directory::refresh(state, api).await;
            state.navigate(View::Directory)?;
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) => {
            if !state.epoch_is_current(epoch) {
                return Err(CommandError::SessionEnded);
            }
            tracing::warn!(patient_id, error = %e, "delete failed");
            Err(CommandError::Transport(e))
        }
    }
}
