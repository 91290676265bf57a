//! Patient directory cache refresh.

use crate::api::EmrApi;
use crate::core_state::CoreState;

/// Refresh the cached patient directory.
///
/// Success replaces the cache wholesale. Failure is logged and swallowed,
/// leaving the previous cache untouched — a stale directory is the one
/// degradation this client tolerates silently, unlike every other failure
/// path. Callers never see an error from here.
pub async fn refresh(state: &CoreState, api: &dyn EmrApi) {
    let token = match state.require_token() {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "directory refresh without a session");
            return;
        }
    };

    let epoch = state.epoch();
    match api.list_patients(&token).await {
        Ok(patients) => {
            if !state.epoch_is_current(epoch) {
                tracing::debug!("discarding directory response from an ended session");
                return;
            }
            let count = patients.len();
            if state.replace_directory(patients).is_ok() {
                tracing::debug!(count, "directory refreshed");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "directory refresh failed, keeping cached list");
        }
    }
}
