//! Login and logout.

use super::{directory, CommandError};
use crate::api::EmrApi;
use crate::core_state::CoreState;
use crate::session::Session;

/// Submit credentials. One attempt per submission.
///
/// On success the session is installed and the directory cache is primed;
/// on failure nothing changes and the caller shows a blocking notice.
pub async fn login(
    state: &CoreState,
    api: &dyn EmrApi,
    username: &str,
    password: &str,
) -> Result<Session, CommandError> {
    let session = match api.login(username, password).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(username, error = %e, "login rejected");
            return Err(CommandError::AuthFailed);
        }
    };

    state.set_session(session.clone())?;
    directory::refresh(state, api).await;
    Ok(session)
}

/// Clear the session synchronously and return to the login gate.
pub fn logout(state: &CoreState) {
    state.clear_session();
}
