//! Navigation state machine.
//!
//! Exactly one view is rendered at a time. The view value lives in
//! [`CoreState`](crate::core_state::CoreState) and only its `navigate`
//! method may change it; workflows request transitions, they never hold
//! navigation state of their own.

use serde::{Deserialize, Serialize};

/// The four navigable sections of the workstation.
///
/// Pre-authentication is not a view: while no session exists the shell
/// renders the login gate and none of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Conversational patient registration. Initial view after login.
    #[default]
    Register,
    /// Cached patient directory table.
    Directory,
    /// Prescription-safety consultation form.
    Consult,
    /// Active patient dossier. Requires a loaded file — see
    /// [`CoreState::navigate`](crate::core_state::CoreState::navigate).
    File,
}
