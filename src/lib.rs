//! Client-side core of the Dorra EMR clinician workstation.
//!
//! This crate is the session, navigation, and workflow state machine
//! behind the workstation UI: it holds authentication state, routes
//! between the four views, drives the conversational registration chat
//! and the prescription-safety consultation, and reconciles backend
//! responses into navigation and data state. The visual shell renders
//! snapshots of [`CoreState`](core_state::CoreState) and invokes the
//! [`commands`] layer; everything network-side goes through the
//! [`api::EmrApi`] gateway.

pub mod api;
pub mod chat;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod models;
pub mod router;
pub mod session;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

pub use api::{EmrApi, HttpEmrApi};
pub use core_state::CoreState;
pub use router::View;
pub use session::Session;

/// Initialize tracing with the env filter, falling back to this crate's
/// default level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

/// Build the shared state and the HTTP gateway against the configured
/// backend address. The shell keeps both for the lifetime of the process.
pub fn bootstrap() -> (Arc<CoreState>, HttpEmrApi) {
    (Arc::new(CoreState::new()), HttpEmrApi::from_config())
}
