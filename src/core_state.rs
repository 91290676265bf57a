//! Shared application state.
//!
//! `CoreState` is the single state container shared between the UI shell
//! and the command layer. Wrapped in `Arc` at startup. Uses `RwLock` for
//! data that is read on every render (directory, transcript, dossier) and
//! written only by the owning workflow.
//!
//! Execution is cooperative: commands run on one logical thread and
//! interleave only at await points. The locks exist for the `Arc` sharing,
//! not for contention.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use crate::chat::{ChatLog, ChatMessage};
use crate::models::{PatientFile, PatientSummary, SafetyResult};
use crate::router::View;
use crate::session::Session;

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("No patient file is loaded")]
    NoActiveFile,
    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════════════════════
// Busy flags
// ═══════════════════════════════════════════════════════════

/// Per-workflow submission guard.
///
/// Blocks a new submission while one is outstanding. The guard clears the
/// flag on drop, so every exit path — success, soft failure, transport
/// failure, panic — releases it. There is no cancellation: a stalled call
/// keeps its workflow busy until the transport gives up.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicBool);

impl BusyFlag {
    /// Claim the flag. Returns `None` if a submission is already in flight.
    pub fn try_begin(&self) -> Option<BusyGuard<'_>> {
        if self.0.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(BusyGuard(&self.0))
        }
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// RAII handle holding a [`BusyFlag`] claimed.
#[derive(Debug)]
pub struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    /// Active clinician session. `None` when logged out.
    session: RwLock<Option<Session>>,
    /// Session generation counter. Bumped on every login and logout so a
    /// response that completes against a stale generation is discarded
    /// instead of repopulating state after logout.
    epoch: AtomicU64,
    /// Currently rendered view. Only `navigate` writes this.
    view: RwLock<View>,
    /// Cached patient directory; replaced wholesale on refresh.
    directory: RwLock<Vec<PatientSummary>>,
    /// Active dossier. `View::File` is reachable only while this is set.
    active_file: RwLock<Option<PatientFile>>,
    /// Last consultation safety verdict, shown as the banner.
    safety: RwLock<Option<SafetyResult>>,
    /// Registration transcript.
    chat: RwLock<ChatLog>,
    /// Registration workflow submission guard.
    pub registration_busy: BusyFlag,
    /// Consultation workflow submission guard.
    pub consultation_busy: BusyFlag,
    /// Dossier open/delete submission guard.
    pub records_busy: BusyFlag,
}

impl CoreState {
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
            epoch: AtomicU64::new(0),
            view: RwLock::new(View::default()),
            directory: RwLock::new(Vec::new()),
            active_file: RwLock::new(None),
            safety: RwLock::new(None),
            chat: RwLock::new(ChatLog::new()),
            registration_busy: BusyFlag::default(),
            consultation_busy: BusyFlag::default(),
            records_busy: BusyFlag::default(),
        }
    }

    // ── Session ─────────────────────────────────────────────

    /// Snapshot of the active session, if any.
    pub fn session(&self) -> Result<Option<Session>, CoreError> {
        Ok(self
            .session
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Bearer token for an outbound request. Callers reach this only from
    /// authenticated views, so absence is a precondition violation.
    pub fn require_token(&self) -> Result<String, CoreError> {
        self.session
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(CoreError::NotAuthenticated)
    }

    /// Install a fresh session (login). Starts a new generation and resets
    /// navigation to the initial view.
    pub fn set_session(&self, session: Session) -> Result<(), CoreError> {
        {
            let mut guard = self.session.write().map_err(|_| CoreError::LockPoisoned)?;
            *guard = Some(session);
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.set_view(View::Register)?;
        tracing::info!("session opened");
        Ok(())
    }

    /// Clear the session (logout). This is the sole transition back to the
    /// unauthenticated gate. Cached directory/dossier/transcript data stays
    /// in memory but is unreachable until the next login; bumping the
    /// generation ensures no in-flight response can touch state again.
    pub fn clear_session(&self) {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut view) = self.view.write() {
            *view = View::Register;
        }
        tracing::info!("session closed");
    }

    /// Current session generation. Capture before dispatching a request and
    /// check with [`epoch_is_current`](Self::epoch_is_current) when the
    /// response arrives.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub fn epoch_is_current(&self, observed: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == observed
    }

    // ── Navigation ──────────────────────────────────────────

    pub fn current_view(&self) -> View {
        self.view.read().map(|v| *v).unwrap_or_default()
    }

    /// Switch the rendered view.
    ///
    /// `View::File` additionally requires a loaded dossier; without one the
    /// transition is refused so a ghost file screen can never render.
    pub fn navigate(&self, target: View) -> Result<(), CoreError> {
        if target == View::File && self.active_file()?.is_none() {
            return Err(CoreError::NoActiveFile);
        }
        self.set_view(target)
    }

    fn set_view(&self, target: View) -> Result<(), CoreError> {
        let mut view = self.view.write().map_err(|_| CoreError::LockPoisoned)?;
        tracing::debug!(from = ?*view, to = ?target, "navigate");
        *view = target;
        Ok(())
    }

    // ── Directory cache ─────────────────────────────────────

    pub fn directory(&self) -> Result<Vec<PatientSummary>, CoreError> {
        Ok(self
            .directory
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .clone())
    }

    /// Replace the cached directory wholesale. Stale rows are discarded,
    /// never merged.
    pub fn replace_directory(&self, patients: Vec<PatientSummary>) -> Result<(), CoreError> {
        let mut guard = self.directory.write().map_err(|_| CoreError::LockPoisoned)?;
        *guard = patients;
        Ok(())
    }

    // ── Active dossier ──────────────────────────────────────

    pub fn active_file(&self) -> Result<Option<PatientFile>, CoreError> {
        Ok(self
            .active_file
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .clone())
    }

    pub fn active_file_id(&self) -> Result<Option<i64>, CoreError> {
        Ok(self
            .active_file
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .as_ref()
            .map(PatientFile::id))
    }

    pub fn set_active_file(&self, file: PatientFile) -> Result<(), CoreError> {
        let mut guard = self
            .active_file
            .write()
            .map_err(|_| CoreError::LockPoisoned)?;
        *guard = Some(file);
        Ok(())
    }

    // ── Safety banner ───────────────────────────────────────

    pub fn safety_result(&self) -> Result<Option<SafetyResult>, CoreError> {
        Ok(self
            .safety
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .clone())
    }

    /// Replace the displayed safety verdict. `None` clears the banner —
    /// the consultation response carries no `safety` field on non-clinical
    /// outcomes.
    pub fn set_safety_result(&self, result: Option<SafetyResult>) -> Result<(), CoreError> {
        let mut guard = self.safety.write().map_err(|_| CoreError::LockPoisoned)?;
        *guard = result;
        Ok(())
    }

    // ── Chat transcript ─────────────────────────────────────

    pub fn chat_messages(&self) -> Result<Vec<ChatMessage>, CoreError> {
        Ok(self
            .chat
            .read()
            .map_err(|_| CoreError::LockPoisoned)?
            .messages()
            .to_vec())
    }

    pub fn chat_len(&self) -> Result<usize, CoreError> {
        Ok(self.chat.read().map_err(|_| CoreError::LockPoisoned)?.len())
    }

    pub fn push_user_message(&self, text: &str) -> Result<(), CoreError> {
        self.chat
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .push_user(text);
        Ok(())
    }

    pub fn push_bot_message(&self, text: &str) -> Result<(), CoreError> {
        self.chat
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .push_bot(text);
        Ok(())
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
