//! Scripted in-process backend for command tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ActionResponse, ApiError, EmrApi};
use crate::models::{PatientFileResponse, PatientSummary};
use crate::session::Session;

type Hook = Box<dyn Fn() + Send + Sync>;

/// Scripted [`EmrApi`] implementation.
///
/// Responses are fixed per endpoint; `None` scripts the failure mode noted
/// on each field. Every call is recorded so tests can assert on what was
/// (and was not) dispatched.
#[derive(Default)]
pub struct MockApi {
    /// `Some` ⇒ login succeeds; `None` ⇒ HTTP 400 (invalid credentials).
    pub login_session: Option<Session>,
    /// `Some` ⇒ directory fetch succeeds; `None` ⇒ connection error.
    pub patients: Option<Vec<PatientSummary>>,
    /// Dossiers by patient id; missing id ⇒ HTTP 404.
    pub files: HashMap<i64, PatientFileResponse>,
    /// `Some` ⇒ action succeeds; `None` ⇒ connection error.
    pub action: Option<ActionResponse>,
    /// `false` ⇒ deletion fails with HTTP 400.
    pub delete_ok: bool,
    /// Invoked just before each response is produced. Lets a test flip
    /// state mid-flight (e.g. log out while a request is outstanding).
    pub before_respond: Option<Hook>,

    pub calls: Mutex<Vec<String>>,
    pub tokens: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<(String, Option<i64>)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            delete_ok: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name || c.starts_with(&format!("{name}:")))
            .count()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<(String, Option<i64>)> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, call: String, token: Option<&str>) {
        self.calls.lock().unwrap().push(call);
        if let Some(t) = token {
            self.tokens.lock().unwrap().push(t.to_string());
        }
        if let Some(hook) = &self.before_respond {
            hook();
        }
    }
}

#[async_trait]
impl EmrApi for MockApi {
    async fn login(&self, username: &str, _password: &str) -> Result<Session, ApiError> {
        self.record(format!("login:{username}"), None);
        self.login_session.clone().ok_or(ApiError::Status {
            status: 400,
            body: r#"{"error": "Invalid Credentials"}"#.to_string(),
        })
    }

    async fn list_patients(&self, token: &str) -> Result<Vec<PatientSummary>, ApiError> {
        self.record("list_patients".to_string(), Some(token));
        self.patients
            .clone()
            .ok_or_else(|| ApiError::Connection("mock".to_string()))
    }

    async fn fetch_file(
        &self,
        token: &str,
        patient_id: i64,
    ) -> Result<PatientFileResponse, ApiError> {
        self.record(format!("fetch_file:{patient_id}"), Some(token));
        self.files.get(&patient_id).cloned().ok_or(ApiError::Status {
            status: 404,
            body: String::new(),
        })
    }

    async fn delete_file(&self, token: &str, patient_id: i64) -> Result<(), ApiError> {
        self.record(format!("delete_file:{patient_id}"), Some(token));
        if self.delete_ok {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: 400,
                body: String::new(),
            })
        }
    }

    async fn ai_action(
        &self,
        token: &str,
        prompt: &str,
        patient_id: Option<i64>,
    ) -> Result<ActionResponse, ApiError> {
        self.record("ai_action".to_string(), Some(token));
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), patient_id));
        self.action
            .clone()
            .ok_or_else(|| ApiError::Connection("mock".to_string()))
    }
}
