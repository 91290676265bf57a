//! Reqwest-backed implementation of [`EmrApi`].

use async_trait::async_trait;
use serde::Serialize;

use super::{ActionResponse, ApiError, EmrApi};
use crate::config;
use crate::models::{PatientFileResponse, PatientSummary};
use crate::session::{self, Session};

/// HTTP gateway to the Dorra EMR backend.
pub struct HttpEmrApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEmrApi {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Gateway pointed at the configured backend address.
    pub fn from_config() -> Self {
        Self::new(&config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::HttpClient(e.to_string())
        }
    }

    /// Reject non-2xx responses, keeping the body for diagnostics.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Request body for `POST /login/`.
#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Request body for `POST /ai/action/`. `patient_id` is present only for
/// consultations; its presence is what differentiates the two workflows
/// on the shared endpoint.
#[derive(Serialize)]
struct ActionRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient_id: Option<i64>,
}

#[async_trait]
impl EmrApi for HttpEmrApi {
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/login/", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e.to_string()))
    }

    async fn list_patients(&self, token: &str) -> Result<Vec<PatientSummary>, ApiError> {
        let url = format!("{}/patients/", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", session::authorization_value(token))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e.to_string()))
    }

    async fn fetch_file(
        &self,
        token: &str,
        patient_id: i64,
    ) -> Result<PatientFileResponse, ApiError> {
        let url = format!("{}/patients/{}/file/", self.base_url, patient_id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", session::authorization_value(token))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e.to_string()))
    }

    async fn delete_file(&self, token: &str, patient_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/patients/{}/file/", self.base_url, patient_id);
        let response = self
            .client
            .delete(&url)
            .header("Authorization", session::authorization_value(token))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response).await.map(|_| ())
    }

    async fn ai_action(
        &self,
        token: &str,
        prompt: &str,
        patient_id: Option<i64>,
    ) -> Result<ActionResponse, ApiError> {
        let url = format!("{}/ai/action/", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", session::authorization_value(token))
            .json(&ActionRequest { prompt, patient_id })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpEmrApi::new("http://127.0.0.1:8000/api/");
        assert_eq!(api.base_url(), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn login_body_matches_wire_shape() {
        let body = serde_json::to_value(LoginRequest {
            username: "drA",
            password: "x",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username": "drA", "password": "x"}));
    }

    #[test]
    fn registration_body_omits_patient_id() {
        let body = serde_json::to_value(ActionRequest {
            prompt: "Register Musa, Male, 45",
            patient_id: None,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"prompt": "Register Musa, Male, 45"})
        );
    }

    #[test]
    fn consultation_body_carries_patient_id() {
        let body = serde_json::to_value(ActionRequest {
            prompt: "Warfarin and Aspirin",
            patient_id: Some(222),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"prompt": "Warfarin and Aspirin", "patient_id": 222})
        );
    }
}
