//! Client for the evaluation backend's JSON API.
//!
//! The backend owns file storage, matching and agent evaluation; this service
//! reads its results and forwards deletes. Callers depend on the
//! `MatchBackend` trait, never on HTTP.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod models;

use models::{EntityDetail, FileEntry, MatchDetail};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Operations consumed from the evaluation backend.
///
/// Carried in `AppState` and the selection controller as `Arc<dyn MatchBackend>`.
#[async_trait]
pub trait MatchBackend: Send + Sync {
    async fn list_files(&self) -> Result<Vec<FileEntry>, BackendError>;

    /// Applicant ids matched to a job, in backend order.
    async fn matched_applicants(&self, job_id: &str) -> Result<Vec<String>, BackendError>;

    async fn entity_detail(&self, id: &str) -> Result<EntityDetail, BackendError>;

    async fn match_detail(
        &self,
        applicant_id: &str,
        job_id: &str,
    ) -> Result<MatchDetail, BackendError>;

    async fn delete_file(&self, id: &str, path: &str) -> Result<(), BackendError>;
}

/// HTTP implementation against the backend's JSON API.
/// Idempotent reads retry on transport errors and 5xx with exponential backoff.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    max_retries: u32,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration, max_retries: u32) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid backend URL '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL '{base_url}' cannot be used as a base URL");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            max_retries: max_retries.max(1),
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GETs a JSON document. A 404 or an `{"error": ...}` body is `NotFound`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let mut last_error: Option<BackendError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 250ms, 500ms, 1s, ...
                let delay = Duration::from_millis(250 * (1 << (attempt - 1).min(6)));
                warn!(
                    "Backend call to {} failed (attempt {}), retrying after {}ms...",
                    url.path(),
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.get(url.clone()).query(query).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(BackendError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(BackendError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                let body = response.text().await.unwrap_or_default();
                return Err(BackendError::NotFound(error_message(&body)));
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(BackendError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let body: Value = response.json().await?;
            debug!("Backend call to {} succeeded", url.path());
            return decode(body);
        }

        Err(last_error.unwrap_or(BackendError::Api {
            status: 0,
            message: format!("no attempt made for {}", url.path()),
        }))
    }
}

#[async_trait]
impl MatchBackend for HttpBackend {
    async fn list_files(&self) -> Result<Vec<FileEntry>, BackendError> {
        self.get_json(self.endpoint(&["status"]), &[]).await
    }

    async fn matched_applicants(&self, job_id: &str) -> Result<Vec<String>, BackendError> {
        self.get_json(self.endpoint(&["matches", job_id]), &[]).await
    }

    async fn entity_detail(&self, id: &str) -> Result<EntityDetail, BackendError> {
        self.get_json(self.endpoint(&["details"]), &[("id", id)])
            .await
    }

    async fn match_detail(
        &self,
        applicant_id: &str,
        job_id: &str,
    ) -> Result<MatchDetail, BackendError> {
        self.get_json(
            self.endpoint(&["match_details"]),
            &[("applicant_id", applicant_id), ("job_id", job_id)],
        )
        .await
    }

    /// Deletes are sent once; the caller decides what a failure means.
    async fn delete_file(&self, id: &str, path: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.endpoint(&["delete"]))
            .query(&[("id", id), ("path", path)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        // The backend reports failures as `{"error": ...}` with a 200 status.
        if let Some(message) = embedded_error(&serde_json::from_str(&body).unwrap_or(Value::Null))
        {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Converts a successful JSON body, treating an embedded error object as not-found.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, BackendError> {
    if let Some(message) = embedded_error(&body) {
        return Err(BackendError::NotFound(message));
    }
    serde_json::from_value(body).map_err(BackendError::Decode)
}

fn embedded_error(body: &Value) -> Option<String> {
    let error = body.as_object()?.get("error")?;
    Some(match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| embedded_error(&v))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(1), 3).unwrap()
    }

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let b = backend("http://localhost:8000");
        assert_eq!(
            b.endpoint(&["matches", "j 1/2"]).as_str(),
            "http://localhost:8000/matches/j%201%2F2"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let b = backend("http://backend.internal/api/");
        assert_eq!(
            b.endpoint(&["status"]).as_str(),
            "http://backend.internal/api/status"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpBackend::new("not a url", Duration::from_secs(1), 1).is_err());
        assert!(HttpBackend::new("mailto:ops@example.com", Duration::from_secs(1), 1).is_err());
    }

    #[test]
    fn test_zero_retries_still_makes_one_attempt() {
        let b = HttpBackend::new("http://localhost:8000", Duration::from_secs(1), 0).unwrap();
        assert_eq!(b.max_retries, 1);
    }

    #[test]
    fn test_decode_embedded_error_is_not_found() {
        let result: Result<MatchDetail, _> = decode(json!({"error": "No match found"}));
        match result {
            Err(BackendError::NotFound(msg)) => assert_eq!(msg, "No match found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_plain_list() {
        let ids: Vec<String> = decode(json!(["a_1", "a_2"])).unwrap();
        assert_eq!(ids, vec!["a_1", "a_2"]);
    }

    #[test]
    fn test_decode_shape_mismatch_is_decode_error() {
        let result: Result<Vec<String>, _> = decode(json!({"unexpected": true}));
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(error_message(r#"{"error": "boom"}"#), "boom");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
