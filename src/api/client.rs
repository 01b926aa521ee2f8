use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;

use super::error::ApiError;
use super::types::{AnswerResponse, HealthStatus, QuestionRequest};

/// Default backend location when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Upper bound on the lifetime of any single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// The narrow surface the rest of the application sees of the backend.
///
/// The TUI only ever holds an `Arc<dyn LegalAdvisor>`, so the transport can be
/// replaced (or stubbed in tests) without touching presentation code.
#[async_trait]
pub trait LegalAdvisor: Send + Sync {
    /// Base URL requests are sent to. Used in user-facing messages.
    fn base_url(&self) -> &str;

    /// Submits a question and waits for the complete answer.
    async fn ask_legal_question(&self, question: &str) -> Result<AnswerResponse, ApiError>;

    /// Liveness probe. Collapses every failure to `false`.
    async fn check_server_health(&self) -> bool;

    /// Returns the backend's `GET /` info blob, unvalidated.
    async fn get_api_info(&self) -> Result<serde_json::Value, ApiError>;
}

/// HTTP implementation of [`LegalAdvisor`] backed by reqwest.
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ApiClient {
    /// # Arguments
    /// * `base_url` - Backend root, e.g. `http://localhost:8000`. A trailing slash is ignored.
    /// * `timeout` - Per-request deadline, normally [`DEFAULT_TIMEOUT`]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, err: &reqwest::Error) -> ApiError {
        let classified = ApiError::from_transport(err, &self.base_url);
        warn!("Request to {} failed: {} ({})", self.base_url, classified, err);
        classified
    }

    /// Reads the body of a response, turning non-2xx statuses into `ApiError::Server`.
    async fn success_body(&self, response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let err = ApiError::server(status.as_u16(), &body);
            warn!("Backend error: {} - {}", status.as_u16(), body);
            return Err(err);
        }
        Ok(body)
    }
}

/// Decodes an `/ask` body, requiring a non-empty `answer`.
fn parse_answer(body: &str) -> Result<AnswerResponse, ApiError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| ApiError::MalformedResponse)?;

    let has_answer = value
        .get("answer")
        .and_then(|a| a.as_str())
        .is_some_and(|a| !a.is_empty());
    if !has_answer {
        warn!("Answer missing from response body");
        return Err(ApiError::MalformedResponse);
    }

    serde_json::from_value(value).map_err(|e| {
        warn!("Answer body has unexpected shape: {}", e);
        ApiError::MalformedResponse
    })
}

#[async_trait]
impl LegalAdvisor for ApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ask_legal_question(&self, question: &str) -> Result<AnswerResponse, ApiError> {
        let url = self.endpoint("/ask");
        info!("POST {} (question_len={})", url, question.chars().count());

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&QuestionRequest { question })
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let body = self.success_body(response).await?;
        let answer = parse_answer(&body)?;
        info!(
            "Answer received: used_rag={}, sources={}, score={:?}",
            answer.used_rag,
            answer.sources.len(),
            answer.retrieval_score
        );
        Ok(answer)
    }

    async fn check_server_health(&self) -> bool {
        let url = self.endpoint("/health");
        info!("GET {}", url);

        let response = match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Health check failed: {}", e);
                return false;
            }
        };

        if response.status() != StatusCode::OK {
            warn!("Health check returned {}", response.status());
            return false;
        }

        match response.json::<HealthStatus>().await {
            Ok(health) => health.is_healthy(),
            Err(e) => {
                warn!("Health check body unreadable: {}", e);
                false
            }
        }
    }

    async fn get_api_info(&self) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint("/");
        info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let body = self.success_body(response).await?;
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}
