//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::{AnswerResponse, ApiError, LegalAdvisor};

/// An advisor that replies with a canned outcome and never touches the network.
pub struct StubAdvisor {
    pub outcome: Result<AnswerResponse, ApiError>,
}

impl StubAdvisor {
    pub fn answering(answer: &str) -> Self {
        Self {
            outcome: Ok(AnswerResponse {
                answer: answer.to_string(),
                sources: Vec::new(),
                retrieval_score: None,
                used_rag: false,
            }),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self { outcome: Err(error) }
    }
}

#[async_trait]
impl LegalAdvisor for StubAdvisor {
    fn base_url(&self) -> &str {
        "http://stub"
    }

    async fn ask_legal_question(&self, _question: &str) -> Result<AnswerResponse, ApiError> {
        self.outcome.clone()
    }

    async fn check_server_health(&self) -> bool {
        self.outcome.is_ok()
    }

    async fn get_api_info(&self) -> Result<serde_json::Value, ApiError> {
        Ok(serde_json::json!({ "message": "stub backend" }))
    }
}
