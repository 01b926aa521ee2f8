use serde::{Deserialize, Serialize};

/// Body of `POST /ask`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuestionRequest<'a> {
    pub question: &'a str,
}

/// A completed answer from the backend.
///
/// `sources` keeps the backend's order and may be empty. `retrieval_score`
/// is only present when the backend ran retrieval for the question.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_score: Option<f64>,
    /// True when the answer is grounded in retrieved documents.
    #[serde(default)]
    pub used_rag: bool,
}

/// Body of `GET /health`. Anything other than `"healthy"` means unhealthy.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
