pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LegalAdvisor};
pub use error::ApiError;
pub use types::{AnswerResponse, HealthStatus, QuestionRequest};
