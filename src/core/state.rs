//! # Application State
//!
//! Core business state for InLaw. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── request: RequestState         // idle / loading / errored / succeeded
//! ├── next_request_id: u64          // generation counter for submissions
//! ├── base_url: String              // backend location, shown in the header
//! ├── backend_health: Option<bool>  // None until the startup probe returns
//! ├── api_info: Option<String>      // banner from GET /
//! └── last_question: Option<String> // question behind the current request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! which calls the three transition methods below.

use log::debug;

use crate::api::AnswerResponse;

/// Shown when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your question";

/// Lifecycle of the single outstanding question.
///
/// Loading, error and response are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading { request_id: u64 },
    Errored(String),
    Succeeded(AnswerResponse),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&AnswerResponse> {
        match self {
            RequestState::Succeeded(response) => Some(response),
            _ => None,
        }
    }
}

pub struct App {
    pub request: RequestState,
    pub next_request_id: u64,
    pub base_url: String,
    pub backend_health: Option<bool>,
    pub api_info: Option<String>,
    pub last_question: Option<String>,
}

impl App {
    pub fn new(base_url: String) -> Self {
        Self {
            request: RequestState::Idle,
            next_request_id: 1,
            base_url,
            backend_health: None,
            api_info: None,
            last_question: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    /// Idle/Errored/Succeeded (or a superseded Loading) → Loading.
    /// Returns the id the eventual result must carry to be accepted.
    pub fn begin_request(&mut self, question: &str) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.request = RequestState::Loading { request_id };
        self.last_question = Some(question.to_string());
        request_id
    }

    /// Loading → Succeeded. Returns false (and changes nothing) for stale ids.
    pub fn complete_request(&mut self, request_id: u64, response: AnswerResponse) -> bool {
        if !self.is_current(request_id) {
            debug!("Dropping stale answer for request {}", request_id);
            return false;
        }
        self.request = RequestState::Succeeded(response);
        true
    }

    /// Loading → Errored. Returns false (and changes nothing) for stale ids.
    pub fn fail_request(&mut self, request_id: u64, message: String) -> bool {
        if !self.is_current(request_id) {
            debug!("Dropping stale failure for request {}", request_id);
            return false;
        }
        let message = if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        self.request = RequestState::Errored(message);
        true
    }

    /// Loading → Idle, after the user abandons the request.
    pub fn cancel_request(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.request = RequestState::Idle;
        true
    }

    fn is_current(&self, request_id: u64) -> bool {
        self.request == RequestState::Loading { request_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> AnswerResponse {
        AnswerResponse {
            answer: text.to_string(),
            sources: vec![],
            retrieval_score: None,
            used_rag: false,
        }
    }

    #[test]
    fn test_app_new_defaults() {
        let app = App::new("http://localhost:8000".to_string());
        assert_eq!(app.request, RequestState::Idle);
        assert!(!app.is_loading());
        assert_eq!(app.backend_health, None);
    }

    #[test]
    fn test_begin_request_clears_previous_outcome() {
        let mut app = App::new(String::new());
        app.request = RequestState::Errored("boom".to_string());

        let id = app.begin_request("q");
        assert_eq!(app.request, RequestState::Loading { request_id: id });
        assert_eq!(app.request.error(), None);
        assert_eq!(app.request.response(), None);
    }

    #[test]
    fn test_request_ids_increase() {
        let mut app = App::new(String::new());
        let first = app.begin_request("a");
        let second = app.begin_request("b");
        assert!(second > first);
    }

    #[test]
    fn test_stale_results_are_ignored() {
        let mut app = App::new(String::new());
        let first = app.begin_request("a");
        let second = app.begin_request("b");

        assert!(!app.complete_request(first, answer("old")));
        assert!(!app.fail_request(first, "old failure".to_string()));
        assert_eq!(app.request, RequestState::Loading { request_id: second });

        assert!(app.complete_request(second, answer("new")));
        assert_eq!(app.request.response().map(|r| r.answer.as_str()), Some("new"));
    }

    #[test]
    fn test_fail_request_uses_generic_message_when_blank() {
        let mut app = App::new(String::new());
        let id = app.begin_request("a");
        app.fail_request(id, String::new());
        assert_eq!(app.request.error(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[test]
    fn test_cancel_only_while_loading() {
        let mut app = App::new(String::new());
        assert!(!app.cancel_request());

        let id = app.begin_request("a");
        assert!(app.cancel_request());
        assert_eq!(app.request, RequestState::Idle);
        assert!(!app.complete_request(id, answer("late")));
    }
}
