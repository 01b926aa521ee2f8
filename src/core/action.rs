//! # Actions
//!
//! Everything that can happen in InLaw becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::AnswerReceived { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::{AnswerResponse, ApiError};
use crate::core::question::Question;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw text from the question form or an example question.
    Submit(String),
    AnswerReceived {
        request_id: u64,
        response: AnswerResponse,
    },
    RequestFailed {
        request_id: u64,
        error: ApiError,
    },
    /// User abandoned the in-flight request.
    CancelRequest,
    HealthChecked(bool),
    ApiInfoLoaded(serde_json::Value),
    Quit,
}

/// Side effects requested by `update`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest { request_id: u64, question: Question },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let Some(question) = Question::parse(&text) else {
                debug!("Ignoring submit: question empty or too long");
                return Effect::None;
            };
            let request_id = app.begin_request(question.as_str());
            info!("Submitting request {}", request_id);
            Effect::SpawnRequest {
                request_id,
                question,
            }
        }
        Action::AnswerReceived {
            request_id,
            response,
        } => {
            app.complete_request(request_id, response);
            Effect::None
        }
        Action::RequestFailed { request_id, error } => {
            app.fail_request(request_id, error.to_string());
            Effect::None
        }
        Action::CancelRequest => {
            if app.cancel_request() {
                info!("Request cancelled by user");
            }
            Effect::None
        }
        Action::HealthChecked(healthy) => {
            app.backend_health = Some(healthy);
            Effect::None
        }
        Action::ApiInfoLoaded(info) => {
            app.api_info = describe_api_info(&info);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Reduces the `GET /` blob to one line: its `message` if present, else compact JSON.
fn describe_api_info(info: &serde_json::Value) -> Option<String> {
    match info {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        other => Some(
            other
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::RequestState;
    use serde_json::json;

    fn app() -> App {
        App::new("http://localhost:8000".to_string())
    }

    fn grounded_answer() -> AnswerResponse {
        AnswerResponse {
            answer: "Para one.\n\nPara two.".to_string(),
            sources: vec!["IPC §302".to_string(), "CrPC §154".to_string()],
            retrieval_score: Some(0.842),
            used_rag: true,
        }
    }

    #[test]
    fn test_submit_valid_question_starts_loading() {
        let mut app = app();
        let effect = update(&mut app, Action::Submit("  What is FIR?  ".to_string()));

        match effect {
            Effect::SpawnRequest {
                request_id,
                question,
            } => {
                assert_eq!(question.as_str(), "What is FIR?");
                assert_eq!(app.request, RequestState::Loading { request_id });
            }
            other => panic!("Expected SpawnRequest, got {other:?}"),
        }
        assert_eq!(app.last_question.as_deref(), Some("What is FIR?"));
    }

    #[test]
    fn test_submit_blank_question_is_noop() {
        let mut app = app();
        app.request = RequestState::Succeeded(grounded_answer());

        let effect = update(&mut app, Action::Submit("   \n ".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.request, RequestState::Succeeded(grounded_answer()));
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut app = app();
        app.request = RequestState::Errored("previous".to_string());
        update(&mut app, Action::Submit("Explain Article 14".to_string()));
        assert!(app.is_loading());
        assert_eq!(app.request.error(), None);
    }

    #[test]
    fn test_answer_received_succeeds() {
        let mut app = app();
        let Effect::SpawnRequest { request_id, .. } =
            update(&mut app, Action::Submit("q".to_string()))
        else {
            panic!("Expected SpawnRequest");
        };

        update(
            &mut app,
            Action::AnswerReceived {
                request_id,
                response: grounded_answer(),
            },
        );
        assert_eq!(app.request.response(), Some(&grounded_answer()));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_request_failed_stores_error_message() {
        let mut app = app();
        let Effect::SpawnRequest { request_id, .. } =
            update(&mut app, Action::Submit("q".to_string()))
        else {
            panic!("Expected SpawnRequest");
        };

        update(
            &mut app,
            Action::RequestFailed {
                request_id,
                error: ApiError::Timeout,
            },
        );
        let message = app.request.error().unwrap();
        assert!(message.contains("timeout"));
    }

    #[test]
    fn test_overlapping_submissions_latest_wins() {
        let mut app = app();
        let Effect::SpawnRequest { request_id: first, .. } =
            update(&mut app, Action::Submit("first".to_string()))
        else {
            panic!("Expected SpawnRequest");
        };
        let Effect::SpawnRequest { request_id: second, .. } =
            update(&mut app, Action::Submit("second".to_string()))
        else {
            panic!("Expected SpawnRequest");
        };

        // Second resolves first, then the stale first arrives late
        let mut second_answer = grounded_answer();
        second_answer.answer = "second answer".to_string();
        update(
            &mut app,
            Action::AnswerReceived {
                request_id: second,
                response: second_answer.clone(),
            },
        );
        update(
            &mut app,
            Action::RequestFailed {
                request_id: first,
                error: ApiError::Timeout,
            },
        );

        assert_eq!(app.request.response(), Some(&second_answer));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut app = app();
        update(&mut app, Action::Submit("q".to_string()));
        update(&mut app, Action::CancelRequest);
        assert_eq!(app.request, RequestState::Idle);
    }

    #[test]
    fn test_health_and_info() {
        let mut app = app();
        update(&mut app, Action::HealthChecked(true));
        assert_eq!(app.backend_health, Some(true));

        update(
            &mut app,
            Action::ApiInfoLoaded(json!({"message": "InLaw - Indian Legal Advisor"})),
        );
        assert_eq!(app.api_info.as_deref(), Some("InLaw - Indian Legal Advisor"));

        update(&mut app, Action::ApiInfoLoaded(json!({"version": "1.0"})));
        assert_eq!(app.api_info.as_deref(), Some(r#"{"version":"1.0"}"#));

        update(&mut app, Action::ApiInfoLoaded(serde_json::Value::Null));
        assert_eq!(app.api_info, None);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
