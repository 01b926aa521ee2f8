//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Request Lifecycle
//!
//! `update()` returns `Effect::SpawnRequest` for every accepted submission.
//! The loop spawns a tokio task that calls the backend and sends the outcome
//! back as an `Action` over an mpsc channel. Only one request task is kept
//! alive: spawning a new one aborts the previous task, and the request id
//! carried by each result lets `update()` drop anything stale.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{ApiClient, LegalAdvisor};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::question::Question;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AnswerPanelState, ExampleListState, FormEvent, QuestionForm};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which control receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Examples,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub question_form: QuestionForm,
    pub examples: ExampleListState,
    pub answer: AnswerPanelState,
    pub focus: Focus,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            question_form: QuestionForm::new(),
            examples: ExampleListState::new(),
            answer: AnswerPanelState::new(),
            focus: Focus::Form, // User expects to type immediately
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

/// Handle to the single outstanding request task.
#[derive(Default)]
struct InFlight {
    handle: Option<tokio::task::AbortHandle>,
}

impl InFlight {
    fn replace(&mut self, handle: tokio::task::AbortHandle) {
        self.abort();
        self.handle = Some(handle);
    }

    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let advisor: Arc<dyn LegalAdvisor> =
        Arc::new(ApiClient::new(config.base_url.clone(), config.timeout));
    let mut app = App::new(advisor.base_url().to_string());
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_startup_probes(advisor.clone(), tx.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut in_flight = InFlight::default();
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match handle_event(&event, &app, &mut tui) {
                Some(action) => action,
                None => continue,
            };
            if action == Action::CancelRequest {
                in_flight.abort();
            }
            if !apply(&mut app, &mut tui, action, &advisor, &tx, &mut in_flight) {
                break 'main;
            }
        }

        // Handle background task actions (answers, failures, probes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if !apply(&mut app, &mut tui, action, &advisor, &tx, &mut in_flight) {
                break 'main;
            }
        }
    }

    in_flight.abort();
    ratatui::restore();
    Ok(())
}

/// Runs `update` and carries out its effect. Returns false when the app should quit.
/// Also syncs the form's `loading` prop so events queued before the next frame see it.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    action: Action,
    advisor: &Arc<dyn LegalAdvisor>,
    tx: &mpsc::Sender<Action>,
    in_flight: &mut InFlight,
) -> bool {
    let effect = update(app, action);
    tui.question_form.loading = app.is_loading();

    match effect {
        Effect::None => true,
        Effect::Quit => false,
        Effect::SpawnRequest {
            request_id,
            question,
        } => {
            tui.answer = AnswerPanelState::new();
            tui.focus = Focus::Form;
            in_flight.replace(spawn_request(
                advisor.clone(),
                request_id,
                question,
                tx.clone(),
            ));
            true
        }
    }
}

/// Maps a terminal event to a core action, updating TUI-local state on the way.
fn handle_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Escape if app.is_loading() => Some(Action::CancelRequest),
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.answer.handle_event(event);
            None
        }
        TuiEvent::FocusNext => {
            tui.focus = match tui.focus {
                Focus::Form if ui::examples_visible(app) => Focus::Examples,
                _ => Focus::Form,
            };
            None
        }
        _ => match tui.focus {
            Focus::Examples if ui::examples_visible(app) => match event {
                TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::Submit => tui
                    .examples
                    .handle_event(event)
                    .map(|q| Action::Submit(q.to_string())),
                // Typing jumps back to the question box
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                    tui.focus = Focus::Form;
                    forward_to_form(event, tui)
                }
                _ => None,
            },
            _ => {
                tui.focus = Focus::Form;
                match event {
                    TuiEvent::CursorUp => {
                        tui.answer.handle_event(&TuiEvent::ScrollUp);
                        None
                    }
                    TuiEvent::CursorDown => {
                        tui.answer.handle_event(&TuiEvent::ScrollDown);
                        None
                    }
                    _ => forward_to_form(event, tui),
                }
            }
        },
    }
}

fn forward_to_form(event: &TuiEvent, tui: &mut TuiState) -> Option<Action> {
    match tui.question_form.handle_event(event)? {
        FormEvent::Submit(question) => Some(Action::Submit(question.into_inner())),
        FormEvent::ContentChanged => None,
    }
}

/// Fetches backend liveness and the info banner once at startup.
fn spawn_startup_probes(advisor: Arc<dyn LegalAdvisor>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let healthy = advisor.check_server_health().await;
        info!("Backend health: {}", if healthy { "healthy" } else { "unhealthy" });
        if tx.send(Action::HealthChecked(healthy)).is_err() {
            warn!("Failed to send health result: receiver dropped");
            return;
        }

        match advisor.get_api_info().await {
            Ok(info) => {
                if tx.send(Action::ApiInfoLoaded(info)).is_err() {
                    warn!("Failed to send API info: receiver dropped");
                }
            }
            Err(e) => warn!("Could not fetch API info: {}", e),
        }
    });
}

fn spawn_request(
    advisor: Arc<dyn LegalAdvisor>,
    request_id: u64,
    question: Question,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning request {}", request_id);

    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let action = match advisor.ask_legal_question(question.as_str()).await {
            Ok(response) => Action::AnswerReceived {
                request_id,
                response,
            },
            Err(error) => Action::RequestFailed { request_id, error },
        };
        debug!(
            "Request {} finished in {}ms",
            request_id,
            started.elapsed().as_millis()
        );
        if tx.send(action).is_err() {
            warn!("Failed to send result for request {}: receiver dropped", request_id);
        }
    });

    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::state::RequestState;
    use crate::test_support::StubAdvisor;

    async fn next_action(rx: &mpsc::Receiver<Action>) -> Action {
        for _ in 0..100 {
            if let Ok(action) = rx.try_recv() {
                return action;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no action received");
    }

    fn typed(tui: &mut TuiState, app: &App, text: &str) {
        for c in text.chars() {
            handle_event(&TuiEvent::InputChar(c), app, tui);
        }
    }

    #[test]
    fn test_enter_submits_form_text() {
        let app = App::new(String::new());
        let mut tui = TuiState::new();
        typed(&mut tui, &app, " What is FIR? ");

        let action = handle_event(&TuiEvent::Submit, &app, &mut tui);
        assert_eq!(action, Some(Action::Submit("What is FIR?".to_string())));
    }

    #[test]
    fn test_blank_enter_produces_no_action() {
        let app = App::new(String::new());
        let mut tui = TuiState::new();
        typed(&mut tui, &app, "   ");
        assert_eq!(handle_event(&TuiEvent::Submit, &app, &mut tui), None);
    }

    #[test]
    fn test_example_submission_bypasses_form_buffer() {
        let app = App::new(String::new());
        let mut tui = TuiState::new();
        typed(&mut tui, &app, "draft");

        handle_event(&TuiEvent::FocusNext, &app, &mut tui);
        assert_eq!(tui.focus, Focus::Examples);
        handle_event(&TuiEvent::CursorDown, &app, &mut tui);
        handle_event(&TuiEvent::CursorDown, &app, &mut tui);

        let action = handle_event(&TuiEvent::Submit, &app, &mut tui);
        assert_eq!(
            action,
            Some(Action::Submit("What is the procedure for filing FIR?".to_string()))
        );
        assert_eq!(tui.question_form.buffer, "draft");
    }

    #[test]
    fn test_focus_stays_on_form_while_loading() {
        let mut app = App::new(String::new());
        app.begin_request("q");
        let mut tui = TuiState::new();
        handle_event(&TuiEvent::FocusNext, &app, &mut tui);
        assert_eq!(tui.focus, Focus::Form);
    }

    #[test]
    fn test_escape_cancels_then_quits() {
        let mut app = App::new(String::new());
        let mut tui = TuiState::new();
        app.begin_request("q");
        assert_eq!(
            handle_event(&TuiEvent::Escape, &app, &mut tui),
            Some(Action::CancelRequest)
        );

        app.request = RequestState::Idle;
        assert_eq!(handle_event(&TuiEvent::Escape, &app, &mut tui), Some(Action::Quit));
    }

    #[tokio::test]
    async fn test_form_locked_between_submit_and_next_frame() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::answering("An FIR is..."));
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(String::new());
        let mut tui = TuiState::new();
        let mut in_flight = InFlight::default();
        typed(&mut tui, &app, "What is FIR?");

        // Same event batch, no draw in between
        let first = handle_event(&TuiEvent::Submit, &app, &mut tui).unwrap();
        apply(&mut app, &mut tui, first, &advisor, &tx, &mut in_flight);
        assert_eq!(app.request, RequestState::Loading { request_id: 1 });

        assert_eq!(handle_event(&TuiEvent::Submit, &app, &mut tui), None);
        assert_eq!(handle_event(&TuiEvent::InputChar('x'), &app, &mut tui), None);
        assert_eq!(tui.question_form.buffer, "What is FIR?");
        assert_eq!(app.request, RequestState::Loading { request_id: 1 });
    }

    #[tokio::test]
    async fn test_form_unlocks_after_result_arrives() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::answering("An FIR is..."));
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(String::new());
        let mut tui = TuiState::new();
        let mut in_flight = InFlight::default();
        typed(&mut tui, &app, "What is FIR?");

        let first = handle_event(&TuiEvent::Submit, &app, &mut tui).unwrap();
        apply(&mut app, &mut tui, first, &advisor, &tx, &mut in_flight);
        assert!(tui.question_form.loading);

        let result = next_action(&rx).await;
        apply(&mut app, &mut tui, result, &advisor, &tx, &mut in_flight);
        assert!(!tui.question_form.loading);
        assert!(handle_event(&TuiEvent::Submit, &app, &mut tui).is_some());
    }

    #[tokio::test]
    async fn test_spawn_request_reports_answer_with_request_id() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::answering("An FIR is..."));
        let (tx, rx) = mpsc::channel();
        let question = Question::parse("What is FIR?").unwrap();

        spawn_request(advisor, 7, question, tx);

        match next_action(&rx).await {
            Action::AnswerReceived {
                request_id,
                response,
            } => {
                assert_eq!(request_id, 7);
                assert_eq!(response.answer, "An FIR is...");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_request_reports_failure() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::failing(ApiError::Timeout));
        let (tx, rx) = mpsc::channel();
        let question = Question::parse("What is FIR?").unwrap();

        spawn_request(advisor, 3, question, tx);

        assert_eq!(
            next_action(&rx).await,
            Action::RequestFailed {
                request_id: 3,
                error: ApiError::Timeout,
            }
        );
    }

    #[tokio::test]
    async fn test_startup_probes_report_health_then_info() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::answering("ok"));
        let (tx, rx) = mpsc::channel();

        spawn_startup_probes(advisor, tx);

        assert_eq!(next_action(&rx).await, Action::HealthChecked(true));
        assert_eq!(
            next_action(&rx).await,
            Action::ApiInfoLoaded(serde_json::json!({ "message": "stub backend" }))
        );
    }

    #[tokio::test]
    async fn test_apply_submit_spawns_and_resets_answer_scroll() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::answering("Equality."));
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(String::new());
        let mut tui = TuiState::new();
        tui.focus = Focus::Examples;
        let mut in_flight = InFlight::default();

        let keep_running = apply(
            &mut app,
            &mut tui,
            Action::Submit("Explain Article 14".to_string()),
            &advisor,
            &tx,
            &mut in_flight,
        );
        assert!(keep_running);
        assert!(app.is_loading());
        assert_eq!(tui.focus, Focus::Form);
        assert!(in_flight.handle.is_some());

        let result = next_action(&rx).await;
        apply(&mut app, &mut tui, result, &advisor, &tx, &mut in_flight);
        assert_eq!(
            app.request.response().map(|r| r.answer.as_str()),
            Some("Equality.")
        );
    }

    #[test]
    fn test_apply_quit_stops_loop() {
        let advisor: Arc<dyn LegalAdvisor> = Arc::new(StubAdvisor::answering("x"));
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(String::new());
        let mut tui = TuiState::new();
        let mut in_flight = InFlight::default();
        assert!(!apply(&mut app, &mut tui, Action::Quit, &advisor, &tx, &mut in_flight));
    }
}
