//! # Example Questions
//!
//! Welcome copy plus a short list of sample questions, shown on the question
//! side while there is no answer and nothing in flight. Choosing one submits it
//! through the same path as the form, without touching the form's buffer.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ExampleListState` lives in `TuiState`
//! - `ExampleList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::tui::event::TuiEvent;

pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "What is Section 115(2) of BNS?",
    "Explain Article 14 of the Constitution",
    "What is the procedure for filing FIR?",
    "Essential elements of a valid contract",
];

const WELCOME: &str = "Welcome to InLaw, your AI-powered Indian Legal Advisor. Ask any question \
    related to Indian laws, acts, sections, and legal provisions. Answers are grounded in \
    retrieved legal documents whenever relevant ones are found.";

pub struct ExampleListState {
    pub list_state: ListState,
}

impl Default for ExampleListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExampleListState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn selected(&self) -> usize {
        self.list_state
            .selected()
            .unwrap_or(0)
            .min(EXAMPLE_QUESTIONS.len() - 1)
    }

    /// Returns the chosen question when the user confirms a selection.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<&'static str> {
        match event {
            TuiEvent::CursorUp => {
                self.list_state
                    .select(Some(self.selected().saturating_sub(1)));
                None
            }
            TuiEvent::CursorDown => {
                let next = (self.selected() + 1).min(EXAMPLE_QUESTIONS.len() - 1);
                self.list_state.select(Some(next));
                None
            }
            TuiEvent::Submit => Some(EXAMPLE_QUESTIONS[self.selected()]),
            _ => None,
        }
    }
}

/// Transient render wrapper for the welcome text and example list.
pub struct ExampleList<'a> {
    state: &'a mut ExampleListState,
    focused: bool,
}

impl<'a> ExampleList<'a> {
    pub fn new(state: &'a mut ExampleListState, focused: bool) -> Self {
        Self { state, focused }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let welcome = Paragraph::new(WELCOME)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        let welcome_height = welcome.line_count(area.width) as u16;

        let [welcome_area, _, title_area, list_area] = Layout::vertical([
            Constraint::Length(welcome_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(welcome, welcome_area);

        let hint = if self.focused { "" } else { "  (Tab to choose)" };
        frame.render_widget(
            Line::from(vec![
                Span::styled(
                    "Try these example questions:",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ]),
            title_area,
        );

        let items: Vec<ListItem> = EXAMPLE_QUESTIONS
            .iter()
            .map(|q| ListItem::new(Line::from(*q)))
            .collect();

        let highlight = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol(if self.focused { "> " } else { "  " });

        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}
