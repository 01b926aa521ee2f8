//! # Header Component
//!
//! Page chrome: application title, subtitle, and backend liveness.
//!
//! Stateless. All three props come from core `App` state:
//! - `base_url`: where requests are sent
//! - `backend_health`: `None` while the startup probe is outstanding
//! - `loading`: whether a question is in flight
//!
//! The status text on the right follows this priority:
//!
//! 1. **Loading**: `"asking {base_url}..."`
//! 2. **Probe pending**: `"checking {base_url}"`
//! 3. **Probe done**: `"online: {base_url}"` or `"offline: {base_url}"`

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::Component;

pub const TITLE: &str = "InLaw";
pub const SUBTITLE: &str = "Indian Legal Advisor - AI-Powered Legal Assistant";

pub struct Header {
    pub base_url: String,
    pub backend_health: Option<bool>,
    pub loading: bool,
}

impl Header {
    pub fn new(base_url: String, backend_health: Option<bool>, loading: bool) -> Self {
        Self {
            base_url,
            backend_health,
            loading,
        }
    }

    pub fn status_text(&self) -> String {
        if self.loading {
            return format!("asking {}...", self.base_url);
        }
        match self.backend_health {
            None => format!("checking {}", self.base_url),
            Some(true) => format!("online: {}", self.base_url),
            Some(false) => format!("offline: {}", self.base_url),
        }
    }

    fn status_style(&self) -> Style {
        match (self.loading, self.backend_health) {
            (true, _) => Style::default().fg(Color::Cyan),
            (false, Some(true)) => Style::default().fg(Color::Green),
            (false, Some(false)) => Style::default().fg(Color::Red),
            (false, None) => Style::default().fg(Color::DarkGray),
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Percentage(40)]).areas(inner);

        let title = Line::from(vec![
            Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(SUBTITLE, Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(title), left);

        frame.render_widget(
            Paragraph::new(Span::styled(self.status_text(), self.status_style()))
                .alignment(Alignment::Right),
            right,
        );
    }
}
