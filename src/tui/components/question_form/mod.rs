//! # QuestionForm Component
//!
//! The editable question box, its character counter, and the submit control.
//!
//! ## Responsibilities
//!
//! - Capture text input, bounded to [`MAX_QUESTION_CHARS`]
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter), only when the trimmed text is non-empty and
//!   no request is in flight
//! - Display the live `current/max` counter
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `loading` and `focused` are props
//! synced from the parent each frame. Input that would push the buffer past the
//! limit is rejected whole, so the stored value never exceeds it.

mod text_edit;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::question::{MAX_QUESTION_CHARS, Question};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_edit::{
    HORIZONTAL_OVERHEAD, MAX_VISIBLE_LINES, MIN_VISIBLE_LINES, cursor_row_col, next_char_boundary,
    prev_char_boundary, wrapped_rows,
};

/// Rows below the text area: counter + submit button.
const FOOTER_ROWS: u16 = 2;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;

const PLACEHOLDER: &str =
    "Enter your legal question here... For example: What is Section 115(2) of BNS?";

/// High-level events emitted by the QuestionForm
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// User submitted a valid, trimmed question
    Submit(Question),
    /// Buffer or cursor changed
    ContentChanged,
}

pub struct QuestionForm {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible wrapped row
    scroll_offset: u16,
    /// A request is in flight (Prop)
    pub loading: bool,
    /// Keyboard focus is on the form (Prop)
    pub focused: bool,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionForm {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            loading: false,
            focused: true,
        }
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Mirrors the submit button's enabled state.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.buffer.trim().is_empty()
    }

    /// Counter text, e.g. `42/500 characters`.
    pub fn counter_label(&self) -> String {
        format!("{}/{} characters", self.char_count(), MAX_QUESTION_CHARS)
    }

    /// Total height the form needs at `width`, text rows clamped to the viewport limits.
    pub fn calculate_height(&self, width: u16) -> u16 {
        self.visible_rows(width) + FOOTER_ROWS + VERTICAL_OVERHEAD
    }

    fn visible_rows(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        wrapped_rows(&self.buffer, inner).clamp(MIN_VISIBLE_LINES, MAX_VISIBLE_LINES)
    }

    /// Inserts `text` at the cursor, or rejects it entirely if the result
    /// would exceed the limit. Returns whether anything changed.
    fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() || self.char_count() + text.chars().count() > MAX_QUESTION_CHARS {
            return false;
        }
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        true
    }

    fn keep_cursor_visible(&mut self, inner_width: u16, visible_rows: u16) {
        let (row, _) = cursor_row_col(&self.buffer, self.cursor, inner_width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + visible_rows {
            self.scroll_offset = row + 1 - visible_rows;
        }
    }
}

impl Component for QuestionForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Ask Your Legal Question ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, counter_area, button_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.keep_cursor_visible(text_area.width, text_area.height.max(1));

        let text = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            let style = if self.loading {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            Paragraph::new(self.buffer.as_str())
                .style(style)
                .scroll((self.scroll_offset, 0))
        };
        frame.render_widget(text.wrap(Wrap { trim: false }), text_area);

        frame.render_widget(
            Paragraph::new(self.counter_label())
                .alignment(Alignment::Right)
                .style(Style::default().fg(Color::DarkGray)),
            counter_area,
        );

        let (label, style) = if self.loading {
            ("[ Processing... ]", Style::default().fg(Color::DarkGray))
        } else if self.can_submit() {
            (
                "[ Ask InLaw ]",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("[ Ask InLaw ]", Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center),
            button_area,
        );

        if self.focused && !self.loading {
            let (row, col) = cursor_row_col(&self.buffer, self.cursor, text_area.width);
            let visible_row = row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((text_area.x + col, text_area.y + visible_row));
        }
    }
}

impl EventHandler for QuestionForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // The text area is disabled while a request is outstanding
        if self.loading {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
                    .then_some(FormEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let normalized = text.replace("\r\n", "\n");
                self.insert(&normalized).then_some(FormEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                FormEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                FormEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                FormEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FormEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    FormEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    FormEvent::ContentChanged
                })
            }
            TuiEvent::Submit => Question::parse(&self.buffer).map(FormEvent::Submit),
            _ => None,
        }
    }
}
