//! # AnswerPanel Component
//!
//! Renders the outcome of the current question. The view is a pure function of
//! `(response, loading, error)` with a fixed priority:
//!
//! ```text
//! loading  →  Loading view   (spinner + status text)
//! error    →  Error view     (message verbatim)
//! response →  Answer view    (badge, score, paragraphs, sources)
//! nothing  →  Empty view     (explanatory copy)
//! ```
//!
//! The panel owns only its scroll position; everything else arrives as props.
//! Long answers scroll with the arrow keys, PageUp/PageDown or the mouse wheel.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::AnswerResponse;
use crate::core::format::{format_score, split_paragraphs};
use crate::core::state::RequestState;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

pub const LOADING_TEXT: &str = "Analyzing your legal question...";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const EMPTY_LINES: [&str; 2] = [
    "Your legal answer will appear here once you ask a question.",
    "InLaw uses AI and retrieval-augmented generation to provide accurate \
     information about Indian laws and legal provisions.",
];

/// Whether the answer was grounded in retrieved documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Grounded,
    General,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Grounded => "RAG Response",
            Badge::General => "General Response",
        }
    }

    fn style(self) -> Style {
        let bg = match self {
            Badge::Grounded => Color::Green,
            Badge::General => Color::Yellow,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Everything the answer view shows, derived from one response.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSections<'a> {
    pub badge: Badge,
    pub score: Option<String>,
    pub paragraphs: Vec<&'a str>,
    /// `None` when the response has no sources; the section is then omitted.
    pub sources: Option<&'a [String]>,
}

impl<'a> AnswerSections<'a> {
    pub fn new(response: &'a AnswerResponse) -> Self {
        Self {
            badge: if response.used_rag {
                Badge::Grounded
            } else {
                Badge::General
            },
            score: response.retrieval_score.map(format_score),
            paragraphs: split_paragraphs(&response.answer),
            sources: (!response.sources.is_empty()).then_some(response.sources.as_slice()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerView<'a> {
    Loading,
    Error(&'a str),
    Answer(AnswerSections<'a>),
    Empty,
}

impl<'a> AnswerView<'a> {
    /// Picks the view from the three inputs: loading beats error beats response.
    pub fn select(
        response: Option<&'a AnswerResponse>,
        loading: bool,
        error: Option<&'a str>,
    ) -> Self {
        if loading {
            AnswerView::Loading
        } else if let Some(message) = error {
            AnswerView::Error(message)
        } else if let Some(response) = response {
            AnswerView::Answer(AnswerSections::new(response))
        } else {
            AnswerView::Empty
        }
    }

    pub fn from_state(state: &'a RequestState) -> Self {
        Self::select(state.response(), state.is_loading(), state.error())
    }

    fn lines(&self, spinner_frame: usize, api_info: Option<&str>) -> Vec<Line<'a>> {
        match self {
            AnswerView::Loading => {
                let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
                vec![
                    Line::default(),
                    Line::from(Span::styled(
                        spinner,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ))
                    .centered(),
                    Line::default(),
                    Line::from(LOADING_TEXT).centered(),
                ]
            }
            AnswerView::Error(message) => {
                let message: &'a str = *message;
                let mut lines = vec![
                    Line::from(Span::styled(
                        "Error",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ))
                    .centered(),
                    Line::default(),
                ];
                lines.extend(
                    message
                        .lines()
                        .map(|l| Line::styled(l, Style::default().fg(Color::LightRed)).centered()),
                );
                lines
            }
            AnswerView::Answer(sections) => sections_to_lines(sections),
            AnswerView::Empty => {
                let muted = Style::default().fg(Color::DarkGray);
                let mut lines = vec![
                    Line::default(),
                    Line::styled(EMPTY_LINES[0], muted).centered(),
                    Line::default(),
                    Line::styled(EMPTY_LINES[1], muted).centered(),
                ];
                if let Some(info) = api_info {
                    lines.push(Line::default());
                    lines.push(Line::styled(format!("Backend: {info}"), muted).centered());
                }
                lines
            }
        }
    }
}

fn sections_to_lines<'a>(sections: &AnswerSections<'a>) -> Vec<Line<'a>> {
    let mut header = vec![Span::styled(
        format!(" {} ", sections.badge.label()),
        sections.badge.style(),
    )];
    if let Some(score) = &sections.score {
        header.push(Span::raw("  "));
        header.push(Span::styled(score.clone(), Style::default().fg(Color::Gray)));
    }

    let mut lines = vec![Line::from(header), Line::default()];

    for (i, paragraph) in sections.paragraphs.iter().copied().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(paragraph.lines().map(Line::from));
    }

    if let Some(sources) = sections.sources {
        lines.push(Line::default());
        lines.push(Line::styled(
            "Sources",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for (n, source) in sources.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", n + 1), Style::default().fg(Color::Blue)),
                Span::raw(source.as_str()),
            ]));
        }
    }

    lines
}

/// Scroll position for the answer panel. Lives in `TuiState`.
#[derive(Default)]
pub struct AnswerPanelState {
    pub scroll_state: ScrollViewState,
}

impl AnswerPanelState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for AnswerPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper: borrowed scroll state plus the view to draw.
pub struct AnswerPanel<'a> {
    state: &'a mut AnswerPanelState,
    view: AnswerView<'a>,
    spinner_frame: usize,
    api_info: Option<&'a str>,
}

impl<'a> AnswerPanel<'a> {
    pub fn new(
        state: &'a mut AnswerPanelState,
        view: AnswerView<'a>,
        spinner_frame: usize,
        api_info: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            view,
            spinner_frame,
            api_info,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Legal Response ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Leave a column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        if content_width == 0 || inner.height == 0 {
            return;
        }

        let paragraph = Paragraph::new(self.view.lines(self.spinner_frame, self.api_info))
            .wrap(Wrap { trim: false });
        let content_height = (paragraph.line_count(content_width) as u16).max(1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
