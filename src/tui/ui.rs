use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{AnswerPanel, AnswerView, ExampleList, Header};
use crate::tui::{Focus, TuiState};

/// Below this width the two panels stack vertically instead of side by side.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;

/// Example questions are offered only before the first answer and while idle.
pub fn examples_visible(app: &App) -> bool {
    app.request.response().is_none() && !app.is_loading()
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};

    let [header_area, body_area, footer_area] =
        Layout::vertical([Length(2), Min(0), Length(1)]).areas(frame.area());

    Header::new(app.base_url.clone(), app.backend_health, app.is_loading())
        .render(frame, header_area);

    let body_area = body_area.inner(Margin::new(1, 0));
    let [question_area, answer_area] = if body_area.width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::horizontal([Percentage(50), Percentage(50)])
            .spacing(1)
            .areas(body_area)
    } else {
        Layout::vertical([Percentage(45), Min(0)]).areas(body_area)
    };

    draw_question_side(frame, question_area, app, tui);

    let view = AnswerView::from_state(&app.request);
    AnswerPanel::new(&mut tui.answer, view, spinner_frame, app.api_info.as_deref())
        .render(frame, answer_area);

    frame.render_widget(
        Span::styled(footer_hint(app, tui), Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

fn draw_question_side(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let form_height = tui.question_form.calculate_height(area.width).min(area.height);
    let [form_area, rest] =
        Layout::vertical([Constraint::Length(form_height), Constraint::Min(0)]).areas(area);

    tui.question_form.loading = app.is_loading();
    tui.question_form.focused = tui.focus == Focus::Form;
    tui.question_form.render(frame, form_area);

    if examples_visible(app) {
        let examples_area = rest.inner(Margin::new(1, 1));
        ExampleList::new(&mut tui.examples, tui.focus == Focus::Examples)
            .render(frame, examples_area);
    }
}

fn footer_hint(app: &App, tui: &TuiState) -> String {
    if app.is_loading() {
        return " Esc cancel · PgUp/PgDn scroll · Ctrl+C quit".to_string();
    }
    match tui.focus {
        Focus::Form => {
            " Enter ask · Shift+Enter newline · Tab examples · PgUp/PgDn scroll · Esc quit"
                .to_string()
        }
        Focus::Examples => " ↑/↓ choose · Enter ask · Tab back to question · Esc quit".to_string(),
    }
}
