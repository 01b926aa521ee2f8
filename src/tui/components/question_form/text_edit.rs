//! Stateless text helpers for the question form: wrapping, char boundaries,
//! and the cursor's on-screen location.

/// Left + right border of the form block.
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Text rows shown before the text area starts scrolling.
pub(super) const MAX_VISIBLE_LINES: u16 = 6;
/// Text rows reserved even for an empty question.
pub(super) const MIN_VISIBLE_LINES: u16 = 3;

/// Wrapping options matching ratatui's `Paragraph` with `Wrap { trim: false }`.
pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Number of display rows `text` occupies at `width`.
///
/// A trailing newline opens an empty row that textwrap does not report.
pub(super) fn wrapped_rows(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }
    let lines = textwrap::wrap(text, wrap_options(width));
    let mut rows = (lines.len() as u16).max(1);
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        rows += 1;
    }
    rows
}

/// Row and column of byte offset `pos` within `text` wrapped at `width`.
pub(super) fn cursor_row_col(text: &str, pos: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let before = &text[..pos];
    let row = wrapped_rows(before, width).saturating_sub(1);

    // Column is measured on the current logical line; textwrap drops trailing
    // spaces, so count characters rather than using the wrapped segment length.
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let logical = &before[line_start..];
    let segments = textwrap::wrap(logical, wrap_options(width));
    let consumed: usize = segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .map(|s| s.chars().count())
        .sum();
    let col = logical.chars().count().saturating_sub(consumed) as u16;

    (row, col.min(width.saturating_sub(1)))
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
