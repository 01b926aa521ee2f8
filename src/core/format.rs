//! Pure string transforms used by the answer view.

/// Splits an answer into paragraphs on runs of two or more line breaks.
///
/// `\r\n` counts as a single break. Fragments that are empty or whitespace-only
/// are dropped; the rest keep their original text and order.
pub fn split_paragraphs(answer: &str) -> Vec<&str> {
    let bytes = answer.as_bytes();
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let run_start = i;
        let mut breaks = 0;
        loop {
            match bytes.get(i) {
                Some(b'\n') => {
                    breaks += 1;
                    i += 1;
                }
                Some(b'\r') if bytes.get(i + 1) == Some(&b'\n') => {
                    breaks += 1;
                    i += 2;
                }
                _ => break,
            }
        }

        if breaks >= 2 {
            paragraphs.push(&answer[start..run_start]);
            start = i;
        } else if breaks == 0 {
            i += 1;
        }
    }
    paragraphs.push(&answer[start..]);

    paragraphs.retain(|p| !p.trim().is_empty());
    paragraphs
}

/// Formats a retrieval score the way the answer header shows it.
pub fn format_score(score: f64) -> String {
    format!("Score: {score:.3}")
}
