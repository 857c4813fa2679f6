//! Human-readable rendering of toolchain errors.

use super::{Error, Sources};
use ansi_term::Colour;

/// Render an error with its file, line, column and the highlighted source
/// lines it covers.
pub fn render(sources: &Sources, error: &Error, colored: bool) -> String {
    let paint = |colour: Colour, s: &str| {
        if colored {
            colour.paint(s).to_string()
        } else {
            s.to_string()
        }
    };
    let mut headline = error.code().to_string();
    if !error.text().is_empty() {
        headline.push_str("; ");
        headline.push_str(error.text());
    }
    let mut out = format!("{}{}\n", paint(Colour::Red, "error: "), headline);
    let location = match error.location() {
        Some(location) => location,
        None => return out,
    };
    let file = sources.get(location.file);
    let (line, column) = file.line_column(location.span.start);
    out.push_str(&format!("at: {}:{}:{}\n", file.name(), line, column));
    out.push_str(&excerpt(file.text(), &location.span, colored));
    out
}

fn excerpt(text: &str, span: &std::ops::Range<usize>, colored: bool) -> String {
    let gray = Colour::Fixed(8);
    let highlight = Colour::Yellow;
    let mut out = String::new();
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let line_end = line_start + line.len();
        let end = span.end.max(span.start + 1);
        if span.start < line_end && end > line_start {
            let body = line.trim_end_matches(&['\n', '\r'][..]);
            let mut decorated = String::new();
            for (offset, ch) in body.char_indices() {
                let index = line_start + offset;
                let s = ch.to_string();
                if !colored {
                    decorated.push_str(&s);
                } else if span.contains(&index) {
                    decorated.push_str(&highlight.paint(s).to_string());
                } else {
                    decorated.push_str(&gray.paint(s).to_string());
                }
            }
            out.push_str(&format!("| {}\n", decorated));
        }
        line_start = line_end;
    }
    out
}
