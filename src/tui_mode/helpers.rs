use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use wordcalc::eval_engine::Operator;

/// Wraps text at word boundaries to the given display width. Words
/// wider than a whole line are hard-split, always consuming at least
/// one char per line so a narrow pane cannot loop.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut chunk = String::new();
            let mut chunk_width = 0;
            for c in word.chars() {
                let w = UnicodeWidthChar::width_cjk(c).unwrap_or(1);
                if !chunk.is_empty() && chunk_width + w > width {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
                chunk.push(c);
                chunk_width += w;
            }
            if !chunk.is_empty() {
                lines.push(chunk);
            }
            continue;
        }

        let sep = if current.is_empty() { 0 } else { 1 };
        if current_width + sep + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

pub fn format_number(x: f64) -> String {
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Colors an expression word by word: operator words yellow, numbers
/// green, everything else cyan. When evaluation stopped on an invalid
/// token, its first occurrence is marked red and underlined -- any
/// earlier identical token would itself have failed, so the first
/// match is the one evaluation reached.
pub fn highlight_tokens(expr: &str, offending: Option<&str>) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let number_style = Style::default().fg(Color::LightGreen);
    let offender_style = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut offending = offending;
    let mut spans = Vec::new();

    for (i, word) in expr.split_whitespace().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }

        let style = if offending == Some(word) {
            offending = None;
            offender_style
        } else if Operator::from_word(word).is_some() {
            operator_style
        } else if word.parse::<f64>().is_ok() {
            number_style
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(word.to_string(), style));
    }

    spans
}
