use std::time::{Duration, Instant};
use wordcalc::eval_engine::{evaluate_traced, normalize_whitespace, EvalError, EvaluationTrace, Step};

pub struct HistoryEntry {
    pub input: String,
    pub outcome: Result<f64, EvalError>,
    pub steps: Vec<Step>,
    pub traced: bool,
    pub duration: Duration,
}

impl HistoryEntry {
    /// The token an invalid-token failure complained about, if any.
    /// The history pane underlines it inside the echoed expression.
    pub fn offending_token(&self) -> Option<&str> {
        match &self.outcome {
            Err(EvalError::InvalidToken(t)) => Some(t),
            _ => None,
        }
    }
}

pub struct App {
    pub input: String,
    /// Cursor position in chars, not bytes.
    pub cursor: usize,
    pub history: Vec<HistoryEntry>,
    /// History entry currently recalled into the input line, if any.
    pub recall: Option<usize>,
    /// Lines scrolled up from the bottom of the history pane.
    pub history_scroll: usize,
    pub show_help: bool,
    pub help_scroll: usize,
    pub should_quit: bool,
}

fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or_else(|| s.len())
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            cursor: 0,
            history: Vec::new(),
            recall: None,
            history_scroll: 0,
            show_help: false,
            help_scroll: 0,
            should_quit: false,
        }
    }

    /// Evaluates the input line, or runs one of the host commands
    /// (`quit`, `clear`, `help`, a `details` prefix for tracing). The
    /// evaluator itself never sees those words.
    pub fn submit(&mut self) {
        let raw = self.input.trim().to_string();
        if raw.is_empty() {
            return;
        }

        match raw.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                self.should_quit = true;
                return;
            }
            "clear" | "reset" => {
                self.history.clear();
                self.recall = None;
                self.history_scroll = 0;
                self.clear_input();
                return;
            }
            "help" => {
                self.show_help = true;
                self.clear_input();
                return;
            }
            _ => {}
        }

        let (traced, expr) = if raw == "details" {
            (true, "")
        } else {
            match raw.strip_prefix("details ") {
                Some(rest) => (true, rest.trim()),
                None => (false, raw.as_str()),
            }
        };

        let mut trace = EvaluationTrace::new(traced);
        let started = Instant::now();
        let outcome = evaluate_traced(expr, &mut trace);
        let duration = started.elapsed();

        self.history.push(HistoryEntry {
            input: normalize_whitespace(expr),
            outcome,
            steps: trace.steps,
            traced,
            duration,
        });
        self.recall = None;
        self.history_scroll = 0;
        self.clear_input();
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = char_to_byte(&self.input, self.cursor);
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.delete();
    }

    pub fn delete(&mut self) {
        let idx = char_to_byte(&self.input, self.cursor);
        if let Some(c) = self.input[idx..].chars().next() {
            self.input.drain(idx..idx + c.len_utf8());
        }
    }

    pub fn move_cursor(&mut self, direction: i32) {
        if direction < 0 {
            self.cursor = self.cursor.saturating_sub(1);
        } else {
            self.cursor = (self.cursor + 1).min(self.input.chars().count());
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// Up/Down recall of earlier inputs; walking past the newest entry
    /// returns to an empty line.
    pub fn recall_history(&mut self, direction: i32) {
        if self.history.is_empty() {
            return;
        }
        let next = if direction < 0 {
            match self.recall {
                None => Some(self.history.len() - 1),
                Some(i) => Some(i.saturating_sub(1)),
            }
        } else {
            match self.recall {
                None => return,
                Some(i) if i + 1 < self.history.len() => Some(i + 1),
                Some(_) => None,
            }
        };

        self.recall = next;
        self.input = match next {
            Some(i) => self.history[i].input.clone(),
            None => String::new(),
        };
        self.cursor = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordcalc::eval_engine::{Operator, UnderflowAt};

    fn submitted(input: &str) -> App {
        let mut app = App::new();
        app.input = input.to_string();
        app.cursor = app.input.chars().count();
        app.submit();
        app
    }

    #[test]
    fn submit_records_a_result_entry() {
        let app = submitted("3 add 5 multiply 2");
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].outcome, Ok(13.0));
        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn submit_normalizes_the_echoed_input() {
        let app = submitted("  3   add\t5 ");
        assert_eq!(app.history[0].input, "3 add 5");
    }

    #[test]
    fn offending_token_is_exposed_for_highlighting() {
        let app = submitted("3 foo 5");
        assert_eq!(
            app.history[0].outcome,
            Err(EvalError::InvalidToken("foo".to_string()))
        );
        assert_eq!(app.history[0].offending_token(), Some("foo"));

        let ok = submitted("3 add 5");
        assert_eq!(ok.history[0].offending_token(), None);
    }

    #[test]
    fn quit_sentinel_never_reaches_the_evaluator() {
        let app = submitted("quit");
        assert!(app.should_quit);
        assert!(app.history.is_empty());
    }

    #[test]
    fn details_prefix_turns_on_tracing() {
        let app = submitted("details 3 add 5 multiply 2");
        let entry = &app.history[0];
        assert!(entry.traced);
        assert_eq!(entry.outcome, Ok(13.0));
        assert_eq!(entry.steps.len(), 2);
        assert_eq!(entry.steps[0].operation, "5 multiply 2");
        assert_eq!(entry.steps[1].operation, "3 add 10");
    }

    #[test]
    fn bare_details_fails_like_an_empty_expression() {
        let app = submitted("details ");
        assert_eq!(
            app.history[0].outcome,
            Err(EvalError::StackUnderflow(UnderflowAt::FinalResult))
        );
    }

    #[test]
    fn malformed_input_is_kept_in_history() {
        let app = submitted("add 3");
        assert_eq!(
            app.history[0].outcome,
            Err(EvalError::StackUnderflow(UnderflowAt::Apply(Operator::Add)))
        );
    }

    #[test]
    fn clear_resets_history() {
        let mut app = submitted("3 add 5");
        app.input = "clear".to_string();
        app.submit();
        assert!(app.history.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn recall_walks_back_and_returns_to_empty() {
        let mut app = submitted("1 add 2");
        app.input = "3 add 4".to_string();
        app.cursor = app.input.chars().count();
        app.submit();

        app.recall_history(-1);
        assert_eq!(app.input, "3 add 4");
        app.recall_history(-1);
        assert_eq!(app.input, "1 add 2");
        app.recall_history(1);
        assert_eq!(app.input, "3 add 4");
        app.recall_history(1);
        assert_eq!(app.input, "");
        assert_eq!(app.recall, None);
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut app = App::new();
        app.insert_char('3');
        app.insert_char('€');
        app.insert_char('5');
        assert_eq!(app.input, "3€5");
        app.move_cursor(-1);
        app.backspace();
        assert_eq!(app.input, "35");
        assert_eq!(app.cursor, 1);
    }
}
