use super::app::App;
use super::helpers::{format_number, highlight_tokens, wrap_text};
use crate::render_help::render_help;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::{io, time::Duration};
use unicode_width::UnicodeWidthStr;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                draw(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Press {
                    handle_key(app, code, modifiers);
                }
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => app.move_to_start(),
        KeyCode::End => app.move_to_end(),
        KeyCode::Up => app.recall_history(-1),
        KeyCode::Down => app.recall_history(1),
        KeyCode::PageUp => app.history_scroll = app.history_scroll.saturating_add(3),
        KeyCode::PageDown => app.history_scroll = app.history_scroll.saturating_sub(3),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => app.show_help = true,
        _ => {}
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_input(frame, app, layout[0]);
    draw_history(frame, app, layout[1]);
    draw_status(frame, layout[2]);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(format!("> {}", app.input)), inner);

    let prefix: String = app.input.chars().take(app.cursor).collect();
    frame.set_cursor(inner.x + 2 + prefix.width() as u16, inner.y);
}

fn draw_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" History ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let hint = Paragraph::new("No calculations yet. Try: 3 add 5 multiply 2")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    }

    let wrap_width = inner.width.saturating_sub(4) as usize;
    let dim = Style::default().fg(Color::DarkGray);
    let mut items: Vec<ListItem> = Vec::new();

    for entry in &app.history {
        let mut spans = vec![Span::styled("> ", Style::default().fg(Color::Green))];
        spans.extend(highlight_tokens(&entry.input, entry.offending_token()));
        spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
        match &entry.outcome {
            Ok(v) => spans.push(Span::styled(
                format_number(*v),
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Err(e) => spans.push(Span::styled(
                format!("Error: {}", e),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
        }
        items.push(ListItem::new(Line::from(spans)));

        if entry.traced {
            if !entry.steps.is_empty() {
                items.push(ListItem::new(Line::from(Span::styled(
                    "  operators applied last-to-first:".to_string(),
                    dim,
                ))));
                for (i, step) in entry.steps.iter().enumerate() {
                    let text =
                        format!("{}. {} = {}", i + 1, step.operation, format_number(step.result));
                    push_wrapped(&mut items, &text, wrap_width, dim);
                }
            }
            let time = format!("time: {:.6} ms", entry.duration.as_secs_f64() * 1000.0);
            push_wrapped(&mut items, &time, wrap_width, Style::default().fg(Color::Magenta));
        }
    }

    let height = inner.height as usize;
    let max_scroll = items.len().saturating_sub(height);
    if app.history_scroll > max_scroll {
        app.history_scroll = max_scroll;
    }
    let offset = max_scroll - app.history_scroll;

    let list = List::new(items);
    let mut state = ListState::default().with_offset(offset);
    frame.render_stateful_widget(list, inner, &mut state);
}

fn push_wrapped(items: &mut Vec<ListItem<'static>>, text: &str, width: usize, style: Style) {
    for (i, line) in wrap_text(text, width).into_iter().enumerate() {
        let prefix = if i == 0 { "  " } else { "    " };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{}{}", prefix, line),
            style,
        ))));
    }
}

fn draw_status(frame: &mut Frame, area: Rect) {
    let keys = [
        ("Enter", "Calculate"),
        ("↑/↓", "History"),
        ("PgUp/PgDn", "Scroll"),
        ("F1", "Help"),
        ("Ctrl+U", "Clear input"),
        ("quit", "Exit"),
    ];

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {} ", desc), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
