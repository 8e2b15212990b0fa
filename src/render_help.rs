use crate::tui_mode::app::App;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" WordCalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled("WordCalc - Word-Operator Terminal Calculator", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Operations:", Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))),
        Line::from("  add      : Addition        (e.g., 3 add 5 = 8)"),
        Line::from("  subtract : Subtraction     (e.g., 10 subtract 4 = 6)"),
        Line::from("  multiply : Multiplication  (e.g., 6 multiply 7 = 42)"),
        Line::from("  divide   : Division        (e.g., 15 divide 3 = 5)"),
        Line::from(""),
        Line::from(Span::styled("Evaluation Order:", Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))),
        Line::from("  Numbers and operators collect on two stacks as they are read,"),
        Line::from("  then operators apply last-to-first. There is no precedence and"),
        Line::from("  no parentheses:"),
        Line::from("    3 add 5 multiply 2 = 13   (5 multiply 2 first, then 3 add 10)"),
        Line::from("  Operator words are lowercase and exact: 'Add' is an error."),
        Line::from(""),
        Line::from(Span::styled("Advanced Features:", Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))),
        Line::from("  details <expression> : Show step-by-step evaluation with time"),
        Line::from("  clear : Clear calculation history"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  help : Show this help screen"),
        Line::from("  quit : Exit the calculator"),
        Line::from(""),
        Line::from(Span::styled("Navigation:", Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Recall earlier inputs"),
        Line::from("  PgUp/PgDn : Scroll the history pane"),
        Line::from(""),
        Line::from(Span::styled("Examples:", Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))),
        Line::from("  3 add 5"),
        Line::from("  1.5 multiply -2"),
        Line::from("  100 divide 4 subtract 5"),
        Line::from("  details 3 add 5 multiply 2"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
