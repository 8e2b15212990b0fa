pub mod app;
mod helpers;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    cursor::{SetCursorStyle, Show},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub(crate) fn run_tui() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        SetTitle("wordcalc"),
        SetCursorStyle::BlinkingBar
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new();
    let outcome = ui::run_ui_loop(&mut terminal, &mut app);

    // Restore the terminal even when the UI loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        Show,
        SetCursorStyle::DefaultUserShape
    )?;
    outcome
}
