//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{JournalError, Result};

/// Terminal driven by the crossterm backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enables raw mode and switches to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if stdout is not a TTY or the terminal cannot be
/// switched into raw mode.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(JournalError::Io(
            "the trade form needs an interactive terminal; use `journal-calc calc` instead"
                .to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| JournalError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        JournalError::Io(format!("failed to enter alternate screen: {e}"))
    })?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        JournalError::Io(format!("failed to create terminal: {e}"))
    })
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| JournalError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| JournalError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| JournalError::Io(e.to_string()))?;
    Ok(())
}
