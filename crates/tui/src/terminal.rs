//! Terminal setup and teardown.
//!
//! The board takes over the whole terminal: raw mode, the alternate screen,
//! and mouse capture so cards can be dragged. Everything switched on by
//! [`setup_terminal`] is switched off again by [`restore_terminal`], and by
//! the panic hook from [`install_panic_hook`] if the program dies first.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// The terminal the board draws on.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Errors from switching the terminal in and out of board mode.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Entering raw mode, the alternate screen, or mouse capture failed.
    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),

    /// Leaving board mode failed; the shell may need a `reset`.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Enters raw mode and the alternate screen with mouse capture enabled.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if any step fails.
///
/// # Examples
///
/// ```no_run
/// use taskboard_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal()?;
/// terminal::restore_terminal(&mut terminal)?;
/// # Ok::<(), taskboard_tui::terminal::TerminalError>(())
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(TerminalError::Setup)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)
}

/// Undoes [`setup_terminal`] and shows the cursor again.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if any step fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    disable_raw_mode().map_err(TerminalError::Restore)?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)
}

/// Installs a panic hook that leaves board mode before the previous hook
/// prints the panic.
///
/// Call once, before [`setup_terminal`].
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best effort; the panic message matters more than these errors.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        previous(info);
    }));
}
