use std::{io, panic};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};

/// Restores the terminal before the default panic report is printed, so the
/// message is readable instead of landing inside the alternate screen.
pub fn install_terminal_restore_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        tracing::error!(panic = %panic_info, "matrix-terminal panicked");
        previous(panic_info);
    }));
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
