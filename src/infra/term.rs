//! Terminal cursor and screen control for the live display.
//!
//! All writes here are best effort: a terminal that rejects control
//! sequences must not take the benchmark down with it.

use std::io;

use crossterm::{cursor, execute, terminal};

/// Hides the terminal cursor for the duration of a live run.
pub fn hide_cursor() {
    let _ = execute!(io::stdout(), cursor::Hide);
}

/// Restores the cursor. Called on every exit path, including failures
/// and operator interrupts.
pub fn show_cursor() {
    let _ = execute!(io::stdout(), cursor::Show);
}

/// Clears the screen and homes the cursor, ahead of a full reprint.
pub fn clear() {
    let _ = execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    );
}

/// Current terminal size as (columns, rows), with a conservative fallback
/// for non-tty environments.
pub fn size() -> (usize, usize) {
    terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}
