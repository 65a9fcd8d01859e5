//! Terminal session interface

use std::{io, path::Path};

/// What a terminal reports after a clear request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearSignal {
    /// The clear has taken effect; text can be sent right away
    Completed,
    /// The clear was only requested; give the terminal time to settle
    Issued,
}

/// A live terminal session that accepts command lines
pub trait Terminal {
    /// Bring the terminal to the foreground
    fn show(&mut self);

    /// Send one line; the terminal appends the trailing newline
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Exit-status query: `true` while the session has not exited
    fn is_running(&mut self) -> bool;

    /// Clear previous output
    fn clear(&mut self) -> io::Result<ClearSignal>;

    /// Close the session, returning its exit code when known
    fn dispose(self: Box<Self>) -> io::Result<Option<i32>>;
}

/// Creates terminal sessions
pub trait TerminalHost {
    fn create_terminal(&self, name: &str, cwd: Option<&Path>) -> io::Result<Box<dyn Terminal>>;
}
