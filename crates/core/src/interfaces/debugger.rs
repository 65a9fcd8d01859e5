//! Debugger interface

use crate::debug::DebugDescriptor;
use std::{io, path::Path};

/// Starts debug sessions. The outcome of the session itself is not observed.
pub trait Debugger {
    fn start_debugging(&self, folder: Option<&Path>, descriptor: &DebugDescriptor)
    -> io::Result<()>;
}
