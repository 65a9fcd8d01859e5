//! Concrete collaborators for running from a plain terminal

pub mod debugger;
pub mod editor;
pub mod interpreter;
pub mod terminal;

pub use debugger::JsonDebugger;
pub use editor::CliEditor;
pub use interpreter::PythonLookup;
pub use terminal::{DryRunHost, ShellHost};
