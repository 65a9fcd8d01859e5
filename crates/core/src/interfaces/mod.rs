//! Collaborator interfaces
//!
//! The engine never touches the editor, the terminal, the debugger or the
//! settings file directly. Hosts implement these traits and hand them to a
//! [`RunContext`](crate::runner::RunContext).

pub mod debugger;
pub mod editor;
pub mod interpreter;
pub mod overrides;
pub mod store;
pub mod terminal;

pub use debugger::Debugger;
pub use editor::EditorContext;
pub use interpreter::{InterpreterLookup, LookupError};
pub use overrides::{ExecutorOverrides, NoOverrides};
pub use store::ConfigStore;
pub use terminal::{ClearSignal, Terminal, TerminalHost};
