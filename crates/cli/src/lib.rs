pub mod cli;
pub mod commands;
pub mod host;
pub mod watcher;
pub mod workspace;

// Re-export commonly used items
pub use cli::{Cli, Commands};
pub use workspace::Workspace;
