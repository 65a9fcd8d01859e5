//! quickrun-core - resolve a run configuration into a command line or a debug launch
//!
//! This crate provides functionality to:
//! - Pick an executor for a file by extension, with user overrides
//! - Expand path and command placeholders and build a quoted command line
//! - Build debugger launch descriptors for supported file types
//! - Track the active configuration as the settings change underneath it
//! - Dispatch to a reusable terminal session or a debugger
pub mod command;
pub mod config;
pub mod debug;
pub mod error;
pub mod executor;
pub mod interfaces;
pub mod recovered;
pub mod runner;
pub mod state;
pub mod template;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};

pub use config::{ConfigKind, JsonSettingsStore, MemoryStore, RunConfig};
pub use debug::DebugDescriptor;
pub use executor::{ExecutorMap, ExecutorTable};
pub use recovered::Recovered;
pub use runner::{Dispatch, Mode, RunContext};
pub use state::ActiveConfiguration;
