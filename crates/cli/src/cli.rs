use anyhow::Result;
use clap::{Parser, Subcommand};
use quickrun_core::Mode;
use std::path::PathBuf;

use crate::commands::{
    AddArgs, add_command, list_command, run_command, select_command, session_command,
    status_command,
};

/// Run or debug the current file, or a saved configuration
#[derive(Parser, Debug)]
#[command(name = "quickrun")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=quickrun=debug    Enable debug logging")]
pub struct Cli {
    /// Workspace directory (defaults to the current directory)
    #[arg(short = 'w', long = "workspace", global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a file with the active configuration
    #[command(visible_alias = "r")]
    Run {
        /// File to treat as the active document
        file: Option<String>,

        /// Use this configuration for this invocation only
        #[arg(short = 'c', long = "config")]
        config: Option<String>,

        /// Print the command without executing it
        #[arg(short = 'd', long = "dry-run")]
        dry_run: bool,
    },
    /// Print the debugger launch request for a file
    #[command(visible_alias = "d")]
    Debug {
        /// File to treat as the active document
        file: Option<String>,

        /// Use this configuration for this invocation only
        #[arg(short = 'c', long = "config")]
        config: Option<String>,
    },
    /// Make a configuration active ("current" for the active file)
    Select {
        name: String,
    },
    /// Save a new configuration
    Add(AddArgs),
    /// List saved configurations
    #[command(visible_alias = "ls")]
    List,
    /// Show the active configuration
    Status,
    /// Read actions from standard input, reusing one terminal
    Session {
        /// Print commands instead of executing them
        #[arg(short = 'd', long = "dry-run")]
        dry_run: bool,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let workspace = self.workspace.as_deref();
        match self.command {
            Commands::Run {
                file,
                config,
                dry_run,
            } => run_command(
                workspace,
                Mode::Run,
                file.as_deref(),
                config.as_deref(),
                dry_run,
            ),
            Commands::Debug { file, config } => run_command(
                workspace,
                Mode::Debug,
                file.as_deref(),
                config.as_deref(),
                true,
            ),
            Commands::Select { name } => select_command(workspace, &name),
            Commands::Add(args) => add_command(workspace, args),
            Commands::List => list_command(workspace),
            Commands::Status => status_command(workspace),
            Commands::Session { dry_run } => session_command(workspace, dry_run),
        }
    }
}
