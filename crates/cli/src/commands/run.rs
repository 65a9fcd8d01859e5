use anyhow::{Context, Result};
use quickrun_core::{Dispatch, Mode, interfaces::TerminalHost};
use std::path::Path;
use tracing::{debug, info};

use super::select::select_configuration;
use crate::host::{CliEditor, DryRunHost, ShellHost};
use crate::workspace::Workspace;

/// Run or debug `file` once and wait for the terminal to finish
///
/// `--config` only applies to this invocation; the remembered selection is
/// left alone.
pub fn run_command(
    workspace_dir: Option<&Path>,
    mode: Mode,
    file: Option<&str>,
    config: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let workspace = Workspace::open(workspace_dir)?;
    let host: Box<dyn TerminalHost> = if dry_run || mode == Mode::Debug {
        Box::new(DryRunHost)
    } else {
        Box::new(ShellHost)
    };
    let mut context = workspace.context(host)?;

    if let Some(name) = config {
        select_configuration(&mut context, name)?;
    }
    debug!("Active configuration: {}", context.active().name());

    let editor = CliEditor::new(workspace.folders()).with_file(file)?;
    match context.execute(mode, &editor)? {
        Dispatch::Command(command) => debug!("Dispatched: {}", command),
        Dispatch::Debug(descriptor) => debug!("Debug launch for {}", descriptor.program),
    }

    if let Some(terminal) = context.release_terminal() {
        let code = terminal
            .dispose()
            .context("Failed to wait for the terminal to finish")?;
        if let Some(code) = code.filter(|code| *code != 0) {
            info!("Command exited with status {}", code);
            std::process::exit(code);
        }
    }

    Ok(())
}
