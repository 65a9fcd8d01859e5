//! Long-lived session: one action per line on standard input
//!
//! The session keeps a single run context, so the terminal is reused between
//! runs and the active configuration follows edits to the settings file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quickrun_core::{Dispatch, JsonSettingsStore, Mode, RunContext, interfaces::TerminalHost};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use super::add::{AddArgs, add_configuration};
use super::list::print_list;
use super::select::select_configuration;
use crate::host::{CliEditor, DryRunHost, ShellHost};
use crate::watcher::SettingsWatcher;
use crate::workspace::Workspace;

#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run the active configuration, optionally opening FILE first
    Run { file: Option<String> },
    /// Debug the active configuration, optionally opening FILE first
    Debug { file: Option<String> },
    /// Make FILE the active document
    Open { file: String },
    /// Make a configuration active ("current" for the active file)
    Select { name: String },
    /// Save a new configuration
    Add(AddArgs),
    /// List saved configurations
    List,
    /// Show the active configuration
    Status,
    /// End the session
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    workspace: Workspace,
    context: RunContext<JsonSettingsStore>,
    editor: CliEditor,
    watcher: Option<SettingsWatcher>,
}

impl Session {
    fn new(workspace: Workspace, terminals: Box<dyn TerminalHost>) -> Result<Self> {
        let context = workspace.context(terminals)?;
        let editor = CliEditor::new(workspace.folders());
        let watcher = match SettingsWatcher::new(workspace.settings_path()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("Settings changes will not be picked up: {:#}", e);
                None
            }
        };

        Ok(Self {
            workspace,
            context,
            editor,
            watcher,
        })
    }

    fn handle(&mut self, line: &str) -> Result<Flow> {
        let words = shell_words::split(line).context("Failed to split input line")?;
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let action = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed.action,
            Err(e) => {
                e.print()?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Session action: {:?}", action);

        self.refresh()?;

        match action {
            Action::Run { file } => self.dispatch(Mode::Run, file.as_deref())?,
            Action::Debug { file } => self.dispatch(Mode::Debug, file.as_deref())?,
            Action::Open { file } => self.editor.open(&file)?,
            Action::Select { name } => {
                select_configuration(&mut self.context, &name)?;
                self.workspace.remember(&self.context)?;
                println!("{}", self.context.active().label());
            }
            Action::Add(args) => {
                add_configuration(&mut self.context, &args)?;
                self.workspace.remember(&self.context)?;
            }
            Action::List => print_list(&self.context),
            Action::Status => println!("{}", self.context.active().label()),
            Action::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Pick up out-of-band edits to the settings file
    fn refresh(&mut self) -> Result<()> {
        if !self.watcher.as_ref().is_some_and(SettingsWatcher::changed) {
            return Ok(());
        }
        debug!("Settings file changed, reloading");
        if self.workspace.refresh(&mut self.context)? {
            info!("Active configuration was removed, now using {}", self.context.active().name());
        }
        Ok(())
    }

    fn dispatch(&mut self, mode: Mode, file: Option<&str>) -> Result<()> {
        if let Some(file) = file {
            self.editor.open(file)?;
        }
        match self.context.execute(mode, &self.editor)? {
            Dispatch::Command(command) => debug!("Dispatched: {}", command),
            Dispatch::Debug(descriptor) => debug!("Debug launch for {}", descriptor.program),
        }
        Ok(())
    }

    fn prompt(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{} > ", self.context.active().label())?;
        stdout.flush()?;
        Ok(())
    }

    /// Close the terminal and wait for anything still queued in it
    fn finish(mut self) -> Result<()> {
        self.workspace.remember(&self.context)?;
        if let Some(terminal) = self.context.release_terminal() {
            let code = terminal
                .dispose()
                .context("Failed to wait for the terminal to finish")?;
            debug!("Terminal closed with {:?}", code);
        }
        Ok(())
    }
}

pub fn session_command(workspace_dir: Option<&Path>, dry_run: bool) -> Result<()> {
    let workspace = Workspace::open(workspace_dir)?;
    let host: Box<dyn TerminalHost> = if dry_run {
        Box::new(DryRunHost)
    } else {
        Box::new(ShellHost)
    };
    let mut session = Session::new(workspace, host)?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            session.prompt()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from standard input")?;

        match session.handle(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("error: {:#}", e),
        }
    }

    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickrun_core::interfaces::ConfigStore;
    use std::fs;
    use tempfile::TempDir;

    fn session(temp: &TempDir) -> Session {
        let workspace = Workspace::open(Some(temp.path())).unwrap();
        Session::new(workspace, Box::new(DryRunHost)).unwrap()
    }

    #[test]
    fn test_blank_and_quit() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp);

        assert_eq!(session.handle("   ").unwrap(), Flow::Continue);
        assert_eq!(session.handle("quit").unwrap(), Flow::Quit);
        assert_eq!(session.handle("exit").unwrap(), Flow::Quit);
    }

    #[test]
    fn test_add_and_select_persist() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp);

        session
            .handle(r#"add --name "My Build" --program '${workspaceFolder}/main.c' --command gcc"#)
            .unwrap();
        assert_eq!(session.context.active().name(), "My Build");
        assert_eq!(session.context.store().configurations().len(), 1);

        session.handle("select current").unwrap();
        assert!(session.context.active().is_current_file());

        let settings = fs::read_to_string(session.workspace.settings_path()).unwrap();
        assert!(settings.contains("${workspaceFolder}/main.c"));
    }

    #[test]
    fn test_errors_leave_session_usable() {
        let temp = TempDir::new().unwrap();
        let mut session = session(&temp);

        assert!(session.handle("select Missing").is_err());
        assert!(session.handle("run").is_err());
        assert_eq!(session.handle("not-an-action").unwrap(), Flow::Continue);
        assert_eq!(session.handle("status").unwrap(), Flow::Continue);
    }

    #[test]
    fn test_run_reuses_open_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.js"), "").unwrap();
        let mut session = session(&temp);

        let file = temp.path().join("main.js");
        session
            .handle(&format!("open '{}'", file.display()))
            .unwrap();
        assert_eq!(session.editor.active(), Some(file.as_path()));

        session.handle("run").unwrap();
        session.handle("run").unwrap();
        session.finish().unwrap();
    }
}
