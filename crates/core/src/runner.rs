//! Dispatch of run and debug requests

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    command::{resolve_interpreter, synthesize},
    config::{ConfigKind, RunConfig},
    debug::{DebugDescriptor, synthesize_debug},
    error::{Error, Result},
    executor::{ExecutorTable, extension_of},
    interfaces::{
        ClearSignal, ConfigStore, Debugger, EditorContext, ExecutorOverrides, InterpreterLookup,
        NoOverrides, Terminal, TerminalHost,
    },
    recovered::Recovered,
    state::ActiveConfiguration,
    template::substitute_program,
};

/// Name given to the terminal session
pub const TERMINAL_NAME: &str = "quickrun";

/// Pause between a clear request and the next command when the terminal
/// cannot confirm the clear
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// What a dispatch asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Debug,
}

/// What a successful dispatch handed off
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Command line sent to the terminal
    Command(String),
    /// Descriptor passed to the debugger
    Debug(DebugDescriptor),
}

/// Long-lived state and collaborators for run and debug requests
///
/// Owns the active configuration and the single terminal session, so each
/// context is independent of every other.
pub struct RunContext<S: ConfigStore> {
    store: S,
    overrides: Box<dyn ExecutorOverrides>,
    terminals: Box<dyn TerminalHost>,
    debugger: Box<dyn Debugger>,
    interpreter: Option<Box<dyn InterpreterLookup>>,
    active: ActiveConfiguration,
    terminal: Option<Box<dyn Terminal>>,
    settle_delay: Duration,
}

impl<S: ConfigStore> RunContext<S> {
    pub fn new(store: S, terminals: Box<dyn TerminalHost>, debugger: Box<dyn Debugger>) -> Self {
        Self {
            store,
            overrides: Box::new(NoOverrides),
            terminals,
            debugger,
            interpreter: None,
            active: ActiveConfiguration::default(),
            terminal: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_overrides(mut self, overrides: Box<dyn ExecutorOverrides>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_interpreter_lookup(mut self, lookup: Box<dyn InterpreterLookup>) -> Self {
        self.interpreter = Some(lookup);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn set_overrides(&mut self, overrides: Box<dyn ExecutorOverrides>) {
        self.overrides = overrides;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn active(&self) -> &ActiveConfiguration {
        &self.active
    }

    pub fn configurations(&self) -> Vec<RunConfig> {
        self.store.configurations()
    }

    pub fn select(&mut self, config: RunConfig) {
        self.active.select(config);
    }

    /// Select the stored configuration called `name`; first match wins
    pub fn select_by_name(&mut self, name: &str) -> Option<RunConfig> {
        let config = self
            .store
            .configurations()
            .into_iter()
            .find(|config| config.name == name)?;
        self.active.select(config.clone());
        Some(config)
    }

    pub fn add(&mut self, config: RunConfig) -> Result<()> {
        self.active.add(&mut self.store, config)
    }

    /// Re-check the active configuration against the store's current contents.
    /// Returns whether it fell back to the current file.
    pub fn on_store_changed(&mut self) -> bool {
        let snapshot = self.store.configurations();
        self.active.on_store_changed(&snapshot)
    }

    /// Take the terminal session out of the context, e.g. to dispose it on shutdown
    pub fn release_terminal(&mut self) -> Option<Box<dyn Terminal>> {
        self.terminal.take()
    }

    /// Resolve the active configuration against the editor and hand the
    /// result to the terminal (run) or the debugger (debug)
    pub fn execute(&mut self, mode: Mode, editor: &dyn EditorContext) -> Result<Dispatch> {
        let config = self.active.snapshot();
        debug!("Executing {:?} with configuration '{}'", mode, config.name);

        let active_document = editor.active_document();
        let workspace = active_document
            .as_deref()
            .and_then(|document| editor.folder_for(document))
            .or_else(|| editor.workspace_folders().into_iter().next());

        let target_file = self.target_file(&config, active_document, workspace.as_deref())?;

        match mode {
            Mode::Debug => self.debug(&target_file, config.args.as_deref(), workspace.as_deref()),
            Mode::Run => self.run(&config, &target_file, workspace.as_deref()),
        }
    }

    fn target_file(
        &self,
        config: &RunConfig,
        active_document: Option<PathBuf>,
        workspace: Option<&Path>,
    ) -> Result<PathBuf> {
        match config.kind {
            ConfigKind::CurrentFile => active_document.ok_or(Error::NoFileOpen),
            ConfigKind::NamedFile => {
                let program = config
                    .program
                    .as_deref()
                    .ok_or_else(|| Error::MissingProgram {
                        name: config.name.clone(),
                    })?;
                Ok(PathBuf::from(substitute_program(program, workspace)))
            }
        }
    }

    fn debug(
        &self,
        target_file: &Path,
        args: Option<&str>,
        workspace: Option<&Path>,
    ) -> Result<Dispatch> {
        let descriptor =
            synthesize_debug(target_file, args).ok_or_else(|| Error::UnsupportedDebugTarget {
                extension: extension_of(target_file),
            })?;

        info!("Starting debug session for {}", descriptor.program);
        self.debugger.start_debugging(workspace, &descriptor)?;
        Ok(Dispatch::Debug(descriptor))
    }

    fn run(
        &mut self,
        config: &RunConfig,
        target_file: &Path,
        workspace: Option<&Path>,
    ) -> Result<Dispatch> {
        let executor = match &config.command {
            Some(command) => command.clone(),
            None => {
                let extension = extension_of(target_file);
                ExecutorTable::new(self.overrides.as_ref())
                    .resolve(&extension)
                    .ok_or(Error::NoExecutor { extension })?
            }
        };

        let executor = resolve_interpreter(&executor, self.interpreter.as_deref(), workspace);
        let command = synthesize(&executor, target_file, config.args.as_deref(), workspace);

        let clear = self.store.clear_previous_output();
        let settle_delay = self.settle_delay;
        let terminal = self.acquire_terminal(workspace)?;
        terminal.show();
        if clear {
            clear_terminal(&mut **terminal, settle_delay);
        }

        info!("Running: {}", command);
        terminal.send_line(&command)?;
        Ok(Dispatch::Command(command))
    }

    /// The live session if there is one, otherwise a fresh one
    fn acquire_terminal(&mut self, cwd: Option<&Path>) -> Result<&mut Box<dyn Terminal>> {
        let alive = self
            .terminal
            .as_mut()
            .is_some_and(|terminal| terminal.is_running());

        if !alive {
            if self.terminal.is_some() {
                debug!("Previous terminal session has exited");
            }
            self.terminal = Some(self.terminals.create_terminal(TERMINAL_NAME, cwd)?);
        }

        self.terminal
            .as_mut()
            .ok_or_else(|| Error::IoError(std::io::Error::other("terminal session unavailable")))
    }
}

/// Clear the terminal without ever failing the dispatch
///
/// A failed clear recovers as `Completed`: the command is sent right away.
fn clear_terminal(terminal: &mut dyn Terminal, settle_delay: Duration) -> Recovered<ClearSignal> {
    let signal = match terminal.clear() {
        Ok(signal) => Recovered::Resolved(signal),
        Err(e) => Recovered::fallback(ClearSignal::Completed, e.to_string()),
    };

    match &signal {
        Recovered::Resolved(ClearSignal::Issued) => std::thread::sleep(settle_delay),
        Recovered::Resolved(ClearSignal::Completed) => {}
        Recovered::Fallback { reason, .. } => {
            warn!("Failed to clear terminal, sending command anyway: {}", reason)
        }
    }
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Instant;

    struct ClearOnly(io::Result<ClearSignal>);

    impl Terminal for ClearOnly {
        fn show(&mut self) {}

        fn send_line(&mut self, _line: &str) -> io::Result<()> {
            Ok(())
        }

        fn is_running(&mut self) -> bool {
            true
        }

        fn clear(&mut self) -> io::Result<ClearSignal> {
            match &self.0 {
                Ok(signal) => Ok(*signal),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }

        fn dispose(self: Box<Self>) -> io::Result<Option<i32>> {
            Ok(None)
        }
    }

    #[test]
    fn test_failed_clear_recovers_without_waiting() {
        let mut terminal = ClearOnly(Err(io::Error::other("backend gone")));

        let started = Instant::now();
        let signal = clear_terminal(&mut terminal, Duration::from_secs(30));

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            signal,
            Recovered::fallback(ClearSignal::Completed, "backend gone")
        );
    }

    #[test]
    fn test_issued_clear_waits_to_settle() {
        let mut terminal = ClearOnly(Ok(ClearSignal::Issued));

        let started = Instant::now();
        let signal = clear_terminal(&mut terminal, Duration::from_millis(20));

        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(signal, Recovered::Resolved(ClearSignal::Issued));
    }
}
