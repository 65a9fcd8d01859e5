use quickrun_core::interfaces::{ClearSignal, Terminal, TerminalHost};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use tracing::debug;

/// Clears the screen and the scrollback, then homes the cursor
#[cfg(unix)]
const CLEAR_LINE: &str = r"printf '\033[2J\033[3J\033[H'";

#[cfg(windows)]
const CLEAR_LINE: &str = "cls";

#[cfg(unix)]
fn shell_command() -> Command {
    Command::new("sh")
}

#[cfg(windows)]
fn shell_command() -> Command {
    let mut command = Command::new("cmd");
    command.arg("/Q");
    command
}

/// Starts a shell that reads command lines from a pipe and writes to the
/// user's terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellHost;

impl TerminalHost for ShellHost {
    fn create_terminal(&self, name: &str, cwd: Option<&Path>) -> io::Result<Box<dyn Terminal>> {
        Ok(Box::new(ShellTerminal::spawn(name, cwd, Stdio::inherit())?))
    }
}

/// A shell process fed through its standard input
pub struct ShellTerminal {
    name: String,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl ShellTerminal {
    fn spawn(name: &str, cwd: Option<&Path>, output: Stdio) -> io::Result<Self> {
        let mut command = shell_command();
        command
            .stdin(Stdio::piped())
            .stdout(output)
            .stderr(Stdio::inherit());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let mut child = command.spawn()?;
        let stdin = child.stdin.take();
        debug!("Started terminal '{}' (pid {})", name, child.id());

        Ok(Self {
            name: name.to_string(),
            child,
            stdin,
        })
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "terminal input is closed"))?;
        stdin.write_all(line.as_bytes())?;
        stdin.write_all(b"\n")?;
        stdin.flush()
    }
}

impl Terminal for ShellTerminal {
    fn show(&mut self) {
        // Output already goes to the user's terminal.
    }

    fn send_line(&mut self, line: &str) -> io::Result<()> {
        eprintln!("$ {line}");
        self.write_line(line)
    }

    fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Queued behind earlier commands, so their output cannot land after it
    fn clear(&mut self) -> io::Result<ClearSignal> {
        self.write_line(CLEAR_LINE)?;
        Ok(ClearSignal::Completed)
    }

    /// Closes the shell's input and waits for queued commands to finish
    fn dispose(mut self: Box<Self>) -> io::Result<Option<i32>> {
        drop(self.stdin.take());
        let status = self.child.wait()?;
        debug!("Terminal '{}' exited with {}", self.name, status);
        Ok(status.code())
    }
}

/// Prints command lines instead of running them
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunHost;

impl TerminalHost for DryRunHost {
    fn create_terminal(&self, _name: &str, _cwd: Option<&Path>) -> io::Result<Box<dyn Terminal>> {
        Ok(Box::new(DryRunTerminal))
    }
}

pub struct DryRunTerminal;

impl Terminal for DryRunTerminal {
    fn show(&mut self) {}

    fn send_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }

    fn is_running(&mut self) -> bool {
        true
    }

    fn clear(&mut self) -> io::Result<ClearSignal> {
        Ok(ClearSignal::Completed)
    }

    fn dispose(self: Box<Self>) -> io::Result<Option<i32>> {
        Ok(None)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_shell_terminal_runs_lines_and_exits() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut terminal = ShellHost
            .create_terminal("test", Some(temp.path()))
            .unwrap();

        assert!(terminal.is_running());
        terminal.send_line("echo hello > out.txt").unwrap();
        terminal.send_line("exit 3").unwrap();

        assert_eq!(terminal.dispose().unwrap(), Some(3));
        let written = std::fs::read_to_string(temp.path().join("out.txt")).unwrap();
        assert_eq!(written.trim(), "hello");
    }

    #[test]
    fn test_clear_runs_in_queue_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let output_path = temp.path().join("output.txt");
        let output = std::fs::File::create(&output_path).unwrap();
        let mut terminal: Box<dyn Terminal> = Box::new(
            ShellTerminal::spawn("test", Some(temp.path()), Stdio::from(output)).unwrap(),
        );

        terminal.send_line("echo before").unwrap();
        assert_eq!(terminal.clear().unwrap(), ClearSignal::Completed);
        terminal.send_line("echo after").unwrap();

        assert_eq!(terminal.dispose().unwrap(), Some(0));
        let written = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(written, "before\n\x1b[2J\x1b[3J\x1b[Hafter\n");
    }

    #[test]
    fn test_exited_shell_is_not_running() {
        let mut terminal = ShellHost.create_terminal("test", None).unwrap();
        terminal.send_line("exit 0").unwrap();

        let mut running = true;
        for _ in 0..100 {
            running = terminal.is_running();
            if !running {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(!running);
    }
}
