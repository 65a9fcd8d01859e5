use crate::template::{is_template, substitute_command};
use std::path::Path;
use tracing::trace;

/// Which synthesis path an executor selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Executor contains `$`: expanded and used as the whole command
    Template,
    /// Executor is a program name: `executor target args`
    Literal,
}

impl SynthesisMode {
    pub fn of(executor: &str) -> Self {
        if is_template(executor) {
            Self::Template
        } else {
            Self::Literal
        }
    }
}

/// Wrap `s` in double quotes iff it contains a space
pub fn quote(s: &str) -> String {
    if s.contains(' ') {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// Build the single command line sent to the terminal
///
/// Templates are expanded and used verbatim, so `args` must be part of the
/// template if wanted. Literal executors get the quoted target and the raw
/// `args` appended; `args` is never quoted or re-split.
pub fn synthesize(
    executor: &str,
    target_file: &Path,
    args: Option<&str>,
    workspace: Option<&Path>,
) -> String {
    let command = match SynthesisMode::of(executor) {
        SynthesisMode::Template => substitute_command(executor, target_file, workspace),
        SynthesisMode::Literal => {
            let mut command = format!(
                "{} {}",
                quote(executor),
                quote(&target_file.to_string_lossy())
            );
            if let Some(args) = args.filter(|args| !args.is_empty()) {
                command.push(' ');
                command.push_str(args);
            }
            command
        }
    };
    trace!("Synthesized command: {}", command);
    command
}
