//! The python interpreter special case

use crate::{interfaces::InterpreterLookup, recovered::Recovered};
use std::path::Path;
use tracing::{debug, warn};

/// Executor used when no interpreter could be looked up
pub const PYTHON_FALLBACK: &str = "python";

/// Whether `executor` names the bare python interpreter
pub fn is_python(executor: &str) -> bool {
    matches!(executor.trim(), "python" | "python3")
}

/// Ask the lookup collaborator for an interpreter, never failing
pub fn lookup_interpreter(
    lookup: Option<&dyn InterpreterLookup>,
    scope: Option<&Path>,
) -> Recovered<String> {
    let Some(lookup) = lookup else {
        return Recovered::fallback(
            PYTHON_FALLBACK.to_string(),
            "no interpreter lookup available",
        );
    };

    match lookup.interpreter_path(scope) {
        Ok(path) if !path.trim().is_empty() => Recovered::Resolved(path),
        Ok(_) => Recovered::fallback(
            PYTHON_FALLBACK.to_string(),
            "interpreter lookup returned an empty path",
        ),
        Err(e) => Recovered::fallback(PYTHON_FALLBACK.to_string(), e.to_string()),
    }
}

/// Replace a bare `python`/`python3` executor with the looked-up interpreter
///
/// Runs before synthesis so that an interpreter path containing spaces is
/// quoted like any other executor.
pub fn resolve_interpreter(
    executor: &str,
    lookup: Option<&dyn InterpreterLookup>,
    scope: Option<&Path>,
) -> String {
    if !is_python(executor) {
        return executor.to_string();
    }

    match lookup_interpreter(lookup, scope) {
        Recovered::Resolved(path) => {
            debug!("Using python interpreter {}", path);
            path
        }
        Recovered::Fallback { value, reason } => {
            warn!("Falling back to '{}': {}", value, reason);
            value
        }
    }
}
