use quickrun_core::interfaces::{InterpreterLookup, LookupError};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Virtual environment directories checked in the workspace, in order
const VENV_DIRS: [&str; 4] = [".venv", "venv", "env", "virtualenv"];

/// Interpreter locations inside a virtual environment
const VENV_INTERPRETERS: [&str; 2] = ["bin/python", "Scripts/python.exe"];

/// Finds python the way a shell user would expect: active virtualenv,
/// workspace virtualenv, then `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonLookup;

impl PythonLookup {
    fn venv_interpreter(venv: &Path) -> Option<PathBuf> {
        VENV_INTERPRETERS
            .iter()
            .map(|relative| venv.join(relative))
            .find(|candidate| candidate.is_file())
    }
}

impl InterpreterLookup for PythonLookup {
    fn interpreter_path(&self, scope: Option<&Path>) -> Result<String, LookupError> {
        if let Some(venv) = std::env::var_os("VIRTUAL_ENV") {
            if let Some(python) = Self::venv_interpreter(Path::new(&venv)) {
                debug!("Using active virtualenv interpreter {}", python.display());
                return Ok(python.display().to_string());
            }
        }

        if let Some(root) = scope {
            for dir in VENV_DIRS {
                if let Some(python) = Self::venv_interpreter(&root.join(dir)) {
                    debug!("Using workspace virtualenv interpreter {}", python.display());
                    return Ok(python.display().to_string());
                }
            }
        }

        for name in ["python3", "python"] {
            match which::which(name) {
                Ok(path) => return Ok(path.display().to_string()),
                Err(e) => trace!("{} not on PATH: {}", name, e),
            }
        }

        Err(LookupError::NotFound)
    }
}
