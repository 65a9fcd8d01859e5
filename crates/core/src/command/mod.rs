//! Shell command synthesis

pub mod interpreter;
pub mod synthesizer;

pub use interpreter::{PYTHON_FALLBACK, is_python, lookup_interpreter, resolve_interpreter};
pub use synthesizer::{SynthesisMode, quote, synthesize};
