use quickrun_core::{DebugDescriptor, interfaces::Debugger};
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;

/// Prints the launch request as JSON for an external debug adapter client
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDebugger;

impl Debugger for JsonDebugger {
    fn start_debugging(
        &self,
        folder: Option<&Path>,
        descriptor: &DebugDescriptor,
    ) -> io::Result<()> {
        let request = json!({
            "workspaceFolder": folder.map(|f| f.display().to_string()),
            "configuration": descriptor,
        });
        let rendered = serde_json::to_string_pretty(&request).map_err(io::Error::other)?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
        stdout.flush()
    }
}
