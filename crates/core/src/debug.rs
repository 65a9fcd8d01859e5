//! Debug launch descriptors

use crate::executor::extension_of;
use serde::Serialize;
use std::path::Path;

/// Files the node adapter should step over
pub const NODE_INTERNALS: &str = "<node_internals>/**";

/// Debug adapter a descriptor is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugAdapter {
    Python,
    Node,
}

/// Where the python adapter sends program output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsoleMode {
    IntegratedTerminal,
}

/// Launch request handed to the debugger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugDescriptor {
    #[serde(rename = "type")]
    pub adapter: DebugAdapter,
    pub request: &'static str,
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skip_files: Vec<String>,
}

impl DebugDescriptor {
    /// Whether the adapter is told to skip runtime internals
    pub fn skips_internals(&self) -> bool {
        self.skip_files.iter().any(|glob| glob == NODE_INTERNALS)
    }
}

/// Naive whitespace split; absent or blank args give no arguments
pub fn split_args(args: Option<&str>) -> Vec<String> {
    args.map(|args| args.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Descriptor for debugging `file_path`, or `None` when its type has no mapping
pub fn synthesize_debug(file_path: &Path, args: Option<&str>) -> Option<DebugDescriptor> {
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (adapter, console, skip_files) = match extension_of(file_path).as_str() {
        ".py" => (
            DebugAdapter::Python,
            Some(ConsoleMode::IntegratedTerminal),
            Vec::new(),
        ),
        ".js" | ".ts" => (DebugAdapter::Node, None, vec![NODE_INTERNALS.to_string()]),
        _ => return None,
    };

    Some(DebugDescriptor {
        adapter,
        request: "launch",
        name: format!("Debug {file_name}"),
        program: file_path.to_string_lossy().into_owned(),
        args: split_args(args),
        console,
        skip_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_descriptor() {
        let descriptor = synthesize_debug(Path::new("/p/a.py"), Some("--x --y")).unwrap();

        assert_eq!(descriptor.adapter, DebugAdapter::Python);
        assert_eq!(descriptor.request, "launch");
        assert_eq!(descriptor.program, "/p/a.py");
        assert_eq!(descriptor.args, vec!["--x", "--y"]);
        assert_eq!(descriptor.console, Some(ConsoleMode::IntegratedTerminal));
        assert!(!descriptor.skips_internals());
    }

    #[test]
    fn test_node_descriptor() {
        for file in ["/p/server.js", "/p/server.ts"] {
            let descriptor = synthesize_debug(Path::new(file), None).unwrap();
            assert_eq!(descriptor.adapter, DebugAdapter::Node);
            assert!(descriptor.args.is_empty());
            assert!(descriptor.console.is_none());
            assert!(descriptor.skips_internals());
        }
    }

    #[test]
    fn test_unsupported_extensions() {
        assert!(synthesize_debug(Path::new("/p/a.md"), Some("")).is_none());
        assert!(synthesize_debug(Path::new("/p/main.go"), None).is_none());
        assert!(synthesize_debug(Path::new("/p/Makefile"), None).is_none());
    }

    #[test]
    fn test_split_args() {
        assert_eq!(split_args(Some("  -v   --out dir ")), vec!["-v", "--out", "dir"]);
        assert!(split_args(Some("")).is_empty());
        assert!(split_args(None).is_empty());
    }

    #[test]
    fn test_python_descriptor_json() {
        let descriptor = synthesize_debug(Path::new("/p/a.py"), Some("--x")).unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        insta::assert_snapshot!(json, @r#"{"type":"python","request":"launch","name":"Debug a.py","program":"/p/a.py","args":["--x"],"console":"integratedTerminal"}"#);
    }

    #[test]
    fn test_node_descriptor_json() {
        let descriptor = synthesize_debug(Path::new("/p/a.ts"), None).unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        insta::assert_snapshot!(json, @r#"{"type":"node","request":"launch","name":"Debug a.ts","program":"/p/a.ts","args":[],"skipFiles":["<node_internals>/**"]}"#);
    }
}
