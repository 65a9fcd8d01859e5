//! Placeholder substitution for program paths and command templates

use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

/// Placeholder accepted in a configuration's `program`
pub const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

// Alternation is leftmost-first, so the longer file-name token must come first.
static COMMAND_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:workspaceRoot|dir|fileNameWithoutExt|fileName)")
        .expect("command token pattern is valid")
});

/// An executor is a template iff it contains `$` anywhere
pub fn is_template(executor: &str) -> bool {
    executor.contains('$')
}

/// Replace every `${workspaceFolder}` in a program path
pub fn substitute_program(program: &str, workspace: Option<&Path>) -> String {
    let root = workspace
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_default();
    program.replace(WORKSPACE_FOLDER, &root)
}

/// Expand the command-template tokens against `target_file`
///
/// | token | value |
/// |-------|-------|
/// | `$workspaceRoot` | workspace folder, empty when there is none |
/// | `$dir` | directory containing the target |
/// | `$fileName` | target file name |
/// | `$fileNameWithoutExt` | target file name without its extension |
pub fn substitute_command(template: &str, target_file: &Path, workspace: Option<&Path>) -> String {
    let lossy = |path: Option<&Path>| {
        path.map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    let workspace_root = lossy(workspace);
    let dir = lossy(target_file.parent());
    let file_name = target_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_stem = target_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    COMMAND_TOKENS
        .replace_all(template, |caps: &Captures| match &caps[0] {
            "$workspaceRoot" => workspace_root.clone(),
            "$dir" => dir.clone(),
            "$fileNameWithoutExt" => file_stem.clone(),
            _ => file_name.clone(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_template() {
        assert!(is_template("$dir/run.sh"));
        assert!(is_template("echo costs $5"));
        assert!(!is_template("go run"));
    }

    #[test]
    fn test_substitute_program() {
        let workspace = Path::new("/home/me/proj");
        assert_eq!(
            substitute_program("${workspaceFolder}/src/main.py", Some(workspace)),
            "/home/me/proj/src/main.py"
        );
        assert_eq!(
            substitute_program("${workspaceFolder}/a/${workspaceFolder}", Some(workspace)),
            "/home/me/proj/a//home/me/proj"
        );
        assert_eq!(
            substitute_program("${workspaceFolder}/main.py", None),
            "/main.py"
        );
    }

    #[test]
    fn test_program_ignores_command_tokens() {
        assert_eq!(
            substitute_program("$dir/$fileName", Some(Path::new("/w"))),
            "$dir/$fileName"
        );
    }

    #[test]
    fn test_substitute_command() {
        let result = substitute_command(
            "$dir/run.sh $fileNameWithoutExt",
            Path::new("/proj/src/main.cpp"),
            Some(Path::new("/proj")),
        );
        assert_eq!(result, "/proj/src/run.sh main");
    }

    #[test]
    fn test_substitute_command_replaces_every_occurrence() {
        let result = substitute_command(
            "cd $dir && g++ $fileName -o $fileNameWithoutExt && $dir/$fileNameWithoutExt",
            Path::new("/proj/src/main.cpp"),
            None,
        );
        assert_eq!(
            result,
            "cd /proj/src && g++ main.cpp -o main && /proj/src/main"
        );
    }

    #[test]
    fn test_substitute_command_workspace_root() {
        let target = Path::new("/proj/tools/gen.py");
        assert_eq!(
            substitute_command("$workspaceRoot/.venv/bin/python $fileName", target, Some(Path::new("/proj"))),
            "/proj/.venv/bin/python gen.py"
        );
        assert_eq!(
            substitute_command("$workspaceRoot/bin/run", target, None),
            "/bin/run"
        );
    }

    #[test]
    fn test_unknown_tokens_are_left_alone() {
        let result = substitute_command(
            "$HOME/bin/run ${workspaceFolder} $fileName",
            Path::new("/p/a.sh"),
            Some(Path::new("/p")),
        );
        assert_eq!(result, "$HOME/bin/run ${workspaceFolder} a.sh");
    }
}
