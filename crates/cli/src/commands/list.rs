use anyhow::Result;
use quickrun_core::{ActiveConfiguration, ConfigKind, RunConfig, RunContext, interfaces::ConfigStore};
use std::path::Path;

use crate::host::DryRunHost;
use crate::workspace::Workspace;

/// One line per configuration, the active one marked with `*`
pub fn render_list(configurations: &[RunConfig], active: &ActiveConfiguration) -> String {
    let mut lines = Vec::with_capacity(configurations.len() + 1);
    let marker = |selected: bool| if selected { '*' } else { ' ' };

    lines.push(format!(
        "{} {}",
        marker(active.is_current_file()),
        quickrun_core::config::CURRENT_FILE_NAME
    ));

    // Lookups take the first entry with a name, so only that one can be active.
    let mut marked = active.is_current_file();
    for config in configurations {
        let selected = !marked && config.name == active.name();
        marked |= selected;

        let target = match config.kind {
            ConfigKind::CurrentFile => "(active file)".to_string(),
            ConfigKind::NamedFile => config.program.clone().unwrap_or_default(),
        };
        let mut line = format!("{} {}  {}", marker(selected), config.name, target);
        if let Some(command) = &config.command {
            line.push_str(&format!("  [{command}]"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

pub fn print_list<S: ConfigStore>(context: &RunContext<S>) {
    println!("{}", render_list(&context.configurations(), context.active()));
}

pub fn list_command(workspace_dir: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(workspace_dir)?;
    let context = workspace.context(Box::new(DryRunHost))?;
    print_list(&context);
    Ok(())
}

pub fn status_command(workspace_dir: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(workspace_dir)?;
    let context = workspace.context(Box::new(DryRunHost))?;
    println!("{}", context.active().label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_first_match_only() {
        let build = RunConfig::named_file("Build", "${workspaceFolder}/main.c").with_command("gcc");
        let duplicate = RunConfig::named_file("Build", "other.c");
        let tests = RunConfig {
            name: "Tests".to_string(),
            ..RunConfig::current_file()
        };
        let configurations = vec![build.clone(), duplicate, tests];

        let mut active = ActiveConfiguration::default();
        active.select(build);

        assert_eq!(
            render_list(&configurations, &active),
            [
                "  Current File",
                "* Build  ${workspaceFolder}/main.c  [gcc]",
                "  Build  other.c",
                "  Tests  (active file)",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_render_current_file_active() {
        let active = ActiveConfiguration::default();
        assert_eq!(render_list(&[], &active), "* Current File");
    }
}
