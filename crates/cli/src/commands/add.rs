use anyhow::{Context, Result};
use clap::Args;
use quickrun_core::{RunConfig, RunContext, interfaces::ConfigStore};
use std::path::Path;

use crate::host::DryRunHost;
use crate::workspace::Workspace;

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// Name shown in the configuration list
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// File to run, may use ${workspaceFolder}; without it the active file is used
    #[arg(short = 'p', long = "program")]
    pub program: Option<String>,

    /// Executor or command template ($workspaceRoot, $dir, $fileName, $fileNameWithoutExt)
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Arguments appended to the command line
    #[arg(short = 'a', long = "args", allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Working directory, stored with the configuration
    #[arg(long = "cwd")]
    pub cwd: Option<String>,

    /// Save without making the configuration active
    #[arg(long = "no-select")]
    pub no_select: bool,
}

impl AddArgs {
    pub fn to_config(&self) -> RunConfig {
        let mut config = match &self.program {
            Some(program) => RunConfig::named_file(&self.name, program),
            None => RunConfig {
                name: self.name.clone(),
                ..RunConfig::current_file()
            },
        };
        config.command = self.command.clone();
        config.args = self.args.clone();
        config.cwd = self.cwd.clone();
        config
    }
}

/// Save the configuration described by `args`, selecting it unless asked not to
pub fn add_configuration<S: ConfigStore>(context: &mut RunContext<S>, args: &AddArgs) -> Result<()> {
    let config = args.to_config();
    config.validate()?;
    if args.no_select {
        context
            .store_mut()
            .append(config)
            .with_context(|| format!("Failed to save configuration '{}'", args.name))
    } else {
        context
            .add(config)
            .with_context(|| format!("Failed to save configuration '{}'", args.name))
    }
}

pub fn add_command(workspace_dir: Option<&Path>, args: AddArgs) -> Result<()> {
    let workspace = Workspace::open(workspace_dir)?;
    let mut context = workspace.context(Box::new(DryRunHost))?;

    add_configuration(&mut context, &args)?;
    workspace.remember(&context)?;

    println!(
        "Added '{}' to {}",
        args.name,
        workspace.settings_path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::JsonDebugger;
    use quickrun_core::{ConfigKind, MemoryStore};

    fn args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            program: None,
            command: None,
            args: None,
            cwd: None,
            no_select: false,
        }
    }

    #[test]
    fn test_kind_follows_program() {
        let current = args("Tests").to_config();
        assert_eq!(current.kind, ConfigKind::CurrentFile);
        assert_eq!(current.name, "Tests");
        assert!(!current.is_current_file_sentinel());

        let named = AddArgs {
            program: Some("${workspaceFolder}/main.go".to_string()),
            args: Some("-v".to_string()),
            ..args("Main")
        }
        .to_config();
        assert_eq!(named.kind, ConfigKind::NamedFile);
        assert_eq!(named.program.as_deref(), Some("${workspaceFolder}/main.go"));
        assert_eq!(named.args.as_deref(), Some("-v"));
    }

    #[test]
    fn test_no_select_keeps_active() {
        let mut context =
            RunContext::new(MemoryStore::default(), Box::new(DryRunHost), Box::new(JsonDebugger));

        add_configuration(
            &mut context,
            &AddArgs {
                no_select: true,
                ..args("Quiet")
            },
        )
        .unwrap();
        assert!(context.active().is_current_file());

        add_configuration(&mut context, &args("Loud")).unwrap();
        assert_eq!(context.active().name(), "Loud");
        assert_eq!(context.configurations().len(), 2);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let mut context =
            RunContext::new(MemoryStore::default(), Box::new(DryRunHost), Box::new(JsonDebugger));
        assert!(add_configuration(&mut context, &args("  ")).is_err());
        assert!(context.configurations().is_empty());
    }
}
