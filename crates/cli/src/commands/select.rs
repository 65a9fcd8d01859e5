use anyhow::{Result, bail};
use quickrun_core::{RunConfig, RunContext, config::CURRENT_FILE_NAME, interfaces::ConfigStore};
use std::path::Path;
use tracing::debug;

use crate::host::DryRunHost;
use crate::workspace::Workspace;

/// Shorthand for the active-file configuration
pub const CURRENT_KEYWORD: &str = "current";

/// Make `name` active in `context`, or fail if no such configuration exists
pub fn select_configuration<S: ConfigStore>(context: &mut RunContext<S>, name: &str) -> Result<()> {
    if name.eq_ignore_ascii_case(CURRENT_KEYWORD) || name == CURRENT_FILE_NAME {
        context.select(RunConfig::current_file());
        return Ok(());
    }

    if context.select_by_name(name).is_none() {
        let known: Vec<String> = context
            .configurations()
            .into_iter()
            .map(|config| config.name)
            .collect();
        if known.is_empty() {
            bail!("No configuration named '{}' (none are saved)", name);
        }
        bail!(
            "No configuration named '{}' (available: {})",
            name,
            known.join(", ")
        );
    }
    Ok(())
}

pub fn select_command(workspace_dir: Option<&Path>, name: &str) -> Result<()> {
    let workspace = Workspace::open(workspace_dir)?;
    let mut context = workspace.context(Box::new(DryRunHost))?;

    select_configuration(&mut context, name)?;
    workspace.remember(&context)?;
    debug!("Remembered selection '{}'", context.active().name());

    println!("{}", context.active().label());
    Ok(())
}
