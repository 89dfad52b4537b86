//! Configuration lifecycle: load file config and merge it under the CLI.

use anyhow::Result;
use tracing::debug;

use crate::app::config_runtime::{self, CliValueSources, RunSettings};
use crate::app_config::{VerbositySetting, load_default_file_config};
use crate::cli::Args;

/// Loads the default config file (if any) and returns the merged run settings.
pub(crate) fn resolve_config(args: Args, cli_sources: &CliValueSources) -> Result<RunSettings> {
    let loaded_config = load_default_file_config()?;
    if let Some(path) = &loaded_config.path
        && let Some(config) = &loaded_config.config
    {
        debug!(
            path = %path.display(),
            verbosity = config.verbosity.map(VerbositySetting::as_str),
            "loaded config file"
        );
    }
    config_runtime::resolve_settings(args, cli_sources, loaded_config.config.as_ref())
}
