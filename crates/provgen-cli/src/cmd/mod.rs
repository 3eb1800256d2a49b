pub mod generate;
pub mod init;
pub mod regions;
pub mod run;
pub mod schema;

use crate::root;
use anyhow::Context;
use provgen_core::config::{Config, WarnLevel};
use std::path::{Path, PathBuf};

/// Load the config, surface its validation findings through tracing and
/// return it with the directory relative repo paths resolve against.
pub(crate) fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, PathBuf)> {
    let path = root::resolve_config_path(explicit);
    let config = Config::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    for warning in config.validate() {
        match warning.level {
            WarnLevel::Error => tracing::error!("config: {}", warning.message),
            WarnLevel::Warning => tracing::warn!("config: {}", warning.message),
        }
    }

    let dir = root::config_dir(&path).to_path_buf();
    Ok((config, dir))
}
