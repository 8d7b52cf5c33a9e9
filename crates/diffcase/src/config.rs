use std::path::Path;

use anyhow::{Context, Result};
use diffcase_config::HarnessConfig;
use tracing::debug;

/// Defaults, then `file`, then the environment. Callers apply their flags
/// on top of the result.
pub(crate) fn resolve(file: Option<&Path>) -> Result<HarnessConfig> {
    let mut config = match file {
        Some(path) => HarnessConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => HarnessConfig::default(),
    };
    config.apply_env_overrides();
    debug!(?config, "resolved settings");
    Ok(config)
}
