//! Configuration loading for the watch command

use anyhow::{Context, Result};
use std::path::Path;
use teamhub::SyncConfig;

/// Load configuration from `path`, or from the environment when no file is
/// given, then apply command line overrides.
pub fn load(path: Option<&Path>, team: Option<String>, token: Option<String>) -> Result<SyncConfig> {
    let base = match path {
        Some(path) => SyncConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SyncConfig::from_env().context("Failed to load config from environment")?,
    };
    let config = apply_overrides(base, team, token);
    config.validate()?;

    if config.team_id.is_none() {
        anyhow::bail!("No team given; pass --team or set TEAMHUB_TEAM_ID");
    }
    Ok(config)
}

fn apply_overrides(mut config: SyncConfig, team: Option<String>, token: Option<String>) -> SyncConfig {
    if team.is_some() {
        config.team_id = team;
    }
    if token.is_some() {
        config.access_token = token;
    }
    config
}
