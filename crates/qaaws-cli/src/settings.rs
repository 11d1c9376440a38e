//! Connection settings: an optional TOML file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use qaaws_core::QaawsConfig;

/// Connection values given on the command line; each one replaces the
/// value from the config file.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub endpoint: Option<String>,
    pub cuid: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub serialized_session: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConnectionOverrides {
    pub fn apply(&self, config: &mut QaawsConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(cuid) = &self.cuid {
            config.cuid.clone_from(cuid);
        }
        if self.username.is_some() {
            config.username.clone_from(&self.username);
        }
        if self.password.is_some() {
            config.password.clone_from(&self.password);
        }
        if self.serialized_session.is_some() {
            config.serialized_session.clone_from(&self.serialized_session);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
    }
}

/// Read a TOML config file.
pub fn load_config_file(path: &Path) -> Result<QaawsConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse config file {}", path.display()))
}

/// Config file (if any) with overrides applied.
pub fn resolve_config(path: Option<&Path>, overrides: &ConnectionOverrides) -> Result<QaawsConfig> {
    let mut config = match path {
        Some(path) => load_config_file(path)?,
        None => QaawsConfig::default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

/// Parse a `key=value` argument. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
