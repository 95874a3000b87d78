use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::lib::policy::Policy;

/// Contents of the configuration file
///
/// ```yaml
/// owner: John Doe
/// records: ~/patrimoine/possessions.json
/// policy:
///   end_date: freeze
///   day_overflow: skip
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// whose patrimoine is computed
    pub owner: String,
    /// possession list, relative to the configuration file
    pub records: PathBuf,
    pub policy: Policy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: "John Doe".to_string(),
            records: PathBuf::from("possessions.json"),
            policy: Policy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("error while parsing {path}: {source}")]
    Parse { path: String, source: serde_yaml::Error },
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let name = path.display().to_string();
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: name.clone(), source })?;
    let mut config: Config = serde_yaml::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path: name, source })?;
    config.records = resolve(path.parent(), &config.records);
    Ok(config)
}

/// Expand `~` in `path` and make it relative to `base`
pub fn resolve(base: Option<&Path>, path: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    match base {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    }
}
