use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Connection settings for the tabular-data API.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Base URL up to and including the database segment, without a trailing
    /// slash, e.g. "https://nocodb.example.org/api/v1/db/data/v1/AORAI2".
    pub api_base: String,
    pub api_token: String,
}

/// Config file path: CLI argument, then AORAI_CONFIG, then ./aorai.yaml.
pub fn resolve_config_path(cli_path: Option<&str>) -> PathBuf {
    if let Some(path) = cli_path {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("AORAI_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("aorai.yaml")
}

/// Load the YAML config; AORAI_API_TOKEN overrides the token from the file.
pub fn load_config(path: &Path) -> Result<MapConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let mut cfg: MapConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing config file {}", path.display()))?;

    if let Ok(token) = std::env::var("AORAI_API_TOKEN") {
        cfg.api_token = token;
    }

    Ok(cfg)
}
