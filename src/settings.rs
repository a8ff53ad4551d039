use std::path::PathBuf;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "casekit";
const ENV_PREFIX: &str = "CASEKIT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Files parsed per parallel batch before results are written.
    pub chunk_size: usize,
}

impl Settings {
    /// Defaults, then `casekit.toml` (optional), then `CASEKIT_*` variables.
    pub fn load() -> Result<Self> {
        defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to load settings")
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    let builder = Config::builder()
        .set_default("db_path", "data/casekit.sqlite")?
        .set_default("log_level", "info")?
        .set_default("chunk_size", 64)?;
    Ok(builder)
}
