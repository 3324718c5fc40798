use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::preprocess::DEFAULT_SEASON;

pub const DEFAULT_CONFIG_FILE: &str = "olympics.toml";
pub const ENV_PREFIX: &str = "OLYMPICS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub athletes_path: PathBuf,
    pub regions_path: PathBuf,
    pub season: String,
    pub log_level: String,
    /// Daily rolling log files go here; stderr when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, then `path` (or `olympics.toml` if present), then
    /// `OLYMPICS_*` variables. `.env` is read into the environment first.
    ///
    /// An explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let cfg = Config::builder()
            .set_default("athletes_path", "athlete_events.csv")?
            .set_default("regions_path", "noc_regions.csv")?
            .set_default("season", DEFAULT_SEASON)?
            .set_default("log_level", "info")?
            .add_source(file)
            .add_source(env)
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}
