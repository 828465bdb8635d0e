use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

const DEFAULT_TOML: &str = "config/Config.toml";
const DEFAULT_JSON: &str = "config/Config.json";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering TOML, `COT_` environment variables, and JSON
    /// over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or the result fails validation.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_TOML)
    }

    /// Same as [`ConfigLoader::load`] with an explicit TOML path.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or the result fails validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("COT_").split("__"))
            .join(Json::file(DEFAULT_JSON))
            .extract()?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Configuration loaded");

        Ok(config)
    }
}
