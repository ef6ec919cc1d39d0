//! Configuration loading using figment.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML config file,
//! then environment variables prefixed with `BIRTH_REGISTRY_` (nested keys
//! separated by `__`, e.g. `BIRTH_REGISTRY_STORAGE__RECORDS_KEY`).

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::store::DEFAULT_RECORDS_KEY;
use crate::theme::DEFAULT_THEME_KEY;

const APP_DIR_NAME: &str = "birth-registry";
const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "registry.db";
const ENV_PREFIX: &str = "BIRTH_REGISTRY_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database location. Defaults to
    /// `<local data dir>/birth-registry/registry.db`.
    pub database_path: Option<PathBuf>,
    /// Entry holding the submitted applications.
    pub records_key: String,
    /// Entry holding the theme preference.
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            records_key: DEFAULT_RECORDS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load with an optional explicit config file in place of the default.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(&config_file))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let storage = &self.storage;

        if storage.records_key.is_empty() || storage.theme_key.is_empty() {
            return Err(ConfigError::Invalid {
                message: "storage keys must not be empty".to_string(),
            });
        }
        if storage.records_key == storage.theme_key {
            return Err(ConfigError::Invalid {
                message: format!(
                    "records_key and theme_key must differ (both are '{}')",
                    storage.records_key
                ),
            });
        }

        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_named_entries() {
        let config = Config::default();

        assert_eq!(config.storage.records_key, "birthRegistrations");
        assert_eq!(config.storage.theme_key, "theme");
        assert!(config.validate().is_ok());
        assert!(config.database_path().ends_with("birth-registry/registry.db"));
    }

    #[test]
    fn toml_overrides_defaults() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [storage]
                database_path = "/tmp/registry-test.db"
                records_key = "apps"
                "#,
            ));
        let config = Config::from_figment(figment).unwrap();

        assert_eq!(config.storage.records_key, "apps");
        assert_eq!(config.storage.theme_key, "theme");
        assert_eq!(config.database_path(), PathBuf::from("/tmp/registry-test.db"));
    }

    #[test]
    fn clashing_keys_are_rejected() {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string("[storage]\nrecords_key = \"theme\"\n"));

        assert!(matches!(
            Config::from_figment(figment),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config.storage, StorageConfig::default());
    }
}
