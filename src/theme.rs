//! Light/dark theme preference
use super::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_THEME_KEY: &str = "theme";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `dark` is light.
    pub fn from_stored(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ThemeStore {
    instance: Arc<sled::Db>,
    key: String,
}

impl ThemeStore {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self::with_key(instance, DEFAULT_THEME_KEY)
    }

    pub fn with_key(instance: Arc<sled::Db>, key: impl Into<String>) -> Self {
        Self {
            instance,
            key: key.into(),
        }
    }

    /// Read the saved preference, falling back to light when nothing usable
    /// is stored.
    pub fn load(&self) -> Theme {
        let stored = match self.instance.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Theme::default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "theme preference unreadable");
                return Theme::default();
            }
        };

        match std::str::from_utf8(&stored) {
            Ok(value @ ("light" | "dark")) => Theme::from_stored(value),
            Ok(value) => {
                warn!(key = %self.key, value, "unrecognised theme preference");
                Theme::default()
            }
            Err(_) => {
                warn!(key = %self.key, "theme preference is not valid text");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<(), StoreError> {
        self.instance.insert(&self.key, theme.as_str())?;
        self.instance.flush()?;
        debug!(key = %self.key, %theme, "saved theme preference");
        Ok(())
    }

    /// Flip the saved preference and return the new one.
    pub fn toggle(&self) -> Result<Theme, StoreError> {
        let theme = self.load().toggled();
        self.save(theme)?;
        Ok(theme)
    }
}
