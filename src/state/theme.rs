use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Metadata;
use crate::error::StateError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(StateError::InvalidThemeMode(s.to_owned())),
        }
    }
}

/// Theme applied to the wallet connector UI.
///
/// Serialized with the connector's key names (`themeMode`,
/// `themeVariables`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeState {
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub theme_variables: Metadata,
}

impl ThemeState {
    pub fn new(theme_mode: ThemeMode) -> Self {
        Self {
            theme_mode,
            theme_variables: Metadata::new(),
        }
    }
}
