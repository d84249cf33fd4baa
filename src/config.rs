use serde::Deserialize;

use crate::error::Result;
use crate::state::ThemeState;

/// Startup options for a [`StateRegistry`](crate::StateRegistry).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Value the theme cell starts with (and returns to on reset).
    pub initial_theme: ThemeState,
}

impl RegistryConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
