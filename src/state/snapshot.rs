use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{EventRecord, Metadata, ThemeState};
use crate::error::Result;

/// Point-in-time copy of every registry cell.
///
/// Keys follow the names the cells are exported under in the connector
/// front-end. Missing keys fall back to the initial cell values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrySnapshot {
    pub account_state: Metadata,
    pub network_state: Metadata,
    pub app_kit_state: Metadata,
    pub theme_state: ThemeState,
    pub events: Vec<EventRecord>,
    pub wallet_info: Metadata,
    pub wagmi_config: Option<Value>,
    pub signer_address: Option<String>,
    pub connected: bool,
    #[serde(with = "false_as_none")]
    pub public_client: Option<Value>,
}

impl RegistrySnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `publicClient` uses `false` as its "unset" marker on the wire.
mod false_as_none {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<Value>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(handle) => handle.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Bool(false) => Ok(None),
            handle => Ok(Some(handle)),
        }
    }
}
