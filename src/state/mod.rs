//! Payload types held by the registry cells.

mod snapshot;
mod theme;

pub use snapshot::RegistrySnapshot;
pub use theme::{ThemeMode, ThemeState};

/// Free-form metadata object (account, network, wallet, app kit).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One entry of the connector event log.
pub type EventRecord = serde_json::Value;
