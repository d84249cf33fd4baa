use std::sync::OnceLock;

use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::state::{EventRecord, Metadata, RegistrySnapshot, ThemeState};
use crate::store::Store;

/// The wallet connector's shared state cells.
///
/// Each cell is an independent [`Store`]: writing one never notifies the
/// subscribers of another, and there is no atomicity across cells. Cloning a
/// registry hands out another reference to the same cells, so pass it to
/// whichever components need to read or write connector state.
///
/// # Examples
///
/// ```
/// use appkit_stores::StateRegistry;
///
/// let registry = StateRegistry::new();
/// assert!(!registry.connected().get());
///
/// registry.connected().set(true);
/// registry.signer_address().set(Some("0x71C7656EC7ab88b098defB751B7401B5f6d8976F".into()));
/// assert!(registry.connected().get());
/// ```
#[derive(Debug, Clone)]
pub struct StateRegistry {
    account_state: Store<Metadata>,
    network_state: Store<Metadata>,
    app_kit_state: Store<Metadata>,
    theme_state: Store<ThemeState>,
    events: Store<Vec<EventRecord>>,
    wallet_info: Store<Metadata>,
    wagmi_config: Store<Option<Value>>,
    signer_address: Store<Option<String>>,
    connected: Store<bool>,
    public_client: Store<Option<Value>>,
    initial_theme: ThemeState,
}

impl StateRegistry {
    /// Create a registry with every cell at its initial value.
    pub fn new() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            account_state: Store::named("accountState", Metadata::new()),
            network_state: Store::named("networkState", Metadata::new()),
            app_kit_state: Store::named("appKitState", Metadata::new()),
            theme_state: Store::named("themeState", config.initial_theme.clone()),
            events: Store::named("events", Vec::new()),
            wallet_info: Store::named("walletInfo", Metadata::new()),
            wagmi_config: Store::named("wagmiConfig", None),
            signer_address: Store::named("signerAddress", None),
            connected: Store::named("connected", false),
            public_client: Store::named("publicClient", None),
            initial_theme: config.initial_theme.clone(),
        }
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static StateRegistry {
        static REGISTRY: OnceLock<StateRegistry> = OnceLock::new();
        REGISTRY.get_or_init(StateRegistry::new)
    }

    pub fn account_state(&self) -> &Store<Metadata> {
        &self.account_state
    }

    pub fn network_state(&self) -> &Store<Metadata> {
        &self.network_state
    }

    pub fn app_kit_state(&self) -> &Store<Metadata> {
        &self.app_kit_state
    }

    pub fn theme_state(&self) -> &Store<ThemeState> {
        &self.theme_state
    }

    /// Connector event log, oldest first.
    pub fn events(&self) -> &Store<Vec<EventRecord>> {
        &self.events
    }

    pub fn wallet_info(&self) -> &Store<Metadata> {
        &self.wallet_info
    }

    /// Wallet client configuration handle, `None` until configured.
    pub fn wagmi_config(&self) -> &Store<Option<Value>> {
        &self.wagmi_config
    }

    pub fn signer_address(&self) -> &Store<Option<String>> {
        &self.signer_address
    }

    pub fn connected(&self) -> &Store<bool> {
        &self.connected
    }

    /// Public client handle, `None` while unset.
    pub fn public_client(&self) -> &Store<Option<Value>> {
        &self.public_client
    }

    /// Append a record to the event log.
    pub fn record_event(&self, record: EventRecord) {
        self.events.modify(|events| events.push(record));
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            account_state: self.account_state.get(),
            network_state: self.network_state.get(),
            app_kit_state: self.app_kit_state.get(),
            theme_state: self.theme_state.get(),
            events: self.events.get(),
            wallet_info: self.wallet_info.get(),
            wagmi_config: self.wagmi_config.get(),
            signer_address: self.signer_address.get(),
            connected: self.connected.get(),
            public_client: self.public_client.get(),
        }
    }

    /// Write every cell from `snapshot`.
    ///
    /// Cells are written one at a time in declaration order; subscribers
    /// observe each write separately.
    pub fn restore(&self, snapshot: RegistrySnapshot) {
        debug!(
            connected = snapshot.connected,
            events = snapshot.events.len(),
            "restoring registry snapshot"
        );
        let RegistrySnapshot {
            account_state,
            network_state,
            app_kit_state,
            theme_state,
            events,
            wallet_info,
            wagmi_config,
            signer_address,
            connected,
            public_client,
        } = snapshot;

        self.account_state.set(account_state);
        self.network_state.set(network_state);
        self.app_kit_state.set(app_kit_state);
        self.theme_state.set(theme_state);
        self.events.set(events);
        self.wallet_info.set(wallet_info);
        self.wagmi_config.set(wagmi_config);
        self.signer_address.set(signer_address);
        self.connected.set(connected);
        self.public_client.set(public_client);
    }

    /// Return every cell to its initial value.
    pub fn reset(&self) {
        debug!("resetting registry");
        self.restore(RegistrySnapshot {
            theme_state: self.initial_theme.clone(),
            ..RegistrySnapshot::default()
        });
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
