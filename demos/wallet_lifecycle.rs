//! Drive the registry through a connect / network switch / disconnect cycle.
//!
//! Run with `RUST_LOG=appkit_stores=trace` to see every cell write.

use appkit_stores::{Metadata, StateRegistry, ThemeMode, ThemeState};
use serde_json::json;

fn metadata(value: serde_json::Value) -> Metadata {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Metadata::new(),
    }
}

fn main() -> appkit_stores::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let registry = StateRegistry::new();

    let _connected = registry.connected().subscribe(|connected| {
        tracing::info!(connected, "connection changed");
    });
    let _network = registry.network_state().subscribe(|network| {
        tracing::info!(chain = ?network.get("chainId"), "network changed");
    });
    let label = registry
        .signer_address()
        .map(|address| address.clone().unwrap_or_else(|| "<none>".to_string()));
    let _signer = label.subscribe(|label| tracing::info!(%label, "signer changed"));

    // Connect
    registry.wagmi_config().set(Some(json!({ "projectId": "demo", "chains": [1, 137] })));
    registry.public_client().set(Some(json!({ "chainId": 1, "transport": "http" })));
    registry
        .wallet_info()
        .set(metadata(json!({ "name": "Demo Wallet", "icon": "" })));
    registry
        .signer_address()
        .set(Some("0x71C7656EC7ab88b098defB751B7401B5f6d8976F".to_string()));
    registry.connected().set(true);
    registry.record_event(json!({ "event": "CONNECT_SUCCESS" }));

    // Switch network
    registry
        .network_state()
        .set(metadata(json!({ "chainId": 137, "caipNetworkId": "eip155:137" })));
    registry.record_event(json!({ "event": "SWITCH_NETWORK" }));

    // Theme
    registry
        .theme_state()
        .set(ThemeState::new("dark".parse::<ThemeMode>()?));

    println!("{}", registry.snapshot().to_json_pretty()?);

    // Disconnect
    registry.connected().set(false);
    registry.signer_address().set(None);
    registry.wallet_info().set(Metadata::new());
    registry.public_client().set(None);
    registry.record_event(json!({ "event": "DISCONNECT_SUCCESS" }));

    tracing::info!(events = registry.events().get().len(), "done");
    Ok(())
}
