//! # appkit-stores
//!
//! Reactive state cells for a front-end that drives a crypto wallet
//! connector.
//!
//! ## Store (reactive cell)
//!
//! - `Store<T>` - A value plus an ordered list of subscribers, notified
//!   synchronously on every write
//! - `Subscription` - Deregistration handle returned by `subscribe`
//! - `Derived<T>` - Read-only cell computed from another store
//!
//! ## Registry
//!
//! `StateRegistry` owns the connector cells (`accountState`, `networkState`,
//! `appKitState`, `themeState`, `events`, `walletInfo`, `wagmiConfig`,
//! `signerAddress`, `connected`, `publicClient`). Build one per application
//! context and pass it around, or use the process-wide `StateRegistry::global()`.

pub mod config;
pub mod error;
pub mod registry;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use config::RegistryConfig;
pub use error::{Result, StateError};
pub use registry::StateRegistry;
pub use state::{EventRecord, Metadata, RegistrySnapshot, ThemeMode, ThemeState};
pub use store::{Derived, Readable, Store, Subscription, Writable};

