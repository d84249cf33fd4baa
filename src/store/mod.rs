//! Reactive cells.
//!
//! A [`Store`] holds one value and notifies its subscribers synchronously on
//! every write. [`Derived`] cells are read-only views computed from a store.

mod derived;
mod readable;
mod store;

pub use derived::Derived;
pub use readable::{Readable, Writable};
pub use store::{Store, Subscription};
