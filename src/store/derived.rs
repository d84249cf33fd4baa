use std::fmt;
use std::sync::Arc;

use super::{Store, Subscription};

/// A read-only cell computed from another store.
///
/// The source subscription lives as long as any clone of the `Derived`.
#[derive(Clone)]
pub struct Derived<T> {
    store: Store<T>,
    _source: Arc<Subscription>,
}

impl<T: Clone + Send + Sync + 'static> Derived<T> {
    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.store.get()
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.store.with(f)
    }

    /// Subscribe to changes; the callback runs once immediately.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Derived").field(&self.store).finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a derived cell by applying `f` to this store's value.
    ///
    /// The derived cell notifies its own subscribers every time the source
    /// changes.
    pub fn map<U, F>(&self, f: F) -> Derived<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        let store = Store::new(self.with(&f));
        let target = store.clone();
        let source = self.subscribe(move |value| target.set(f(value)));

        Derived {
            store,
            _source: Arc::new(source),
        }
    }
}
