use super::{Derived, Store, Subscription};

/// A cell that can be read and observed.
pub trait Readable<T> {
    /// Get a clone of the current value.
    fn get(&self) -> T;

    /// Register a callback that runs now and after every change.
    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static;
}

/// A cell that can also be written.
pub trait Writable<T>: Readable<T> {
    fn set(&self, value: T);

    fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T;
}

impl<T: Clone + Send + Sync + 'static> Readable<T> for Store<T> {
    fn get(&self) -> T {
        Store::get(self)
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Store::subscribe(self, callback)
    }
}

impl<T: Clone + Send + Sync + 'static> Writable<T> for Store<T> {
    fn set(&self, value: T) {
        Store::set(self, value)
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        Store::update(self, f)
    }
}

impl<T: Clone + Send + Sync + 'static> Readable<T> for Derived<T> {
    fn get(&self) -> T {
        Derived::get(self)
    }

    fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Derived::subscribe(self, callback)
    }
}
