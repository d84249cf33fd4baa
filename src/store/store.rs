use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};

use tracing::trace;

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    id: usize,
    active: AtomicBool,
    callback: Callback<T>,
}

/// Values waiting to be delivered while a notification pass is running,
/// each with the subscribers registered when it was written.
struct Pending<T> {
    queue: VecDeque<(T, Vec<Arc<Subscriber<T>>>)>,
    draining: bool,
}

struct Shared<T> {
    name: Option<&'static str>,
    state: RwLock<T>,
    subscribers: RwLock<Vec<Arc<Subscriber<T>>>>,
    next_id: AtomicUsize,
    pending: Mutex<Pending<T>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> Shared<T> {
    fn label(&self) -> &'static str {
        self.name.unwrap_or("<anonymous>")
    }

    /// Deliver `value` to every live subscriber.
    ///
    /// A value dispatched while a pass is already running is queued and
    /// delivered by the running pass once it finishes, so subscribers always
    /// observe values in the order they were set. Only subscribers present
    /// at dispatch time receive the value.
    fn dispatch(&self, value: T) {
        let subscribers = read(&self.subscribers).clone();
        {
            let mut pending = lock(&self.pending);
            pending.queue.push_back((value, subscribers));
            if pending.draining {
                return;
            }
            pending.draining = true;
        }

        let _reset = DrainReset(&self.pending);
        loop {
            let (next, subscribers) = {
                let mut pending = lock(&self.pending);
                match pending.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        pending.draining = false;
                        return;
                    }
                }
            };

            for subscriber in subscribers {
                // Removed mid-pass: skip the rest of this pass too.
                if subscriber.active.load(Ordering::Acquire) {
                    (subscriber.callback)(&next);
                }
            }
        }
    }
}

/// Clears the pending queue if a subscriber panics mid-pass, so the next
/// `set` starts a fresh pass instead of queueing forever.
struct DrainReset<'a, T>(&'a Mutex<Pending<T>>);

impl<T> Drop for DrainReset<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut pending = lock(self.0);
            pending.queue.clear();
            pending.draining = false;
        }
    }
}

trait SubscriberList: Send + Sync {
    fn remove(&self, id: usize);
}

impl<T: Send + Sync> SubscriberList for Shared<T> {
    fn remove(&self, id: usize) {
        let removed = {
            let mut subscribers = write(&self.subscribers);
            match subscribers.iter().position(|s| s.id == id) {
                Some(index) => Some(subscribers.remove(index)),
                None => None,
            }
        };
        // Dropped outside the lock: the callback may own other subscriptions.
        if let Some(subscriber) = removed {
            subscriber.active.store(false, Ordering::Release);
            trace!(store = self.label(), subscriber = id, "unsubscribed");
        }
    }
}

/// A reactive cell holding a single value.
///
/// Every `set`, `update` or `modify` replaces the value and synchronously
/// notifies all subscribers in the order they subscribed. There is no
/// equality check: setting the same value again still notifies.
///
/// Cloning a `Store` yields another handle to the same cell.
///
/// # Examples
///
/// ```
/// use appkit_stores::Store;
/// use std::sync::{Arc, Mutex};
///
/// let connected = Store::new(false);
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let _sub = connected.subscribe({
///     let seen = seen.clone();
///     move |value: &bool| seen.lock().unwrap().push(*value)
/// });
///
/// connected.set(true);
/// assert_eq!(*seen.lock().unwrap(), vec![false, true]);
/// ```
pub struct Store<T> {
    inner: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial value.
    pub fn new(initial: T) -> Self {
        Self::build(None, initial)
    }

    /// Create a store whose name is attached to its trace events.
    pub fn named(name: &'static str, initial: T) -> Self {
        Self::build(Some(name), initial)
    }

    fn build(name: Option<&'static str>, initial: T) -> Self {
        Self {
            inner: Arc::new(Shared {
                name,
                state: RwLock::new(initial),
                subscribers: RwLock::new(Vec::new()),
                next_id: AtomicUsize::new(0),
                pending: Mutex::new(Pending {
                    queue: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    /// The name given to [`Store::named`], if any.
    pub fn name(&self) -> Option<&'static str> {
        self.inner.name
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        read(&self.inner.state).clone()
    }

    /// Read the value with a function without cloning.
    ///
    /// The cell is read-locked while `f` runs; `f` must not write to this
    /// store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let state = read(&self.inner.state);
        f(&*state)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        *write(&self.inner.state) = value.clone();
        trace!(store = self.inner.label(), "set");
        self.inner.dispatch(value);
    }

    /// Replace the value with `f(current)` and notify subscribers.
    ///
    /// The read and the write are separate steps; concurrent writers can
    /// interleave between them. Use [`Store::modify`] when that matters.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let next = f(self.get());
        self.set(next);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let value = {
            let mut state = write(&self.inner.state);
            f(&mut *state);
            state.clone()
        };
        trace!(store = self.inner.label(), "modified");
        self.inner.dispatch(value);
    }

    /// Subscribe to value changes.
    ///
    /// The callback runs once immediately with the current value and then
    /// after every change. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let subscriber = Arc::new(Subscriber {
            id,
            active: AtomicBool::new(true),
            callback: Box::new(callback),
        });
        write(&self.inner.subscribers).push(Arc::clone(&subscriber));
        trace!(store = self.inner.label(), subscriber = id, "subscribed");

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.inner);
        let list: Weak<dyn SubscriberList> = weak;
        let subscription = Subscription {
            id,
            list: Some(list),
        };

        let current = self.get();
        (subscriber.callback)(&current);
        subscription
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        read(&self.inner.subscribers).len()
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("value", &*read(&self.inner.state))
            .finish()
    }
}

/// Handle to a registered subscriber.
///
/// Dropping the handle unsubscribes. Use [`Subscription::detach`] to keep the
/// callback registered for as long as the store lives.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    id: usize,
    list: Option<Weak<dyn SubscriberList>>,
}

impl Subscription {
    /// Subscriber id, unique within its store.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Stop receiving notifications.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the callback registered without holding on to the handle.
    pub fn detach(mut self) {
        self.list = None;
    }

    fn release(&mut self) {
        if let Some(list) = self.list.take().and_then(|weak| weak.upgrade()) {
            list.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.list.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct AppState {
        count: usize,
        name: String,
    }

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value: &T| sink.lock().unwrap().push(value.clone()))
    }

    #[test]
    fn store_get_set() {
        let store = Store::new(AppState {
            count: 0,
            name: "test".to_string(),
        });

        assert_eq!(store.get().count, 0);

        store.set(AppState {
            count: 42,
            name: "updated".to_string(),
        });

        assert_eq!(store.get().count, 42);
        assert_eq!(store.get().name, "updated");
    }

    #[test]
    fn store_update_uses_current_value() {
        let store = Store::new(10);
        store.update(|n| n * 3);
        assert_eq!(store.get(), 30);
    }

    #[test]
    fn store_modify_in_place() {
        let store = Store::new(AppState {
            count: 0,
            name: "test".to_string(),
        });

        store.modify(|state| {
            state.count += 10;
        });

        assert_eq!(store.get().count, 10);
    }

    #[test]
    fn subscribe_runs_immediately_then_on_every_set() {
        let store = Store::new(0);
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let _sub = store.subscribe(move |_state| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.update(|n| n + 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        // No equality short-circuit.
        store.set(1);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn subscribers_fire_in_registration_order() {
        let store = Store::new(0);
        let order = Arc::new(Mutex::new(Vec::new()));

        let subs: Vec<_> = (0..3)
            .map(|i| {
                let order = order.clone();
                store.subscribe(move |_: &i32| order.lock().unwrap().push(i))
            })
            .collect();
        order.lock().unwrap().clear();

        store.set(5);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let store = Store::new(0);
        let (first, first_cb) = recorder();
        let (second, second_cb) = recorder();

        let sub = store.subscribe(first_cb);
        let _keep = store.subscribe(second_cb);
        assert_eq!(store.subscriber_count(), 2);

        store.set(1);
        sub.unsubscribe();
        store.set(2);

        assert_eq!(*first.lock().unwrap(), vec![0, 1]);
        assert_eq!(*second.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn detached_subscription_stays_registered() {
        let store = Store::new(0);
        let (seen, cb) = recorder();

        store.subscribe(cb).detach();
        store.set(7);

        assert_eq!(*seen.lock().unwrap(), vec![0, 7]);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn nested_set_is_delivered_in_call_order() {
        let store = Store::new(0);

        let _bump = store.subscribe({
            let store = store.clone();
            move |value: &i32| {
                if *value == 1 {
                    store.set(2);
                }
            }
        });
        let (seen, cb) = recorder();
        let _watch = store.subscribe(cb);

        store.set(1);

        assert_eq!(store.get(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn subscriber_added_mid_pass_skips_earlier_values() {
        let store = Store::new(0);
        let (late, late_cb) = recorder::<i32>();
        let late_cb = Arc::new(late_cb);
        let late_sub: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let _joiner = store.subscribe({
            let store = store.clone();
            let late_sub = late_sub.clone();
            move |value: &i32| {
                if *value == 1 {
                    store.set(2);
                    let late_cb = late_cb.clone();
                    let sub = store.subscribe(move |value: &i32| late_cb(value));
                    *late_sub.lock().unwrap() = Some(sub);
                }
            }
        });
        let (early, early_cb) = recorder();
        let _early = store.subscribe(early_cb);

        store.set(1);

        assert_eq!(*early.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(*late.lock().unwrap(), vec![2]);

        store.set(3);
        assert_eq!(*late.lock().unwrap(), vec![2, 3]);
    }

    #[test]
    fn panicking_subscriber_skips_rest_of_pass() {
        let store = Store::new(0);
        let _faulty = store.subscribe(|value: &i32| {
            if *value == 1 {
                panic!("subscriber failed");
            }
        });
        let (seen, cb) = recorder();
        let _watch = store.subscribe(cb);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| store.set(1)));
        assert!(result.is_err());
        assert_eq!(store.get(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![0]);

        store.set(2);
        assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
    }

    #[test]
    fn unsubscribe_during_pass_skips_rest_of_pass() {
        let store = Store::new(0);
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let _killer = store.subscribe({
            let victim = victim.clone();
            move |value: &i32| {
                if *value == 1 {
                    victim.lock().unwrap().take();
                }
            }
        });
        let (seen, cb) = recorder();
        *victim.lock().unwrap() = Some(store.subscribe(cb));

        store.set(1);

        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn clones_share_the_cell() {
        let store = Store::named("counter", 1);
        let handle = store.clone();
        handle.set(9);

        assert_eq!(store.get(), 9);
        assert_eq!(store.name(), Some("counter"));
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = Store::new(0);
        let sub = store.subscribe(|_| {});
        drop(store);
        sub.unsubscribe();
    }
}
