//! Synchronous fan-out signal used for change, snapshot and delta
//! publication. Listeners run on the publishing thread, after any store
//! lock has been released.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

pub struct Broadcast<T>(Arc<Inner<T>>);

struct Inner<T> {
    listeners: RwLock<HashMap<usize, Arc<dyn Fn(T) + Send + Sync + 'static>>>,
    next_id: AtomicUsize,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self { Broadcast(self.0.clone()) }
}

impl<T> std::fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcast").field("listeners", &self.0.listeners.read().unwrap().len()).finish()
    }
}

impl<T> Broadcast<T> {
    pub fn new() -> Self {
        Broadcast(Arc::new(Inner { listeners: RwLock::new(HashMap::new()), next_id: AtomicUsize::new(0) }))
    }

    /// Registers a listener. Dropping the returned guard unsubscribes it.
    pub fn listen<L>(&self, listener: L) -> ListenerGuard<T>
    where L: IntoListener<T> {
        let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
        self.0.listeners.write().unwrap().insert(id, listener.into_listener());
        ListenerGuard { inner: Arc::downgrade(&self.0), id }
    }

    pub fn listener_count(&self) -> usize { self.0.listeners.read().unwrap().len() }
}

impl<T: Clone> Broadcast<T> {
    /// Sends a value to every active listener.
    pub fn send(&self, value: T) {
        // Clone the listeners out so no callback ever runs while the map is
        // locked, and clone the value for each listener except the last
        let listeners = { self.0.listeners.read().unwrap().values().cloned().collect::<Vec<_>>() };
        if let Some((last, rest)) = listeners.split_last() {
            for listener in rest {
                listener(value.clone());
            }
            last(value);
        }
    }
}

impl<T> Default for Broadcast<T> {
    fn default() -> Self { Self::new() }
}

/// A subscription handle; unsubscribes its listener when dropped.
#[must_use]
pub struct ListenerGuard<T> {
    inner: Weak<Inner<T>>,
    id: usize,
}

impl<T> Drop for ListenerGuard<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.listeners.write().unwrap().remove(&self.id);
        }
    }
}

/// Types that can be registered as broadcast listeners.
pub trait IntoListener<T> {
    fn into_listener(self) -> Arc<dyn Fn(T) + Send + Sync + 'static>;
}

impl<F, T> IntoListener<T> for F
where F: Fn(T) + Send + Sync + 'static
{
    fn into_listener(self) -> Arc<dyn Fn(T) + Send + Sync + 'static> { Arc::new(self) }
}

impl<T> IntoListener<T> for std::sync::mpsc::Sender<T>
where T: Send + Sync + 'static
{
    fn into_listener(self) -> Arc<dyn Fn(T) + Send + Sync + 'static> {
        Arc::new(move |value| {
            let _ = self.send(value); // Ignore send errors
        })
    }
}
