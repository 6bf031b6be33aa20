//! Observable values for the presentation layer.

use core::fmt::{self, Debug, Formatter};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::watch;

/// A value which frontends can observe.
///
/// The controller owns the authoritative state and pushes a fresh value into its stores once per committed change. Frontends either read the latest value with [`get`][get] or [`subscribe`][subscribe] and await `changed()` on the receiver. Publishing never fails, even if nobody listens, so a misbehaving or vanished subscriber can never abort a game mutation.
///
/// Cloning a store yields another handle to the same value.
///
/// [get]: #method.get "get — returns a copy of the latest value"
/// [subscribe]: #method.subscribe "subscribe — returns a receiver notified on every publication"
pub struct Store<T> {
    sender: Arc<watch::Sender<T>>,
    revision: Arc<AtomicU64>,
}
impl<T> Store<T> {
    /// Creates a store holding `initial`.
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender: Arc::new(sender), revision: Arc::new(AtomicU64::new(0)) }
    }
    /// Replaces the value and notifies every subscriber once.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
    /// Returns a receiver which sees the current value and every later publication.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
    /// Returns the number of publications since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
impl<T: Clone> Store<T> {
    /// Returns a copy of the latest value.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }
}
impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self { sender: Arc::clone(&self.sender), revision: Arc::clone(&self.revision) }
    }
}
impl<T: Debug> Debug for Store<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &*self.sender.borrow())
            .field("revision", &self.revision())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_each_publication() {
        let store = Store::new(0_u64);
        let mut rx = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);
        assert!(!rx.has_changed().unwrap());

        store.set(3);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 3);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.get(), 3);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let store = Store::new(String::from("a"));
        store.set(String::from("b"));
        let handle = store.clone();
        handle.set(String::from("c"));
        assert_eq!(store.get(), "c");
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn changed_wakes_async_subscribers() {
        let store = Store::new(1_u64);
        let mut rx = store.subscribe();
        let publisher = store.clone();
        tokio::spawn(async move { publisher.set(2) });
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 2);
    }
}
