//! Live-subscription primitives shared by the collaborator contracts.
//!
//! Remote listeners are modeled as an explicit cancellable handle: a channel
//! of snapshots plus a retained unsubscribe closure that is guaranteed to run
//! on every teardown path (explicit [`Subscription::cancel`] or drop).

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Receiving half of a live listener registration.
pub struct Subscription<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl<T> Subscription<T> {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<T>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Next snapshot, in publisher order. `None` once the publisher is gone
    /// or the subscription has been cancelled.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Invoke the retained unsubscribe callback. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
        self.receiver.close();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Publisher-side registry keyed by subscription target (a document id, a
/// query key). Each `subscribe` delivers the current snapshot immediately,
/// matching the remote store's listener semantics.
pub struct Listeners<K, T> {
    inner: Arc<Mutex<ListenerTable<K, T>>>,
}

struct ListenerTable<K, T> {
    next_id: u64,
    entries: Vec<(u64, K, mpsc::UnboundedSender<T>)>,
}

impl<K, T> Default for Listeners<K, T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ListenerTable {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<K, T> Clone for Listeners<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> Listeners<K, T>
where
    K: PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn subscribe(&self, key: K, initial: T) -> Subscription<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = {
            let mut table = self.inner.lock().expect("listener mutex poisoned");
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, key, sender.clone()));
            id
        };

        // Registration observes the current state before any later change.
        let _ = sender.send(initial);

        let inner = Arc::clone(&self.inner);
        Subscription::new(receiver, move || {
            let mut table = inner.lock().expect("listener mutex poisoned");
            table.entries.retain(|(entry_id, _, _)| *entry_id != id);
        })
    }

    pub fn notify(&self, key: &K, value: T) {
        let table = self.inner.lock().expect("listener mutex poisoned");
        for (_, entry_key, sender) in &table.entries {
            if entry_key == key {
                let _ = sender.send(value.clone());
            }
        }
    }

    pub fn active(&self) -> usize {
        self.inner
            .lock()
            .expect("listener mutex poisoned")
            .entries
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_delivers_initial_snapshot_then_updates() {
        let listeners: Listeners<&'static str, u32> = Listeners::default();
        let mut subscription = listeners.subscribe("doc", 1);

        assert_eq!(subscription.next().await, Some(1));

        listeners.notify(&"doc", 2);
        listeners.notify(&"other", 99);
        assert_eq!(subscription.next().await, Some(2));
    }

    #[tokio::test]
    async fn cancel_runs_unsubscribe_exactly_once() {
        let listeners: Listeners<&'static str, u32> = Listeners::default();
        let mut subscription = listeners.subscribe("doc", 0);
        assert_eq!(listeners.active(), 1);

        subscription.cancel();
        subscription.cancel();
        assert_eq!(listeners.active(), 0);
    }

    #[tokio::test]
    async fn drop_tears_down_registration() {
        let listeners: Listeners<&'static str, u32> = Listeners::default();
        {
            let _subscription = listeners.subscribe("doc", 0);
            assert_eq!(listeners.active(), 1);
        }
        assert_eq!(listeners.active(), 0);
    }
}
