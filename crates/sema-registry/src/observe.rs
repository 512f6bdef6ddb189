//! Concurrent maps with per-key one-shot readiness notifications.
//!
//! An [`ObservableMap`] is the building block of the materialized view: a
//! key→value map whose writers notify registered observers the moment a
//! key is populated. Observation is one-shot: a sink fires exactly once,
//! with `true` on insertion or `false` when the map shuts down first.
//!
//! ## Registration vs. insertion races
//!
//! `observe` re-reads the map under the same lock that `insert` mutates
//! it, so a sink is either handed a pre-signalled result (key already
//! present) or lands in the per-key observer list before any later
//! insertion can drain it. No sink can slip between the map mutation and
//! the drain: the claim list is fixed while the lock is held, and sinks
//! are delivered only after it is released.
//!
//! The signal carries no value. Multiple insertions between registration
//! and delivery coalesce; observers re-read the map for current state.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

/// A one-shot readiness sink.
///
/// Yields `true` when the observed key was (or already had been)
/// populated, and `false` when the map was closed before that happened.
/// Callers needing a timeout select between [`Readiness::wait`] and their
/// own timer.
#[derive(Debug)]
pub struct Readiness {
    rx: oneshot::Receiver<bool>,
}

impl Readiness {
    /// Waits for the signal. A sink whose map has gone away reads as an
    /// abort.
    pub async fn wait(self) -> bool {
        self.rx.await.unwrap_or(false)
    }

    /// Attempts to read the signal without waiting.
    ///
    /// Returns `None` while the sink has not fired.
    pub fn try_wait(&mut self) -> Option<bool> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(false),
        }
    }

    pub(crate) fn immediate(value: bool) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(value);
        Self { rx }
    }

    pub(crate) fn channel() -> (oneshot::Sender<bool>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }
}

struct Inner<K, V> {
    entries: HashMap<K, V>,
    observers: HashMap<K, Vec<oneshot::Sender<bool>>>,
    closed: bool,
}

/// A concurrent key→value map with per-key one-shot change notification.
///
/// The map owns both the entries and the observer registry behind a
/// single lock; sinks never escape the map's API except as [`Readiness`]
/// handles. Cloning produces another handle onto the same map.
pub struct ObservableMap<K, V> {
    inner: Arc<Mutex<Inner<K, V>>>,
}

impl<K, V> Clone for ObservableMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for ObservableMap<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                observers: HashMap::new(),
                closed: false,
            })),
        }
    }
}

impl<K, V> std::fmt::Debug for ObservableMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ObservableMap")
            .field("entries", &inner.entries.len())
            .field("observed_keys", &inner.observers.len())
            .field("closed", &inner.closed)
            .finish()
    }
}

impl<K, V> ObservableMap<K, V> {
    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        // HashMap upholds no cross-key invariants a panicking writer could
        // have broken mid-flight, so a poisoned lock is still readable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites an entry, then signals every sink registered
    /// for the key.
    ///
    /// Returns true when a prior value existed and was overwritten. The
    /// per-key observer list is claimed under the lock and drained after
    /// it is released; delivery never blocks.
    pub fn insert(&self, key: K, value: V) -> bool {
        let (overwritten, claimed) = {
            let mut inner = self.lock();
            let overwritten = inner.entries.insert(key.clone(), value).is_some();
            let claimed = inner.observers.remove(&key).unwrap_or_default();
            (overwritten, claimed)
        };
        for sink in claimed {
            let _ = sink.send(true);
        }
        overwritten
    }

    /// Returns a snapshot of the value under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().entries.get(key).cloned()
    }

    /// Returns true when the key is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Registers a one-shot sink for `key`.
    ///
    /// When the key is already present the sink is pre-signalled with
    /// `true` and nothing is registered. When the map is closed the sink
    /// is pre-signalled with `false`. Observation is one-shot; callers
    /// wanting to see the next change call `observe` again.
    #[must_use]
    pub fn observe(&self, key: &K) -> Readiness {
        let mut inner = self.lock();
        if inner.closed {
            return Readiness::immediate(false);
        }
        if inner.entries.contains_key(key) {
            return Readiness::immediate(true);
        }
        let (tx, readiness) = Readiness::channel();
        inner.observers.entry(key.clone()).or_default().push(tx);
        readiness
    }

    /// Returns an atomic copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.lock()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns all keys currently present.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.lock().entries.keys().cloned().collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Shuts the map down: every outstanding sink is signalled with
    /// `false`, and any later `observe` yields an immediate `false`.
    ///
    /// Entries remain readable after close.
    pub fn close(&self) {
        let claimed: Vec<oneshot::Sender<bool>> = {
            let mut inner = self.lock();
            inner.closed = true;
            inner.observers.drain().flat_map(|(_, sinks)| sinks).collect()
        };
        for sink in claimed {
            let _ = sink.send(false);
        }
    }
}
