// ── Central reactive data store ──
//
// Holds the one dataset the viewer ever loads. Readers get a cheap `Arc`
// clone; `set` notifies synchronous listeners in subscription order.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwapOption;
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::subscription::Subscription;
use crate::model::Dataset;

/// Callback invoked with the dataset each time the store is set.
pub type Listener = Arc<dyn Fn(&Arc<Dataset>) + Send + Sync>;

/// Listener registry. `IndexMap` keeps subscription order for dispatch and
/// still removes by id.
#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: IndexMap<u64, Listener>,
}

pub(super) struct StoreInner {
    value: ArcSwapOption<Dataset>,
    registry: Mutex<Registry>,
}

impl StoreInner {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn unregister(&self, id: u64) -> bool {
        self.registry().listeners.shift_remove(&id).is_some()
    }

    pub(super) fn is_registered(&self, id: u64) -> bool {
        self.registry().listeners.contains_key(&id)
    }
}

/// Process-wide holder for the fetched dataset.
///
/// Cloning is cheap and every clone refers to the same store, so the handle
/// is passed explicitly to whatever needs the data. The value starts absent
/// and is meant to be set exactly once.
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<StoreInner>,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                value: ArcSwapOption::empty(),
                registry: Mutex::new(Registry::default()),
            }),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The current dataset, or `None` while absent.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.inner.value.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.value.load().is_some()
    }

    // ── Write ────────────────────────────────────────────────────────

    /// Install the dataset and notify every registered listener before
    /// returning.
    ///
    /// Listeners are called in subscription order without the registry lock
    /// held, so a listener may drop subscriptions (its own or others). A
    /// listener removed mid-broadcast is skipped; one added mid-broadcast
    /// waits for the next `set`. Calling `set` again is not part of the
    /// normal lifecycle but still replaces the value and re-broadcasts.
    pub fn set(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);

        if self.inner.value.swap(Some(Arc::clone(&dataset))).is_some() {
            warn!("dataset replaced after initial load");
        }

        let listeners: Vec<(u64, Listener)> = self
            .inner
            .registry()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Arc::clone(l)))
            .collect();

        debug!(
            listeners = listeners.len(),
            items = dataset.item_count(),
            recipes = dataset.recipes().len(),
            "broadcasting dataset"
        );

        for (id, listener) in listeners {
            if self.inner.is_registered(id) {
                listener(&dataset);
            }
        }

        dataset
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<Dataset>) + Send + Sync + 'static,
    {
        let mut registry = self.inner.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Arc::new(listener));
        Subscription::new(id, Arc::downgrade(&self.inner))
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.registry().listeners.len()
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("loaded", &self.is_loaded())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
