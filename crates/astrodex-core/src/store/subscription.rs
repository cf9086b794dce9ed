use std::fmt;
use std::sync::Weak;

use tracing::trace;

use super::data_store::StoreInner;

/// Registration handle for a [`DataStore`](super::DataStore) listener.
///
/// The listener is unregistered when the handle is dropped, whichever way
/// the owner goes away. The handle only holds a weak reference, so it never
/// keeps the store alive.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub(super) fn new(id: u64, store: Weak<StoreInner>) -> Self {
        trace!(id, "listener registered");
        Self { id, store }
    }

    /// Whether the listener is still registered with a live store.
    pub fn is_active(&self) -> bool {
        self.store
            .upgrade()
            .is_some_and(|store| store.is_registered(self.id))
    }

    /// Unregister now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            if store.unregister(self.id) {
                trace!(id = self.id, "listener unregistered");
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
