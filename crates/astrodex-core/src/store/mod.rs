// ── Reactive data store ──
//
// Single-assignment holder for the loaded dataset plus the listener registry
// that broadcasts it.

mod data_store;
mod subscription;

pub use data_store::{DataStore, Listener};
pub use subscription::Subscription;
