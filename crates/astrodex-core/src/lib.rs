//! Reactive data layer between `astrodex-api` and the terminal viewer.
//!
//! - **[`DataStore`]**: single-assignment holder for the fetched [`Dataset`].
//!   `set` notifies synchronous listeners in subscription order; each
//!   listener is owned by a [`Subscription`] guard that unregisters on drop.
//!
//! - **[`lookup`]**: item name to icon and tags, with the warning-icon
//!   fallback for unknown names.
//!
//! - **[`FilterSpec`]**: conjunctive recipe filter, stable [`filter::apply`],
//!   and the heading priority of [`filter::title_for`].
//!
//! - **Views and components**: [`render_table`] derives a [`TableView`];
//!   [`RecipeTable`], [`ItemCard`] and [`CraftingPanel`] keep their output
//!   current and report [`ViewState::Loading`] until data arrives.
//!
//! - **[`bootstrap()`]**: the one fetch that fills the store.

pub mod bootstrap;
pub mod component;
pub mod convert;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod model;
pub mod store;
pub mod view;

#[cfg(test)]
mod fixtures;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bootstrap::bootstrap;
pub use component::{CraftingPanel, ItemCard, RecipeTable, default_filters};
pub use convert::dataset_from_document;
pub use error::CoreError;
pub use filter::{FilterSpec, title_for};
pub use lookup::{FALLBACK_ICON, ItemDisplay};
pub use model::{Dataset, Item, Recipe};
pub use store::{DataStore, Listener, Subscription};
pub use view::{CardMode, CardView, RecipeRow, TableView, ViewState, render_table, render_table_with};
