// ── Live components ──
//
// Components own their inputs (a mode, a filter) and a `DataStore` handle.
// Those that hold derived output subscribe on construction and drop the
// subscription with themselves.

mod crafting_panel;
mod item_card;
mod recipe_table;

pub use crafting_panel::{CraftingPanel, default_filters};
pub use item_card::ItemCard;
pub use recipe_table::RecipeTable;
