//! Screen implementations. Each screen is a top-level Component.

pub mod crafting;
pub mod items;

use std::sync::Arc;

use astrodex_config::Config;
use astrodex_core::{CardMode, DataStore};

use crate::component::Component;
use crate::screen::ScreenId;

/// Create every screen, each bound to `store`.
pub fn create_screens(
    store: &DataStore,
    config: &Arc<Config>,
    result_mode: CardMode,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Crafting,
            Box::new(crafting::CraftingScreen::new(store, Arc::clone(config), result_mode)),
        ),
        (
            ScreenId::Items,
            Box::new(items::ItemsScreen::new(store, Arc::clone(config))),
        ),
    ]
}

/// Resolve where an icon is served from, falling back to the bare filename.
pub(crate) fn icon_location(config: &Config, filename: &str) -> String {
    config
        .icon_location(filename)
        .unwrap_or_else(|_| filename.to_owned())
}
