// ── Wire → domain conversion ──
//
// Turns the lenient `astrodex_api` document into the canonical `Dataset`.
// Missing tags become empty, missing icons become the warning icon, and
// list items without a name are dropped with a warning.

use astrodex_api::{RawDocument, RawItem, RawItems, RawRecipe};
use tracing::{debug, warn};

use crate::lookup::FALLBACK_ICON;
use crate::model::{Dataset, Item, Recipe};

/// Convert a fetched document into a dataset.
pub fn dataset_from_document(doc: RawDocument) -> Dataset {
    let items: Vec<Item> = match doc.items {
        RawItems::List(list) => list
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let Some(name) = raw.name.clone() else {
                    warn!(index, "skipping item without a name");
                    return None;
                };
                Some(item_from_raw(name, raw))
            })
            .collect(),
        RawItems::Map(map) => map
            .into_iter()
            .map(|(key, raw)| item_from_raw(key, raw))
            .collect(),
    };

    let recipes: Vec<Recipe> = doc.recipes.into_iter().map(Recipe::from).collect();

    debug!(
        items = items.len(),
        recipes = recipes.len(),
        "converted data document"
    );
    Dataset::new(items, recipes)
}

fn item_from_raw(name: String, raw: RawItem) -> Item {
    Item {
        name,
        icon: raw.icon.unwrap_or_else(|| FALLBACK_ICON.into()),
        tags: raw.tags.unwrap_or_default(),
    }
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        Self {
            result: raw.result,
            materials: raw.materials,
            station: raw.station.unwrap_or_default(),
            kind: raw.kind.unwrap_or_default(),
        }
    }
}
