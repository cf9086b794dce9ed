//! Canonical domain model: items, recipes, and the loaded dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A craftable or collectable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Icon filename, resolved against the image base by the renderer.
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One crafting recipe. `materials` may repeat a name once per unit needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub result: String,
    pub materials: Vec<String>,
    pub station: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The complete item / recipe catalog.
///
/// Built once from the fetched document and never mutated afterwards; the
/// store hands it out as `Arc<Dataset>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    items: IndexMap<String, Item>,
    recipes: Vec<Recipe>,
}

impl Dataset {
    /// Build a dataset. Later items with a duplicate name replace earlier ones
    /// but keep the earlier position.
    pub fn new(items: impl IntoIterator<Item = Item>, recipes: Vec<Recipe>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.name.clone(), item))
            .collect();
        Self { items, recipes }
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// Items in document order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipes that produce `name`.
    pub fn recipes_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes.iter().filter(move |r| r.result == name)
    }

    /// Recipes that consume `name`.
    pub fn recipes_using<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.recipes
            .iter()
            .filter(move |r| r.materials.iter().any(|m| m == name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(name: &str) -> Item {
        Item {
            name: name.into(),
            icon: format!("Icon_{name}.png"),
            tags: Vec::new(),
        }
    }

    fn recipe(result: &str, materials: &[&str], station: &str) -> Recipe {
        Recipe {
            result: result.into(),
            materials: materials.iter().map(ToString::to_string).collect(),
            station: station.into(),
            kind: "printing".into(),
        }
    }

    #[test]
    fn duplicate_item_names_keep_first_position() {
        let mut replacement = item("A");
        replacement.icon = "other.png".into();
        let ds = Dataset::new([item("A"), item("B"), replacement], Vec::new());

        let names: Vec<&str> = ds.items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(ds.item("A").unwrap().icon, "other.png");
    }

    #[test]
    fn recipes_for_and_using() {
        let ds = Dataset::new(
            [],
            vec![
                recipe("B", &["A", "A"], "Small Printer"),
                recipe("C", &["B"], "Small Printer"),
            ],
        );
        assert_eq!(ds.recipes_for("B").count(), 1);
        assert_eq!(ds.recipes_using("B").count(), 1);
        assert_eq!(ds.recipes_using("A").count(), 1);
    }

    #[test]
    fn recipe_kind_serializes_as_type() {
        let json = serde_json::to_value(recipe("B", &["A"], "Small Printer")).unwrap();
        assert_eq!(json["type"], "printing");
    }
}
