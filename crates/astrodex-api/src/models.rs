// Wire types for the crafting data document.
//
// These mirror the JSON as produced by the data pipeline and are deliberately
// lenient: optional fields default, unknown fields are ignored. Conversion to
// the canonical domain model happens in `astrodex-core`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The whole data document: `{ "items": ..., "recipes": [...] }`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDocument {
    #[serde(default)]
    pub items: RawItems,
    #[serde(default)]
    pub recipes: Vec<RawRecipe>,
}

/// Items arrive either as a list of records or as a mapping keyed by name.
///
/// The pipeline's merge step emits the mapping form; older hand-written
/// documents use the list form. Both are accepted.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawItems {
    List(Vec<RawItem>),
    Map(IndexMap<String, RawItem>),
}

impl Default for RawItems {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl RawItems {
    pub fn len(&self) -> usize {
        match self {
            Self::List(list) => list.len(),
            Self::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single item record. `name` may be omitted in the mapping form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// A single crafting recipe.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRecipe {
    pub result: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
