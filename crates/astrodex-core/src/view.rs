// ── Derived view structures ──
//
// Plain data produced from (dataset, filter) pairs. Renderers only ever see
// these; they never reach back into the store.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::CoreError;
use crate::filter::{FilterSpec, apply, title_for};
use crate::lookup;
use crate::model::{Dataset, Recipe};

/// Which parts of an item a card shows.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CardMode {
    /// Icon only.
    Icon,
    /// Icon and name.
    #[default]
    Compact,
    /// Larger icon, name and tags.
    Detailed,
}

impl CardMode {
    /// Parse a mode name, rejecting anything but `icon`, `compact`, `detailed`.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        value.parse().map_err(|_| CoreError::InvalidMode {
            value: value.to_owned(),
        })
    }

    pub fn shows_name(self) -> bool {
        matches!(self, Self::Compact | Self::Detailed)
    }

    pub fn shows_tags(self) -> bool {
        matches!(self, Self::Detailed)
    }

    /// Icon edge length in pixels.
    pub fn icon_size(self) -> u16 {
        match self {
            Self::Icon | Self::Compact => 24,
            Self::Detailed => 32,
        }
    }

    /// The next mode in `icon → compact → detailed → icon` order.
    pub fn next(self) -> Self {
        match self {
            Self::Icon => Self::Compact,
            Self::Compact => Self::Detailed,
            Self::Detailed => Self::Icon,
        }
    }
}

/// A renderable item card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub name: String,
    pub icon: String,
    pub tags: Vec<String>,
    pub mode: CardMode,
    /// `false` when the name did not resolve and the fallback icon is used.
    pub known: bool,
}

impl CardView {
    pub fn new(dataset: Option<&Dataset>, name: &str, mode: CardMode) -> Self {
        let display = lookup::resolve(dataset, name);
        Self {
            name: name.to_owned(),
            icon: display.icon.to_owned(),
            tags: display.tags.to_vec(),
            mode,
            known: dataset.is_some_and(|ds| ds.item(name).is_some()),
        }
    }

    /// Name label, if this mode shows one.
    pub fn label(&self) -> Option<&str> {
        self.mode.shows_name().then_some(self.name.as_str())
    }

    /// Comma-joined tags, if this mode shows them.
    pub fn tag_line(&self) -> Option<String> {
        self.mode.shows_tags().then(|| self.tags.join(", "))
    }

    pub fn icon_size(&self) -> u16 {
        self.mode.icon_size()
    }
}

/// One table row: the materials as icon cards, the result as a compact card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRow {
    pub materials: Vec<CardView>,
    pub result: CardView,
    pub station: String,
    pub kind: String,
}

impl RecipeRow {
    pub fn new(dataset: &Dataset, recipe: &Recipe, result_mode: CardMode) -> Self {
        Self {
            materials: recipe
                .materials
                .iter()
                .map(|m| CardView::new(Some(dataset), m, CardMode::Icon))
                .collect(),
            result: CardView::new(Some(dataset), &recipe.result, result_mode),
            station: recipe.station.clone(),
            kind: recipe.kind.clone(),
        }
    }
}

/// A titled, filtered recipe table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub title: String,
    pub rows: Vec<RecipeRow>,
}

impl TableView {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// `"{title} ({count})"`, as shown above the table.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.count())
    }
}

/// Output of a live component: a placeholder until the dataset is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading => None,
        }
    }
}

/// Derive a table for `spec` with compact result cards.
pub fn render_table(dataset: &Dataset, spec: &FilterSpec) -> TableView {
    render_table_with(dataset, spec, CardMode::Compact)
}

/// Derive a table for `spec` with result cards in `result_mode`.
pub fn render_table_with(dataset: &Dataset, spec: &FilterSpec, result_mode: CardMode) -> TableView {
    TableView {
        title: title_for(spec),
        rows: apply(dataset.recipes(), spec)
            .into_iter()
            .map(|recipe| RecipeRow::new(dataset, recipe, result_mode))
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::fixtures::example_dataset;

    #[test]
    fn mode_names_round_trip_through_strum() {
        for mode in CardMode::iter() {
            assert_eq!(CardMode::parse(&mode.to_string()).unwrap(), mode);
        }
        assert_eq!(CardMode::default(), CardMode::Compact);
    }

    #[test]
    fn invalid_mode_is_rejected() {
        assert!(matches!(
            CardMode::parse("huge"),
            Err(CoreError::InvalidMode { ref value }) if value == "huge"
        ));
        assert!(CardMode::parse("Compact").is_err());
    }

    #[test]
    fn mode_controls_visible_fields() {
        let ds = example_dataset();
        let icon = CardView::new(Some(&ds), "B", CardMode::Icon);
        let compact = CardView::new(Some(&ds), "B", CardMode::Compact);
        let detailed = CardView::new(Some(&ds), "B", CardMode::Detailed);

        assert_eq!(icon.label(), None);
        assert_eq!(icon.tag_line(), None);
        assert_eq!(compact.label(), Some("B"));
        assert_eq!(compact.tag_line(), None);
        assert_eq!(detailed.tag_line().as_deref(), Some("metal"));
        assert_eq!(detailed.icon_size(), 32);
        assert_eq!(compact.icon_size(), 24);
    }

    #[test]
    fn unknown_card_uses_fallback() {
        let ds = example_dataset();
        let card = CardView::new(Some(&ds), "Ghost", CardMode::Detailed);
        assert!(!card.known);
        assert_eq!(card.icon, lookup::FALLBACK_ICON);
        assert_eq!(card.tag_line().as_deref(), Some(""));
    }

    #[test]
    fn example_table_has_two_material_cards_and_one_result() {
        let ds = example_dataset();
        let table = render_table(&ds, &FilterSpec::station("Small Printer"));

        assert_eq!(table.title, "Small Printer");
        assert_eq!(table.count(), 1);
        assert_eq!(table.heading(), "Small Printer (1)");

        let row = &table.rows[0];
        assert_eq!(row.materials.len(), 2);
        assert!(row.materials.iter().all(|c| c.name == "A" && c.mode == CardMode::Icon));
        assert_eq!(row.materials[0].icon, "a.png");
        assert_eq!(row.result.name, "B");
        assert_eq!(row.result.mode, CardMode::Compact);
        assert_eq!(row.result.icon, "b.png");
    }

    #[test]
    fn view_state_helpers() {
        let loading: ViewState<u8> = ViewState::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.ready(), None);
        assert!(!ViewState::Ready(3).is_loading());
        assert_eq!(ViewState::Ready(3).ready(), Some(3));
    }
}
