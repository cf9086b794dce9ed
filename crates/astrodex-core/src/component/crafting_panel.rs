use crate::filter::FilterSpec;
use crate::store::DataStore;
use crate::view::{CardMode, TableView, ViewState};

use super::RecipeTable;

/// The station and type tables shown when no panels are configured.
pub fn default_filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::station("Backpack Printer"),
        FilterSpec::station("Small Printer"),
        FilterSpec::station("Medium Printer"),
        FilterSpec::station("Large Printer"),
        FilterSpec::kind("refining"),
        FilterSpec::kind("chemistry"),
    ]
}

/// A group of recipe tables rendered together.
#[derive(Debug)]
pub struct CraftingPanel {
    store: DataStore,
    tables: Vec<RecipeTable>,
}

impl CraftingPanel {
    pub fn new(store: &DataStore) -> Self {
        Self::with_filters(store, default_filters())
    }

    pub fn with_filters(store: &DataStore, filters: impl IntoIterator<Item = FilterSpec>) -> Self {
        Self {
            store: store.clone(),
            tables: filters
                .into_iter()
                .map(|spec| RecipeTable::new(store, spec))
                .collect(),
        }
    }

    pub fn tables(&self) -> &[RecipeTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn set_result_mode(&self, mode: CardMode) {
        for table in &self.tables {
            table.set_result_mode(mode);
        }
    }

    /// Every table's view, or one `Loading` for the whole panel while any of
    /// them (or the store) has nothing yet.
    pub fn view(&self) -> ViewState<Vec<TableView>> {
        if !self.store.is_loaded() {
            return ViewState::Loading;
        }
        self.tables
            .iter()
            .map(|table| table.view().ready())
            .collect::<Option<Vec<_>>>()
            .map_or(ViewState::Loading, ViewState::Ready)
    }
}
