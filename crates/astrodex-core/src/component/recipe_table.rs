// ── Recipe table ──
//
// Owns a filter and the table derived from it. The store listener holds only
// a weak reference to this table's state, so a broadcast re-derives this
// table and nothing else, and never keeps a dropped table alive.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;

use crate::error::CoreError;
use crate::filter::FilterSpec;
use crate::model::Dataset;
use crate::store::{DataStore, Subscription};
use crate::view::{CardMode, TableView, ViewState, render_table_with};

#[derive(Default)]
struct TableState {
    spec: FilterSpec,
    result_mode: CardMode,
    view: Option<TableView>,
    revision: u64,
}

impl TableState {
    fn derive(&mut self, dataset: &Dataset) {
        let view = render_table_with(dataset, &self.spec, self.result_mode);
        self.revision += 1;
        debug!(
            title = %view.title,
            rows = view.count(),
            revision = self.revision,
            "derived recipe table"
        );
        self.view = Some(view);
    }
}

fn lock(state: &Mutex<TableState>) -> MutexGuard<'_, TableState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RecipeTable {
    store: DataStore,
    state: Arc<Mutex<TableState>>,
    _subscription: Subscription,
}

impl RecipeTable {
    pub fn new(store: &DataStore, spec: FilterSpec) -> Self {
        let state = Arc::new(Mutex::new(TableState {
            spec,
            ..TableState::default()
        }));
        let subscription = listen(store, Arc::downgrade(&state));
        let table = Self {
            store: store.clone(),
            state,
            _subscription: subscription,
        };
        table.refresh();
        table
    }

    /// Build from the JSON attribute form, e.g. `{"type": "refining"}`.
    ///
    /// The listener is registered before the filter is parsed; on a parse
    /// error the subscription guard is dropped and the listener released.
    pub fn from_filter_json(store: &DataStore, raw: &str) -> Result<Self, CoreError> {
        let state = Arc::new(Mutex::new(TableState::default()));
        let subscription = listen(store, Arc::downgrade(&state));

        lock(&state).spec = FilterSpec::from_json(raw)?;

        let table = Self {
            store: store.clone(),
            state,
            _subscription: subscription,
        };
        table.refresh();
        Ok(table)
    }

    pub fn filter(&self) -> FilterSpec {
        lock(&self.state).spec.clone()
    }

    /// Replace the filter wholesale and re-derive this table.
    pub fn set_filter(&self, spec: FilterSpec) {
        lock(&self.state).spec = spec;
        self.refresh();
    }

    pub fn result_mode(&self) -> CardMode {
        lock(&self.state).result_mode
    }

    /// Change how result cards are drawn. Material cards are always icons.
    pub fn set_result_mode(&self, mode: CardMode) {
        lock(&self.state).result_mode = mode;
        self.refresh();
    }

    pub fn view(&self) -> ViewState<TableView> {
        match &lock(&self.state).view {
            Some(view) => ViewState::Ready(view.clone()),
            None => ViewState::Loading,
        }
    }

    /// How many times this table has re-derived its view.
    pub fn revision(&self) -> u64 {
        lock(&self.state).revision
    }

    fn refresh(&self) {
        if let Some(dataset) = self.store.get() {
            lock(&self.state).derive(&dataset);
        }
    }
}

fn listen(store: &DataStore, state: Weak<Mutex<TableState>>) -> Subscription {
    store.subscribe(move |dataset| {
        if let Some(state) = state.upgrade() {
            lock(&state).derive(dataset);
        }
    })
}

impl fmt::Debug for RecipeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("RecipeTable")
            .field("spec", &state.spec)
            .field("result_mode", &state.result_mode)
            .field("loaded", &state.view.is_some())
            .field("revision", &state.revision)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{example_dataset, printer_dataset};

    #[test]
    fn loading_then_ready_after_set() {
        let store = DataStore::new();
        let table = RecipeTable::new(&store, FilterSpec::station("Small Printer"));
        assert!(table.view().is_loading());
        assert_eq!(store.listener_count(), 1);

        store.set(example_dataset());

        let view = table.view().ready().unwrap();
        assert_eq!(view.heading(), "Small Printer (1)");
        assert_eq!(view.rows[0].materials.len(), 2);
        assert_eq!(view.rows[0].result.name, "B");
    }

    #[test]
    fn created_after_load_derives_immediately() {
        let store = DataStore::new();
        store.set(printer_dataset());
        let table = RecipeTable::new(&store, FilterSpec::kind("refining"));

        let view = table.view().ready().unwrap();
        assert_eq!(view.title, "Refining");
        assert_eq!(view.count(), 1);
        assert_eq!(table.revision(), 1);
    }

    #[test]
    fn filter_change_only_touches_its_own_table() {
        let store = DataStore::new();
        let a = RecipeTable::new(&store, FilterSpec::station("Small Printer"));
        let b = RecipeTable::new(&store, FilterSpec::station("Backpack Printer"));

        store.set(printer_dataset());
        assert_eq!((a.revision(), b.revision()), (1, 1));

        a.set_filter(FilterSpec::materials(["Resin"]));

        assert_eq!((a.revision(), b.revision()), (2, 1));
        assert_eq!(a.view().ready().unwrap().title, "Made from Resin");
        assert_eq!(b.view().ready().unwrap().heading(), "Backpack Printer (1)");
    }

    #[test]
    fn result_mode_applies_to_result_cards_only() {
        let store = DataStore::new();
        store.set(example_dataset());
        let table = RecipeTable::new(&store, FilterSpec::all());

        table.set_result_mode(CardMode::Detailed);

        let view = table.view().ready().unwrap();
        assert_eq!(view.rows[0].result.mode, CardMode::Detailed);
        assert!(view.rows[0].materials.iter().all(|c| c.mode == CardMode::Icon));
    }

    #[test]
    fn dropping_table_unregisters() {
        let store = DataStore::new();
        let table = RecipeTable::new(&store, FilterSpec::all());
        assert_eq!(store.listener_count(), 1);
        drop(table);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn from_filter_json_uses_attribute_form() {
        let store = DataStore::new();
        store.set(printer_dataset());
        let table = RecipeTable::from_filter_json(&store, r#"{"type": "chemistry"}"#).unwrap();

        assert_eq!(table.filter(), FilterSpec::kind("chemistry"));
        assert_eq!(table.view().ready().unwrap().heading(), "Chemistry (1)");
    }

    #[test]
    fn failed_construction_releases_listener() {
        let store = DataStore::new();
        let result = RecipeTable::from_filter_json(&store, r#"{"station": 3}"#);

        assert!(matches!(result, Err(CoreError::InvalidFilter { .. })));
        assert_eq!(store.listener_count(), 0);
    }
}
