use tracing::error;

use crate::store::DataStore;
use crate::view::{CardMode, CardView, ViewState};

/// A single item card bound to the store.
///
/// Cards read the dataset on demand rather than caching a derived view, so
/// they never need a subscription of their own.
#[derive(Debug, Clone)]
pub struct ItemCard {
    store: DataStore,
    name: String,
    mode: CardMode,
}

impl ItemCard {
    pub fn new(store: &DataStore, name: impl Into<String>, mode: CardMode) -> Self {
        Self {
            store: store.clone(),
            name: name.into(),
            mode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> CardMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CardMode) {
        self.mode = mode;
    }

    /// Apply a mode given as text. Invalid values are logged and ignored;
    /// the card keeps its previous mode. Returns whether the mode changed.
    pub fn set_mode_str(&mut self, value: &str) -> bool {
        match CardMode::parse(value) {
            Ok(mode) => {
                self.mode = mode;
                true
            }
            Err(err) => {
                error!(card = %self.name, %err, kept = %self.mode, "rejected card mode");
                false
            }
        }
    }

    pub fn view(&self) -> ViewState<CardView> {
        match self.store.get() {
            Some(dataset) => ViewState::Ready(CardView::new(Some(&dataset), &self.name, self.mode)),
            None => ViewState::Loading,
        }
    }
}
