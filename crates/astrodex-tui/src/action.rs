//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use astrodex_core::Dataset;

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data ──────────────────────────────────────────────────────
    /// The store has been set. Components already hold derived views;
    /// screens use this to reset cursors.
    DataLoaded(Arc<Dataset>),
    /// The one fetch failed. Terminal for the session.
    LoadFailed(String),

    // ── Display ───────────────────────────────────────────────────
    CycleCardMode,

    // ── Search prompt ─────────────────────────────────────────────
    OpenSearch,
    /// Apply a query to the search table.
    ApplySearch(String),
    /// Drop the search table.
    ClearSearch,
}
