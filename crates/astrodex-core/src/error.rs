// ── Core error types ──
//
// User-facing errors from astrodex-core. Consumers never see HTTP status
// codes or JSON parse failures directly: every transport failure becomes
// `FetchFailed`, which is terminal for the session.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data availability ────────────────────────────────────────────
    /// The dataset has not been loaded (yet, or ever).
    #[error("Data is not available yet")]
    DataUnavailable,

    /// Fetching or decoding the data document failed.
    #[error("Failed to load data from {origin}: {reason}")]
    FetchFailed { origin: String, reason: String },

    // ── Lookup / presentation ────────────────────────────────────────
    /// No item with this name in the dataset. Absorbed by `lookup::resolve`.
    #[error("Unknown item: {name}")]
    UnknownItem { name: String },

    /// Not one of `icon`, `compact`, `detailed`.
    #[error("Invalid card mode: {value}")]
    InvalidMode { value: String },

    /// A filter could not be parsed from its attribute or query form.
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },
}

impl CoreError {
    /// Build a `FetchFailed` for the given data source.
    pub fn fetch_failed(origin: impl ToString, err: &astrodex_api::Error) -> Self {
        Self::FetchFailed {
            origin: origin.to_string(),
            reason: err.to_string(),
        }
    }
}
