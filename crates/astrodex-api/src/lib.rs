//! Transport layer for the astrodex viewer.
//!
//! Fetches the crafting data document exactly once, from either an HTTP(S)
//! server ([`DataSource::Remote`]) or the local filesystem
//! ([`DataSource::Local`]), and decodes it into lenient wire types
//! ([`RawDocument`]). No retries, no caching: `astrodex-core` decides what to
//! do with the single outcome.

pub mod client;
pub mod error;
pub mod models;

pub use client::{DEFAULT_DATA_PATH, DataClient, DataSource, parse_document};
pub use error::Error;
pub use models::{RawDocument, RawItem, RawItems, RawRecipe};
