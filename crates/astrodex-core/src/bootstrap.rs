// ── One-shot data load ──
//
// The only asynchronous step in the viewer: fetch the document once, convert
// it, and install it in the store. No retry, no timeout, no cancellation.

use std::sync::Arc;

use astrodex_api::DataClient;
use tracing::{error, info, warn};

use crate::convert::dataset_from_document;
use crate::error::CoreError;
use crate::model::Dataset;
use crate::store::DataStore;

/// Fetch the dataset and set it on `store`.
///
/// On failure the store is left absent and the error is logged before being
/// returned as [`CoreError::FetchFailed`].
pub async fn bootstrap(client: &DataClient, store: &DataStore) -> Result<Arc<Dataset>, CoreError> {
    let source = client.source();
    info!(%source, "fetching dataset");

    let document = client.fetch().await.map_err(|err| {
        error!(%source, error = %err, "dataset fetch failed");
        if err.is_not_found() {
            warn!(%source, "no data document there; check source.base and source.data_path");
        }
        CoreError::fetch_failed(source, &err)
    })?;

    let dataset = store.set(dataset_from_document(document));
    info!(
        items = dataset.item_count(),
        recipes = dataset.recipes().len(),
        "dataset loaded"
    );
    Ok(dataset)
}
