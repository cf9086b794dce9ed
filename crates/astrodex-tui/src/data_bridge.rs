//! Data bridge: runs the one-shot bootstrap and reports the outcome as an
//! [`Action`].
//!
//! Components subscribed to the [`DataStore`] re-derive inside `set`, on
//! this task. The action only tells the UI loop that there is something
//! new to draw.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use astrodex_api::DataClient;
use astrodex_core::{DataStore, bootstrap};

use crate::action::Action;

pub async fn spawn_data_bridge(
    client: DataClient,
    store: DataStore,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            debug!("data bridge cancelled before load finished");
            return;
        }
        outcome = bootstrap(&client, &store) => outcome,
    };

    let action = match outcome {
        Ok(dataset) => Action::DataLoaded(dataset),
        Err(e) => Action::LoadFailed(e.to_string()),
    };
    if action_tx.send(action).is_err() {
        debug!("UI closed before the load outcome was delivered");
        return;
    }
    debug!("data bridge finished");
}
