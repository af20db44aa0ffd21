//! Background fetch jobs to keep the UI thread responsive.
//!
//! Each page request runs on its own worker thread and reports back over a
//! channel, tagged with the generation that issued it. The reducer in
//! [`crate::app::state`] drops results from superseded generations, so the
//! most recently issued request always wins.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::provider::{DataProvider, ListPage, ProviderError};
use crate::core::query::Query;

#[derive(Debug)]
pub enum FetchUpdate {
    Page {
        generation: u64,
        result: Result<ListPage, ProviderError>,
    },
}

pub fn spawn_fetch(
    tx: mpsc::UnboundedSender<FetchUpdate>,
    generation: u64,
    provider: Arc<dyn DataProvider>,
    query: Query,
) {
    std::thread::spawn(move || {
        tracing::debug!(generation, resource = %query.resource, "fetch start");
        let result = provider.fetch(&query);
        let _ = tx.send(FetchUpdate::Page { generation, result });
    });
}
