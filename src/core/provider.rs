//! The data-access seam.
//!
//! The UI never touches storage directly: everything goes through a
//! [`DataProvider`], and the fetch runtime calls it from a worker thread so
//! the event loop stays responsive. The provider owns ordering — rows render
//! exactly as returned, with no client-side re-sorting.

use thiserror::Error;

use super::category::Category;
use super::query::{Page, Query, SortState};

/// One page of results, with the applied sort echoed back.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    /// Records in provider order.
    pub records: Vec<Category>,
    /// The sort the provider actually applied.
    pub sort: SortState,
    /// Total records in the collection (before pagination).
    pub total: u64,
    /// The page window this response covers.
    pub page: Page,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("malformed record in `{resource}`: {source}")]
    Malformed {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of paged, sorted, field-projected records.
///
/// `fetch` may block; callers are expected to run it off the UI thread.
pub trait DataProvider: Send + Sync {
    fn fetch(&self, query: &Query) -> Result<ListPage, ProviderError>;
}
