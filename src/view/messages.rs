//! # View Messages
//!
//! Requests sent from a [`HomeViewClient`](super::HomeViewClient) to the
//! [`HomeView`](super::HomeView) actor, the completions its background
//! requests report back, and the snapshot it publishes.

use tokio::sync::oneshot;

use crate::framework::{FetchError, FetchState, Generation, ViewError};
use crate::model::{DetailParams, ListingRecord, QueryFilter, TransactionMode};

/// Type alias for the one-shot response channel used by the view.
pub type Response<T> = oneshot::Sender<Result<T, ViewError>>;

/// What happened to a request that asked the view to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A request went out under this generation.
    Issued(Generation),
    /// An equivalent request is already in flight; nothing new was sent.
    Coalesced,
    /// The filter did not change; nothing was sent.
    Unchanged,
    /// Offline. Nothing was sent and the view kept its previous state.
    Skipped,
}

#[derive(Debug)]
pub enum ViewRequest {
    Activate {
        filter: QueryFilter,
        respond_to: Response<Activation>,
    },
    Refresh {
        respond_to: Response<Activation>,
    },
    SetMode {
        mode: TransactionMode,
        respond_to: Response<Activation>,
    },
    SetSearchText {
        text: String,
        respond_to: Response<()>,
    },
    SubmitSearch {
        text: Option<String>,
        respond_to: Response<Activation>,
    },
    Select {
        id: String,
        respond_to: Response<DetailParams>,
    },
    Deactivate {
        respond_to: Response<()>,
    },
}

/// Result of a background request, tagged with the generation it was issued under.
#[derive(Debug)]
pub(crate) enum Completion {
    Listings {
        generation: Generation,
        result: Result<Vec<ListingRecord>, FetchError>,
    },
    Search {
        generation: Generation,
        /// Input text at submission; cleared on success only if still unchanged.
        submitted: Option<String>,
        result: Result<Vec<ListingRecord>, FetchError>,
    },
}

/// Everything a renderer needs to draw the home view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSnapshot {
    pub state: FetchState<ListingRecord>,
    pub filter: QueryFilter,
    pub active: bool,
}
