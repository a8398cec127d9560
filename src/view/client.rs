//! # Home View Client
//!
//! The handle the UI layer holds. Every method sends one request to the actor
//! and waits for its answer; state changes that happen later (a fetch
//! completing) are observed through [`HomeViewClient::subscribe`].

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::framework::ViewError;
use crate::model::{DetailParams, QueryFilter, TransactionMode};
use crate::view::messages::{Activation, Response, ViewRequest, ViewSnapshot};

#[derive(Clone)]
pub struct HomeViewClient {
    sender: mpsc::Sender<ViewRequest>,
    snapshots: watch::Receiver<ViewSnapshot>,
}

impl HomeViewClient {
    pub(crate) fn new(
        sender: mpsc::Sender<ViewRequest>,
        snapshots: watch::Receiver<ViewSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> ViewRequest,
    ) -> Result<T, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewDropped)?
    }

    /// Mounts the view and fetches listings for `filter`.
    #[instrument(skip(self))]
    pub async fn activate(&self, filter: QueryFilter) -> Result<Activation, ViewError> {
        debug!("Sending request");
        self.request(|respond_to| ViewRequest::Activate { filter, respond_to })
            .await
    }

    /// Mounts the view on the listings for `mode`.
    pub async fn load_home(&self, mode: TransactionMode) -> Result<Activation, ViewError> {
        self.activate(QueryFilter::new(mode)).await
    }

    /// Pull-to-refresh. Coalesced while a fetch is in flight.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Activation, ViewError> {
        debug!("Sending request");
        self.request(|respond_to| ViewRequest::Refresh { respond_to })
            .await
    }

    /// Switches between buy and rent, dropping the current results.
    #[instrument(skip(self))]
    pub async fn set_mode(&self, mode: TransactionMode) -> Result<Activation, ViewError> {
        debug!("Sending request");
        self.request(|respond_to| ViewRequest::SetMode { mode, respond_to })
            .await
    }

    /// Updates the search box. Does not search.
    pub async fn set_search_text(&self, text: impl Into<String>) -> Result<(), ViewError> {
        let text = text.into();
        self.request(|respond_to| ViewRequest::SetSearchText { text, respond_to })
            .await
    }

    /// Searches for the city currently in the search box.
    #[instrument(skip(self))]
    pub async fn submit_search(&self) -> Result<Activation, ViewError> {
        debug!("Sending request");
        self.request(|respond_to| ViewRequest::SubmitSearch {
            text: None,
            respond_to,
        })
        .await
    }

    /// Puts `text` in the search box and submits it.
    #[instrument(skip(self, text))]
    pub async fn submit_search_with(
        &self,
        text: impl Into<String>,
    ) -> Result<Activation, ViewError> {
        let text = Some(text.into());
        self.request(|respond_to| ViewRequest::SubmitSearch { text, respond_to })
            .await
    }

    /// Opens the detail view for the displayed listing `id`.
    #[instrument(skip(self, id))]
    pub async fn select(&self, id: impl Into<String>) -> Result<DetailParams, ViewError> {
        let id = id.into();
        debug!(%id, "Sending request");
        self.request(|respond_to| ViewRequest::Select { id, respond_to })
            .await
    }

    /// Unmounts the view. Results still in flight are discarded.
    #[instrument(skip(self))]
    pub async fn deactivate(&self) -> Result<(), ViewError> {
        debug!("Sending request");
        self.request(|respond_to| ViewRequest::Deactivate { respond_to })
            .await
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a published snapshot satisfies `predicate`.
    pub async fn wait_until<F>(&self, predicate: F) -> Result<ViewSnapshot, ViewError>
    where
        F: FnMut(&ViewSnapshot) -> bool,
    {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        Ok(snapshot.clone())
    }
}
