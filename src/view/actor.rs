//! # Home View Actor
//!
//! The server half of the home view. It owns the view state and processes
//! requests one at a time, so no locks guard the state.
//!
//! Network calls never run on the actor's loop. Each one is spawned as its own
//! task and reports back over the completion channel with the generation it was
//! issued under; the loop applies a completion only while that generation is
//! still current and the view is still active.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::collaborators::{Notice, Route, ViewContext};
use crate::framework::{FetchState, RequestTracker, ViewError};
use crate::model::{DetailParams, ListingRecord, QueryFilter};
use crate::view::client::HomeViewClient;
use crate::view::messages::{Activation, Completion, ViewRequest, ViewSnapshot};

pub struct HomeView {
    receiver: mpsc::Receiver<ViewRequest>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_sender: mpsc::UnboundedSender<Completion>,
    snapshot: watch::Sender<ViewSnapshot>,
    listings: RequestTracker,
    searches: RequestTracker,
    state: FetchState<ListingRecord>,
    filter: QueryFilter,
    active: bool,
}

impl HomeView {
    /// Creates the actor and its client. The actor does nothing until `run` is spawned.
    pub fn new(buffer_size: usize) -> (Self, HomeViewClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (snapshot, snapshots) = watch::channel(ViewSnapshot::default());

        let view = Self {
            receiver,
            completions,
            completion_sender,
            snapshot,
            listings: RequestTracker::new(),
            searches: RequestTracker::new(),
            state: FetchState::Idle,
            filter: QueryFilter::default(),
            active: false,
        };
        (view, HomeViewClient::new(sender, snapshots))
    }

    /// Runs the event loop until every client is dropped.
    ///
    /// The collaborators are injected here rather than in `new`, so the view can
    /// be created before the things it talks to.
    pub async fn run(mut self, context: ViewContext) {
        info!(view = "home", "View started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request, &context).await,
                    None => break,
                },
                Some(completion) = self.completions.recv() => {
                    self.handle_completion(completion, &context);
                }
            }
        }

        self.listings.cancel();
        self.searches.cancel();
        info!(view = "home", state = self.state.name(), "Shutdown");
    }

    async fn handle_request(&mut self, request: ViewRequest, context: &ViewContext) {
        match request {
            ViewRequest::Activate { filter, respond_to } => {
                debug!(?filter, "Activate");
                self.active = true;
                let outcome = self.start_fetch(filter, context).await;
                if outcome == Activation::Skipped {
                    self.publish();
                }
                let _ = respond_to.send(Ok(outcome));
            }
            ViewRequest::Refresh { respond_to } => {
                debug!("Refresh");
                let outcome = if !self.active {
                    Err(ViewError::Inactive)
                } else if self.state.is_busy() {
                    Ok(Activation::Coalesced)
                } else {
                    Ok(self.start_fetch(self.filter.clone(), context).await)
                };
                let _ = respond_to.send(outcome);
            }
            ViewRequest::SetMode { mode, respond_to } => {
                debug!(%mode, "SetMode");
                let outcome = if !self.active {
                    Err(ViewError::Inactive)
                } else if mode == self.filter.mode {
                    Ok(Activation::Unchanged)
                } else {
                    let filter = QueryFilter {
                        mode,
                        ..self.filter.clone()
                    };
                    Ok(self.start_fetch(filter, context).await)
                };
                let _ = respond_to.send(outcome);
            }
            ViewRequest::SetSearchText { text, respond_to } => {
                self.filter.city = Some(text);
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            ViewRequest::SubmitSearch { text, respond_to } => {
                let outcome = if !self.active {
                    Err(ViewError::Inactive)
                } else {
                    if let Some(text) = text {
                        self.filter.city = Some(text);
                        self.publish();
                    }
                    Ok(self.start_search(context).await)
                };
                let _ = respond_to.send(outcome);
            }
            ViewRequest::Select { id, respond_to } => {
                let outcome = self.select(&id, context);
                let _ = respond_to.send(outcome);
            }
            ViewRequest::Deactivate { respond_to } => {
                info!(view = "home", "Deactivated");
                self.active = false;
                self.listings.cancel();
                self.searches.cancel();
                if self.state.is_busy() {
                    self.state = FetchState::Idle;
                }
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
        }
    }

    /// Issues a listing request for `filter`, preempting any request in flight.
    async fn start_fetch(&mut self, filter: QueryFilter, context: &ViewContext) -> Activation {
        if self.state.is_busy() && filter.mode == self.filter.mode {
            debug!(mode = %filter.mode, "Request already in flight");
            self.filter = filter;
            self.publish();
            return Activation::Coalesced;
        }

        if !context.connectivity.is_reachable().await {
            warn!(mode = %filter.mode, "Offline, request skipped");
            context.notifier.notify(Notice::no_connectivity());
            return Activation::Skipped;
        }

        let generation = self.listings.begin();
        let mode = filter.mode;
        self.filter = filter;
        self.state = FetchState::Loading;
        self.publish();

        let source = context.source.clone();
        let sender = self.completion_sender.clone();
        let handle = tokio::spawn(async move {
            let result = source.home_listings(mode).await;
            let _ = sender.send(Completion::Listings { generation, result });
        });
        self.listings.attach(generation, handle);

        info!(%generation, %mode, "Fetching listings");
        Activation::Issued(generation)
    }

    async fn start_search(&mut self, context: &ViewContext) -> Activation {
        if !context.connectivity.is_reachable().await {
            warn!("Offline, search skipped");
            context.notifier.notify(Notice::no_connectivity());
            return Activation::Skipped;
        }

        let generation = self.searches.begin();
        let city = self.filter.search_city().map(str::to_string);
        let submitted = self.filter.city.clone();

        let source = context.source.clone();
        let sender = self.completion_sender.clone();
        info!(%generation, city = city.as_deref().unwrap_or(""), "Searching");
        let handle = tokio::spawn(async move {
            let result = source.search(city.as_deref()).await;
            let _ = sender.send(Completion::Search {
                generation,
                submitted,
                result,
            });
        });
        self.searches.attach(generation, handle);

        Activation::Issued(generation)
    }

    fn handle_completion(&mut self, completion: Completion, context: &ViewContext) {
        match completion {
            Completion::Listings { generation, result } => {
                if !self.listings.settle(generation) || !self.active {
                    return;
                }
                match result {
                    Ok(items) => {
                        self.state = FetchState::loaded(items);
                        let size = self.state.items().map_or(0, <[_]>::len);
                        info!(%generation, size, "Listings loaded");
                    }
                    Err(e) => {
                        warn!(%generation, error = %e, "Listing request failed");
                        context.notifier.notify(Notice::from(&e));
                        self.state = FetchState::Failed(e.to_string());
                    }
                }
                self.publish();
            }
            Completion::Search {
                generation,
                submitted,
                result,
            } => {
                if !self.searches.settle(generation) || !self.active {
                    return;
                }
                match result {
                    Ok(items) => {
                        info!(%generation, size = items.len(), "Search complete");
                        context.navigator.navigate(Route::SearchResults(items));
                        if self.filter.city == submitted {
                            self.filter.city = None;
                            self.publish();
                        } else {
                            debug!("Search text edited while in flight, keeping it");
                        }
                    }
                    Err(e) => {
                        warn!(%generation, error = %e, "Search failed");
                        context.notifier.notify(Notice::from(&e));
                    }
                }
            }
        }
    }

    fn select(&self, id: &str, context: &ViewContext) -> Result<DetailParams, ViewError> {
        if !self.active {
            return Err(ViewError::Inactive);
        }
        let record = self.state.find(id).ok_or_else(|| {
            warn!(%id, "Selected listing is not displayed");
            ViewError::NotFound(id.to_string())
        })?;

        let params = DetailParams::from(record);
        debug!(?params, "Selected");
        context.navigator.navigate(Route::Detail(params.clone()));
        Ok(params)
    }

    fn publish(&self) {
        self.snapshot.send_replace(ViewSnapshot {
            state: self.state.clone(),
            filter: self.filter.clone(),
            active: self.active,
        });
    }
}
