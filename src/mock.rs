//! # Mock Collaborators
//!
//! Utilities for testing views without a network.
//!
//! Two styles of fake listing source are provided:
//!
//! - [`MockListingSource`] answers from a queue of expectations, set up with
//!   [`MockListingSource::expect_home`] and [`MockListingSource::expect_search`].
//! - [`create_deferred_source`] hands every call to the test over a channel, so
//!   the test decides *when* each request completes. Use it for ordering tests
//!   such as a slow response arriving after a fast one.
//!
//! [`MockContext`] bundles a source with a switchable connectivity check, a
//! recording notifier and a channel navigator.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

use crate::collaborators::{
    ChannelNavigator, Connectivity, ListingSource, Notice, Notifier, Route, ViewContext,
};
use crate::framework::FetchError;
use crate::model::{ListingRecord, TransactionMode};

type Listings = Result<Vec<ListingRecord>, FetchError>;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

#[derive(Debug)]
enum Expectation {
    Home {
        mode: TransactionMode,
        response: Listings,
    },
    Search {
        city: Option<String>,
        response: Listings,
    },
}

/// A listing source with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mock = MockListingSource::new();
/// mock.expect_home(TransactionMode::Buy).return_ok(vec![record]);
/// mock.expect_search(Some("Austin")).return_ok(vec![]);
///
/// // hand `mock.clone()` to the view...
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockListingSource {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    mismatches: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl MockListingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `home_listings` call for `mode`.
    pub fn expect_home(&self, mode: TransactionMode) -> ExpectationBuilder {
        ExpectationBuilder {
            kind: ExpectedCall::Home(mode),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `search` call for `city`.
    pub fn expect_search(&self, city: Option<&str>) -> ExpectationBuilder {
        ExpectationBuilder {
            kind: ExpectedCall::Search(city.map(str::to_string)),
            expectations: self.expectations.clone(),
        }
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met, in order.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected listing calls: {:?}", *mismatches);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn answer(&self, call: ExpectedCall) -> Listings {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.expectations.lock().unwrap().pop_front();

        match (call, next) {
            (ExpectedCall::Home(mode), Some(Expectation::Home { mode: expected, response }))
                if mode == expected =>
            {
                response
            }
            (ExpectedCall::Search(city), Some(Expectation::Search { city: expected, response }))
                if city == expected =>
            {
                response
            }
            (call, next) => {
                let message = format!("got {call:?}, expected {next:?}");
                self.mismatches.lock().unwrap().push(message.clone());
                Err(FetchError::RequestFailed(message))
            }
        }
    }
}

#[async_trait]
impl ListingSource for MockListingSource {
    async fn home_listings(&self, mode: TransactionMode) -> Listings {
        self.answer(ExpectedCall::Home(mode))
    }

    async fn search(&self, city: Option<&str>) -> Listings {
        self.answer(ExpectedCall::Search(city.map(str::to_string)))
    }
}

#[derive(Debug)]
enum ExpectedCall {
    Home(TransactionMode),
    Search(Option<String>),
}

/// Builder for one expectation.
pub struct ExpectationBuilder {
    kind: ExpectedCall,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return these records.
    pub fn return_ok(self, records: Vec<ListingRecord>) {
        self.push(Ok(records));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FetchError) {
        self.push(Err(error));
    }

    fn push(self, response: Listings) {
        let expectation = match self.kind {
            ExpectedCall::Home(mode) => Expectation::Home { mode, response },
            ExpectedCall::Search(city) => Expectation::Search { city, response },
        };
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// DEFERRED SOURCE
// =============================================================================

/// Type alias for the channel a test answers a deferred call on.
pub type Responder = oneshot::Sender<Listings>;

/// A call received by a [`DeferredListingSource`].
#[derive(Debug)]
pub enum SourceCall {
    Home {
        mode: TransactionMode,
        respond_to: Responder,
    },
    Search {
        city: Option<String>,
        respond_to: Responder,
    },
}

/// Listing source whose calls are answered by the test.
#[derive(Clone)]
pub struct DeferredListingSource {
    sender: mpsc::Sender<SourceCall>,
}

/// Creates a deferred source and the receiver the test pulls calls from.
///
/// # Testing Strategy
/// The view spawns each request as its own task. With a deferred source the
/// request parks until the test answers it through the [`Responder`], which
/// lets a test resolve requests in any order. A request the view cancels drops
/// its half of the channel, observable with `Responder::closed`.
pub fn create_deferred_source(buffer_size: usize) -> (DeferredListingSource, mpsc::Receiver<SourceCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (DeferredListingSource { sender }, receiver)
}

impl DeferredListingSource {
    async fn forward(&self, make: impl FnOnce(Responder) -> SourceCall) -> Listings {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FetchError::RequestFailed("test dropped the call receiver".into()))?;
        response
            .await
            .map_err(|_| FetchError::RequestFailed("test dropped the responder".into()))?
    }
}

#[async_trait]
impl ListingSource for DeferredListingSource {
    async fn home_listings(&self, mode: TransactionMode) -> Listings {
        self.forward(|respond_to| SourceCall::Home { mode, respond_to })
            .await
    }

    async fn search(&self, city: Option<&str>) -> Listings {
        let city = city.map(str::to_string);
        self.forward(|respond_to| SourceCall::Search { city, respond_to })
            .await
    }
}

/// Helper to verify that the next call is a `home_listings` call
pub async fn expect_home_call(
    receiver: &mut mpsc::Receiver<SourceCall>,
) -> Option<(TransactionMode, Responder)> {
    match receiver.recv().await {
        Some(SourceCall::Home { mode, respond_to }) => Some((mode, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a `search` call
pub async fn expect_search_call(
    receiver: &mut mpsc::Receiver<SourceCall>,
) -> Option<(Option<String>, Responder)> {
    match receiver.recv().await {
        Some(SourceCall::Search { city, respond_to }) => Some((city, respond_to)),
        _ => None,
    }
}

// =============================================================================
// OTHER COLLABORATORS
// =============================================================================

/// Connectivity check the test can switch on and off.
///
/// [`hold`](Self::hold) parks every probe until [`release`](Self::release),
/// which keeps the view suspended inside a request handler.
#[derive(Debug)]
pub struct StaticConnectivity {
    reachable: AtomicBool,
    probes: AtomicUsize,
    gate: watch::Sender<bool>,
}

impl StaticConnectivity {
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
            probes: AtomicUsize::new(0),
            gate: watch::Sender::new(true),
        }
    }

    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connectivity for StaticConnectivity {
    async fn is_reachable(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;
        self.reachable.load(Ordering::SeqCst)
    }
}

/// Notifier that keeps every notice for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// A [`ViewContext`] made of fakes, plus handles to inspect them.
pub struct MockContext {
    pub context: ViewContext,
    pub connectivity: Arc<StaticConnectivity>,
    pub notifier: Arc<RecordingNotifier>,
    pub routes: mpsc::UnboundedReceiver<Route>,
}

impl MockContext {
    /// Online, with `source` as the listing API.
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        let connectivity = Arc::new(StaticConnectivity::new(true));
        let notifier = Arc::new(RecordingNotifier::default());
        let (navigator, routes) = ChannelNavigator::new();

        let context = ViewContext {
            source,
            connectivity: connectivity.clone(),
            notifier: notifier.clone(),
            navigator: Arc::new(navigator),
        };

        Self {
            context,
            connectivity,
            notifier,
            routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_with_expectations() {
        let mock = MockListingSource::new();
        mock.expect_home(TransactionMode::Rent)
            .return_ok(vec![ListingRecord::new("r1")]);
        mock.expect_search(None).return_err(FetchError::Timeout);

        let records = mock.home_listings(TransactionMode::Rent).await.unwrap();
        assert_eq!(records[0].id, "r1");
        assert_eq!(mock.search(None).await, Err(FetchError::Timeout));

        assert_eq!(mock.calls(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected listing calls")]
    async fn test_mock_source_rejects_wrong_call() {
        let mock = MockListingSource::new();
        mock.expect_home(TransactionMode::Buy).return_ok(vec![]);

        let result = mock.home_listings(TransactionMode::Rent).await;
        assert!(result.is_err());
        mock.verify();
    }

    #[tokio::test]
    async fn test_deferred_source() {
        let (source, mut calls) = create_deferred_source(4);

        let task = tokio::spawn(async move { source.home_listings(TransactionMode::Buy).await });

        let (mode, responder) = expect_home_call(&mut calls).await.expect("Expected home call");
        assert_eq!(mode, TransactionMode::Buy);
        responder.send(Ok(vec![ListingRecord::new("a")])).unwrap();

        let records = task.await.unwrap().unwrap();
        assert_eq!(records.len(), 1);
    }
}
