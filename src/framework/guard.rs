//! # Stale-Response Guard
//!
//! Every request a view issues gets a [`Generation`]. Completions carry their
//! generation back to the view, which applies them only while that generation
//! is still the latest one. Starting a new request also aborts the task of the
//! previous one, so at most one request per tracker is ever in flight.

use std::fmt;
use tokio::task::JoinHandle;
use tracing::debug;

/// Token identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks the latest request of one kind for one view.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
    in_flight: Option<(Generation, JoinHandle<()>)>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a new generation. Any earlier request is aborted and becomes stale.
    pub fn begin(&mut self) -> Generation {
        self.abort_in_flight();
        self.current += 1;
        Generation(self.current)
    }

    /// Records the task that runs the request for `generation`.
    ///
    /// A handle for a generation that is no longer current is aborted right away.
    pub fn attach(&mut self, generation: Generation, handle: JoinHandle<()>) {
        if !self.is_current(generation) {
            handle.abort();
            return;
        }
        self.in_flight = Some((generation, handle));
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Marks `generation` as complete. Returns false when the completion is stale
    /// and must be discarded.
    pub fn settle(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            debug!(%generation, current = self.current, "Discarding stale completion");
            return false;
        }
        if matches!(self.in_flight, Some((g, _)) if g == generation) {
            self.in_flight = None;
        }
        true
    }

    /// Aborts the in-flight request and invalidates every issued generation.
    pub fn cancel(&mut self) {
        self.abort_in_flight();
        self.current += 1;
    }

    fn abort_in_flight(&mut self) {
        if let Some((generation, handle)) = self.in_flight.take() {
            debug!(%generation, "Aborting superseded request");
            handle.abort();
        }
    }
}

impl Drop for RequestTracker {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}
