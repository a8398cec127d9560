//! # Navigator
//!
//! Hands the selected record or the search results over to the next view.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::model::{DetailParams, ListingRecord};

/// Destinations reachable from the home view.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Detail(DetailParams),
    SearchResults(Vec<ListingRecord>),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Detail(_) => "PropertyDetail",
            Route::SearchResults(_) => "SearchResults",
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Forwards routes to whoever owns the navigation stack.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        let name = route.name();
        if self.sender.send(route).is_err() {
            warn!(route = name, "Navigation stack is gone, dropping route");
        } else {
            info!(route = name, "Navigated");
        }
    }
}
