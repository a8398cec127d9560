//! The home view: listings by transaction mode, pull-to-refresh, city search
//! and selection handoff.

pub mod actor;
pub mod client;
pub mod messages;

pub use actor::*;
pub use client::*;
pub use messages::*;

use crate::config::ViewConfig;

/// Creates a new home view actor and its client.
pub fn new(config: &ViewConfig) -> (HomeView, HomeViewClient) {
    HomeView::new(config.buffer_size)
}
