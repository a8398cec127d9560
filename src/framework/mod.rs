//! Generic building blocks for data-fetch views.
//!
//! # Main Components
//!
//! - [`FetchState`] - Tagged union a view publishes (idle, loading, loaded, failed)
//! - [`RequestTracker`] - Generation tokens and cancellation for the stale-response guard
//! - [`FetchError`] / [`ViewError`] - Common error types
//!
//! # Testing
//!
//! See [`crate::mock`] for fake collaborators that let views run without a network.

pub mod error;
pub mod guard;
pub mod state;

pub use error::*;
pub use guard::*;
pub use state::*;
