//! Injected collaborators of a view: the listing API, the reachability check,
//! the toast mechanism and the navigation stack.
//!
//! Each is a trait so tests can substitute the fakes in [`crate::mock`].

pub mod connectivity;
pub mod listing_source;
pub mod navigator;
pub mod notifier;

pub use connectivity::*;
pub use listing_source::*;
pub use navigator::*;
pub use notifier::*;

use std::sync::Arc;

/// Everything a view needs from the outside world.
#[derive(Clone)]
pub struct ViewContext {
    pub source: Arc<dyn ListingSource>,
    pub connectivity: Arc<dyn Connectivity>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}
