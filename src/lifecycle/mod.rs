//! # Lifecycle
//!
//! Builds the collaborators, starts the view actors and shuts them down.
//!
//! ## Dependency Injection via Context
//!
//! A view is created without its collaborators and receives them when its
//! loop starts (`HomeView::run(context)`). Production wiring lives in
//! [`EstateApp::new`]; tests call [`EstateApp::with_context`] with the fakes
//! from [`crate::mock`].
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each view's channel
//! 2. **Views detect closure** - the loop exits and cancels in-flight requests
//! 3. **Await completion** - wait for every view task to finish

pub mod app;
pub mod tracing;

pub use self::app::*;
pub use self::tracing::*;
