//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//! Log levels come from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **View lifecycle**: start, deactivation, shutdown with the final state
//! - **Requests**: every issued fetch or search with its generation and mode/city
//! - **Completions**: loaded sizes, failures, and discarded stale completions
//! - **Navigation**: every route handed to the navigation stack
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run -- --mode rent
//!
//! # Show stale-completion and coalescing decisions
//! RUST_LOG=debug cargo run -- --mode buy
//!
//! # Filter to the guard
//! RUST_LOG=estate_views::framework::guard=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO View started view="home"
//! INFO Fetching listings generation=1 mode=buy
//! INFO Listings loaded generation=1 size=12
//! INFO Navigated route="PropertyDetail"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
