//! # Estate Views
//!
//! > **Headless views for a real-estate browsing client.**
//!
//! This crate holds the logic behind the property screens: listings by
//! transaction mode (buy or rent), pull-to-refresh, search by city, and the
//! handoff from a selected card to the detail view. It talks to the property
//! API over HTTP (`property/home/:type`, `property/searchproperty`) and renders
//! cards as HTML markup.
//!
//! ## Architecture Notes
//!
//! ### 1. One actor per view
//! Each view runs in its own Tokio task and processes requests sequentially, so
//! its state needs no locks. Network calls are spawned as separate tasks and
//! report back over a completion channel; the view stays responsive while they
//! run.
//!
//! ### 2. Explicit fetch state
//! A view is always in exactly one [`FetchState`](framework::FetchState):
//! idle, loading, loaded (possibly empty) or failed. There is no busy flag that
//! could disagree with a stale result.
//!
//! ### 3. Stale-response guard
//! Every request carries a [`Generation`](framework::Generation). Issuing a new
//! request aborts the previous one, and a completion whose generation is no
//! longer current is discarded, so a slow old response never overwrites a newer
//! one.
//!
//! ### 4. Injected collaborators
//! The listing API, the reachability check, the toast mechanism and navigation
//! are traits in [`collaborators`], injected into the view when it starts.
//! Tests swap in the fakes from [`mock`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - listing records, filters and the detail handoff parameters
//! - [`framework`] - fetch state, generation guard, errors
//! - [`collaborators`] - listing source (HTTP), connectivity, notifier, navigator
//! - [`view`] - the home view actor and its client
//! - [`components`] - card and screen rendering
//! - [`lifecycle`] - wiring, startup, shutdown and tracing setup
//! - [`config`] - YAML and environment configuration
//!
//! ### Running the Demo
//!
//! ```bash
//! ESTATE_API_BASE_URL=http://localhost:3000/ RUST_LOG=info cargo run -- --mode rent
//! ```

pub mod collaborators;
pub mod components;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod view;
