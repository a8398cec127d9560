//! # Errors
//!
//! [`FetchError`] covers a single request to a listing source. [`ViewError`]
//! covers talking to a view actor.

use thiserror::Error;

/// Errors produced while fetching remote list data.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The device is offline. No request was issued.
    #[error("No internet connection")]
    NoConnectivity,

    /// The transport gave up waiting for the server.
    #[error("Server Timeout")]
    Timeout,

    /// The request was issued and failed (network error, bad status, bad body).
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Errors that can occur while communicating with a view actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error("View closed")]
    ViewClosed,

    #[error("View dropped response channel")]
    ViewDropped,

    /// The view was deactivated and has not been activated again.
    #[error("View is not active")]
    Inactive,

    /// No record with this id is currently displayed.
    #[error("Listing not found: {0}")]
    NotFound(String),
}
