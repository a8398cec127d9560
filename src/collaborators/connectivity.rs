//! # Connectivity
//!
//! Reachability check consulted before every request. When it reports offline
//! the view skips the request entirely.

use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, warn};

#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// Opens a TCP connection to the API host and reports whether it succeeded
/// within the timeout.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    /// `address` is `host:port`.
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Connectivity for TcpProbe {
    async fn is_reachable(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(_)) => {
                debug!(address = %self.address, "Reachable");
                true
            }
            Ok(Err(e)) => {
                warn!(address = %self.address, error = %e, "Unreachable");
                false
            }
            Err(_) => {
                warn!(address = %self.address, "Reachability probe timed out");
                false
            }
        }
    }
}
