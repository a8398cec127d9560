use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::collaborators::{
    ChannelNavigator, HttpListingSource, Route, TcpProbe, TracingNotifier, ViewContext,
};
use crate::config::{AppConfig, ConfigError, ViewConfig};
use crate::framework::FetchError;
use crate::view::{self, HomeViewClient};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot build listing client: {0}")]
    Source(#[from] FetchError),
}

/// Runtime orchestrator for the views.
///
/// `EstateApp` is responsible for:
/// - **Dependency Wiring**: building the collaborators from configuration
/// - **Lifecycle Management**: spawning the view actors and stopping them
///
/// # Example
///
/// ```ignore
/// let (app, mut routes) = EstateApp::new(&AppConfig::load(None)?)?;
/// app.home.load_home(TransactionMode::Buy).await?;
/// // ... render app.home.subscribe(), forward routes ...
/// app.shutdown().await?;
/// ```
pub struct EstateApp {
    /// Client for the home view
    pub home: HomeViewClient,

    /// Task handles for all running views (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EstateApp {
    /// Wires the HTTP listing source, the TCP reachability probe, the logging
    /// notifier and a channel navigator, then starts the home view.
    ///
    /// Returns the app and the receiving end of the navigation channel.
    pub fn new(config: &AppConfig) -> Result<(Self, mpsc::UnboundedReceiver<Route>), StartupError> {
        let source = HttpListingSource::new(&config.api)?;
        let probe = TcpProbe::new(
            config.api.probe_address()?,
            Duration::from_millis(config.connectivity.probe_timeout_ms),
        );
        let (navigator, routes) = ChannelNavigator::new();

        let context = ViewContext {
            source: Arc::new(source),
            connectivity: Arc::new(probe),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(navigator),
        };

        Ok((Self::with_context(&config.view, context), routes))
    }

    /// Starts the views with the given collaborators.
    pub fn with_context(config: &ViewConfig, context: ViewContext) -> Self {
        let (home_view, home) = view::new(config);
        let home_handle = tokio::spawn(home_view.run(context));

        Self {
            home,
            handles: vec![home_handle],
        }
    }

    /// Drops the clients, which closes the view channels, then waits for every view task.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down views...");
        drop(self.home);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("View task failed: {:?}", e);
                return Err(format!("View task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
