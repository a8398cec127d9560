//! # Listing Source
//!
//! The remote list endpoints the views read from, and the reqwest-backed
//! implementation that talks to the property API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::ApiConfig;
use crate::framework::FetchError;
use crate::model::{ListingRecord, TransactionMode};

/// Remote source of listing records.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// `GET property/home/{mode}`
    async fn home_listings(&self, mode: TransactionMode) -> Result<Vec<ListingRecord>, FetchError>;

    /// `POST property/searchproperty`. `None` means no city filter.
    async fn search(&self, city: Option<&str>) -> Result<Vec<ListingRecord>, FetchError>;
}

/// Response body shared by both endpoints.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<ListingRecord>,
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    city: Option<&'a str>,
}

/// [`ListingSource`] over HTTP.
#[derive(Clone)]
pub struct HttpListingSource {
    client: Client,
    base: Url,
}

impl HttpListingSource {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let base = config
            .base_url()
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::RequestFailed(format!("bad endpoint {path}: {e}")))
    }

    async fn read_envelope(response: reqwest::Response) -> Result<Vec<ListingRecord>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Listing API returned an error status");
            return Err(FetchError::RequestFailed(format!("HTTP {status}")));
        }

        let envelope: Envelope = response.json().await.map_err(map_reqwest_error)?;
        debug!(size = envelope.data.len(), "Decoded listings");
        Ok(envelope.data)
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    #[instrument(skip(self))]
    async fn home_listings(&self, mode: TransactionMode) -> Result<Vec<ListingRecord>, FetchError> {
        let url = self.endpoint(&format!("property/home/{}", mode.as_path()))?;
        info!(%url, "Fetching home listings");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_envelope(response).await
    }

    #[instrument(skip(self))]
    async fn search(&self, city: Option<&str>) -> Result<Vec<ListingRecord>, FetchError> {
        let url = self.endpoint("property/searchproperty")?;
        info!(%url, "Searching listings");

        let response = self
            .client
            .post(url)
            .json(&SearchBody { city })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_envelope(response).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::RequestFailed(e.to_string())
    }
}
