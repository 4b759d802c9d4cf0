//! REST HTTP Client - Retrying Read-only API Client
//!
//! Wraps reqwest with a concurrency cap, timeouts, and bounded retries
//! for the public market-data REST endpoints. No authentication: every
//! endpoint this crate touches is read-only and public.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::market_api::FetchError;

/// Configuration for the REST client.
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Base URL of the market-data API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Maximum retries on transient errors.
    pub max_retries: u32,
    /// Base delay between retries (exponential backoff).
    pub retry_base_delay: Duration,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://prices.curve.finance".to_string(),
            timeout: Duration::from_secs(30),
            max_concurrent: 10,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(200),
        }
    }
}

/// Retrying HTTP client for the public market-data API.
pub struct RestClient {
    /// Underlying HTTP client.
    http: Client,
    /// Client configuration.
    config: RestClientConfig,
    /// Concurrency limiter.
    semaphore: Arc<Semaphore>,
}

impl RestClient {
    /// Create a new REST client.
    pub fn new(config: RestClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        let semaphore = Arc::new(Semaphore::new(config.max_concurrent));

        Ok(Self {
            http,
            config,
            semaphore,
        })
    }

    /// Execute a GET request with retries and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let response = self.get(path).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Execute a GET request with concurrency limiting and retries.
    pub async fn get(&self, path: &str) -> Result<Response, FetchError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| FetchError::Cancelled)?;

        let url = format!("{}{}", self.config.base_url, path);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
                debug!(attempt, delay_ms = delay.as_millis(), path, "Retrying request");
                sleep(delay).await;
            }

            match self.http.get(&url).send().await {
                Ok(response) => match response.status() {
                    StatusCode::OK => return Ok(response),
                    StatusCode::TOO_MANY_REQUESTS => {
                        warn!(path, "Rate limited by API, backing off");
                        sleep(Duration::from_secs(2)).await;
                        last_error = Some(FetchError::Http("rate limited".to_string()));
                        continue;
                    }
                    status if status.is_server_error() => {
                        warn!(path, status = %status, "Server error, retrying");
                        last_error = Some(FetchError::Http(format!("server error: {status}")));
                        continue;
                    }
                    status => {
                        let body = response.text().await.unwrap_or_default();
                        return Err(FetchError::Http(format!("API error {status}: {body}")));
                    }
                },
                Err(e) => {
                    warn!(path, error = %e, attempt, "Request failed");
                    last_error = Some(FetchError::Http(e.to_string()));
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::Http("max retries exceeded".to_string())))
    }
}
