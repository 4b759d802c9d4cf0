//! Market API Port - REST Market Data Interface
//!
//! Defines the trait for fetching market rows and historical chart
//! snapshots from the read-only lending/minting REST endpoints.
//! The store treats the returned batches as opaque input.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::market::{ChainId, MarketAddress, MarketRow, Snapshot};

/// Typed failure of a market/snapshot fetch.
///
/// The store flattens this into the `reason` string of its error state;
/// the variants exist so adapters and tests can assert on failure class.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport or HTTP status failure.
    #[error("http error: {0}")]
    Http(String),
    /// Response body did not decode into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// The request was superseded before its result could be committed.
    #[error("request cancelled")]
    Cancelled,
}

/// Trait for read-only market data providers.
///
/// Implementors wrap the public REST endpoints (or mocks in tests).
/// Row sets are loaded in full upfront per chain; only chart snapshots
/// are paginated.
#[async_trait]
pub trait MarketApi: Send + Sync + 'static {
    /// List the chains the API serves markets for.
    async fn list_chains(&self) -> Result<Vec<ChainId>, FetchError>;

    /// Fetch the complete row set for one chain (lending vaults and
    /// mint markets combined).
    async fn fetch_markets(&self, chain: &ChainId) -> Result<Vec<MarketRow>, FetchError>;

    /// Fetch one page of historical chart snapshots for a market.
    ///
    /// Pages are 1-based; an empty page means history is exhausted.
    async fn fetch_snapshots(
        &self,
        chain: &ChainId,
        market: &MarketAddress,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Snapshot>, FetchError>;
}
