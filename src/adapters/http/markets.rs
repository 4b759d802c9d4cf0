//! Market API Adapter - REST Implementation of the `MarketApi` Port
//!
//! Combines the lending-vault and mint-market endpoints into the single
//! per-chain row set the store expects, and serves paginated snapshot
//! history for charts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::market::{ChainId, MarketAddress, MarketRow, Snapshot};
use crate::ports::market_api::{FetchError, MarketApi};

use super::client::RestClient;
use super::types::{
    ChainListResponse, LendingVaultDto, MarketListResponse, MintMarketDto, SnapshotDto,
    UsdPriceResponse,
};

/// `MarketApi` implementation over the public REST endpoints.
pub struct LlamaApi {
    client: Arc<RestClient>,
}

impl LlamaApi {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Spot USD price of a token, `None` when the indexer has no quote.
    #[instrument(skip(self), fields(chain = %chain, token = %token))]
    pub async fn usd_price(
        &self,
        chain: &ChainId,
        token: &str,
    ) -> Result<Option<f64>, FetchError> {
        let response: UsdPriceResponse = self
            .client
            .get_json(&format!("/v1/usd_price/{chain}/{token}"))
            .await?;
        Ok(response.data.usd_price)
    }
}

#[async_trait]
impl MarketApi for LlamaApi {
    #[instrument(skip(self))]
    async fn list_chains(&self) -> Result<Vec<ChainId>, FetchError> {
        let response: ChainListResponse = self.client.get_json("/v1/chains").await?;
        Ok(response.data)
    }

    #[instrument(skip(self), fields(chain = %chain))]
    async fn fetch_markets(&self, chain: &ChainId) -> Result<Vec<MarketRow>, FetchError> {
        // The row set is loaded in full upfront per chain: lending vaults
        // and mint markets are two endpoints merged into one batch.
        let vaults: MarketListResponse<LendingVaultDto> = self
            .client
            .get_json(&format!("/v1/lending/markets/{chain}"))
            .await?;

        let mints: MarketListResponse<MintMarketDto> = self
            .client
            .get_json(&format!("/v1/mint/markets/{chain}"))
            .await?;

        let mut rows: Vec<MarketRow> = Vec::with_capacity(vaults.data.len() + mints.data.len());
        rows.extend(vaults.data.into_iter().map(|dto| dto.into_row(chain)));
        rows.extend(mints.data.into_iter().map(|dto| dto.into_row(chain)));

        debug!(rows = rows.len(), "Fetched market rows");
        Ok(rows)
    }

    #[instrument(skip(self), fields(chain = %chain, market = %market, page))]
    async fn fetch_snapshots(
        &self,
        chain: &ChainId,
        market: &MarketAddress,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Snapshot>, FetchError> {
        let response: MarketListResponse<SnapshotDto> = self
            .client
            .get_json(&format!(
                "/v1/lending/markets/{chain}/{market}/snapshots?page={page}&per_page={per_page}"
            ))
            .await?;
        Ok(response.data.into_iter().map(Into::into).collect())
    }
}
