//! Market API Response Types
//!
//! Wire shapes of the public market-data REST endpoints and their
//! conversion into domain rows. Numeric fields deserialize leniently:
//! a row with a hole in one metric still makes it into the store and is
//! handled by the pipeline (skipped by range filters, sorted last).

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::market::{ChainId, MarketRow, PoolType, Snapshot, TokenInfo};

/// Envelope around the chain list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainListResponse {
    /// Supported chain names.
    pub data: Vec<String>,
}

/// Token metadata as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenDto {
    /// Display symbol.
    pub symbol: String,
    /// Token contract address.
    pub address: String,
}

impl From<TokenDto> for TokenInfo {
    fn from(dto: TokenDto) -> Self {
        TokenInfo {
            symbol: dto.symbol,
            address: dto.address,
        }
    }
}

/// One lending vault row from `/v1/lending/markets/{chain}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LendingVaultDto {
    /// Vault controller address.
    pub address: String,
    /// Market display name.
    pub name: String,
    /// Collateral token.
    pub collateral_token: TokenDto,
    /// Borrowed token.
    pub borrowed_token: TokenDto,
    /// Available liquidity in USD.
    pub liquidity_usd: Option<f64>,
    /// Utilization percent.
    pub utilization_percent: Option<f64>,
    /// Total supplied assets in USD.
    pub total_assets_usd: Option<f64>,
    /// Total outstanding debt in USD.
    pub total_debt_usd: Option<f64>,
    /// Whether extra reward gauges are active.
    #[serde(default)]
    pub has_rewards: bool,
}

impl LendingVaultDto {
    /// Convert into a domain row for the given chain.
    pub fn into_row(self, chain: &ChainId) -> MarketRow {
        MarketRow {
            chain: chain.clone(),
            address: self.address,
            name: self.name,
            collateral: self.collateral_token.into(),
            borrowed: self.borrowed_token.into(),
            liquidity_usd: self.liquidity_usd,
            utilization_percent: self.utilization_percent,
            total_assets_usd: self.total_assets_usd,
            total_debt_usd: self.total_debt_usd,
            has_rewards: self.has_rewards,
            favorite: false,
            pool_type: PoolType::Lend,
        }
    }
}

/// One crvUSD mint market row from `/v1/mint/markets/{chain}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MintMarketDto {
    /// Controller address.
    pub address: String,
    /// Market display name.
    pub name: String,
    /// Collateral token.
    pub collateral_token: TokenDto,
    /// Stablecoin being minted (crvUSD).
    pub stablecoin_token: TokenDto,
    /// Borrowable liquidity in USD.
    pub liquidity_usd: Option<f64>,
    /// Utilization percent.
    pub utilization_percent: Option<f64>,
    /// Total collateral value in USD.
    pub total_collateral_usd: Option<f64>,
    /// Total outstanding debt in USD.
    pub total_debt_usd: Option<f64>,
}

impl MintMarketDto {
    /// Convert into a domain row for the given chain.
    pub fn into_row(self, chain: &ChainId) -> MarketRow {
        MarketRow {
            chain: chain.clone(),
            address: self.address,
            name: self.name,
            collateral: self.collateral_token.into(),
            borrowed: self.stablecoin_token.into(),
            liquidity_usd: self.liquidity_usd,
            utilization_percent: self.utilization_percent,
            total_assets_usd: self.total_collateral_usd,
            total_debt_usd: self.total_debt_usd,
            has_rewards: false,
            favorite: false,
            pool_type: PoolType::Mint,
        }
    }
}

/// Envelope around a market list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketListResponse<T> {
    /// Market rows for the requested chain.
    pub data: Vec<T>,
}

/// Envelope around `/v1/usd_price/{chain}/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsdPriceResponse {
    pub data: UsdPriceDto,
}

/// Spot USD price of one token.
#[derive(Debug, Clone, Deserialize)]
pub struct UsdPriceDto {
    /// Current price; absent when the indexer has no quote.
    pub usd_price: Option<f64>,
}

/// One historical snapshot from `/v1/lending/markets/{chain}/{address}/snapshots`.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDto {
    /// Snapshot timestamp.
    pub timestamp: DateTime<Utc>,
    /// Borrow APY percent at that time.
    pub borrow_apy: Option<f64>,
    /// Lend APY percent at that time (absent on mint markets).
    pub lend_apy: Option<f64>,
}

impl From<SnapshotDto> for Snapshot {
    fn from(dto: SnapshotDto) -> Self {
        Snapshot {
            timestamp: dto.timestamp,
            borrow_apy: dto.borrow_apy,
            lend_apy: dto.lend_apy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lending_vault_deserialization_with_holes() {
        let json = r#"{
            "address": "0x37417B2238AA52D0DD2D6252d989E728e8f706e4",
            "name": "wstETH-long",
            "collateral_token": {"symbol": "wstETH", "address": "0xc"},
            "borrowed_token": {"symbol": "crvUSD", "address": "0xb"},
            "liquidity_usd": 1000000.5,
            "utilization_percent": null,
            "total_assets_usd": 2000000,
            "total_debt_usd": null
        }"#;
        let dto: LendingVaultDto = serde_json::from_str(json).unwrap();
        let row = dto.into_row(&"ethereum".to_string());
        assert_eq!(row.pool_type, PoolType::Lend);
        assert_eq!(row.utilization_percent, None);
        assert_eq!(row.liquidity_usd, Some(1_000_000.5));
        assert!(!row.has_rewards);
    }

    #[test]
    fn test_mint_market_maps_collateral_to_assets() {
        let json = r#"{
            "address": "0xabc",
            "name": "sfrxETH",
            "collateral_token": {"symbol": "sfrxETH", "address": "0xc"},
            "stablecoin_token": {"symbol": "crvUSD", "address": "0xb"},
            "liquidity_usd": 10.0,
            "utilization_percent": 5.0,
            "total_collateral_usd": 42.0,
            "total_debt_usd": 7.0
        }"#;
        let dto: MintMarketDto = serde_json::from_str(json).unwrap();
        let row = dto.into_row(&"ethereum".to_string());
        assert_eq!(row.pool_type, PoolType::Mint);
        assert_eq!(row.total_assets_usd, Some(42.0));
        assert_eq!(row.borrowed.symbol, "crvUSD");
    }

    #[test]
    fn test_snapshot_deserialization() {
        let json = r#"{"timestamp": "2025-06-01T00:00:00Z", "borrow_apy": 4.2, "lend_apy": null}"#;
        let dto: SnapshotDto = serde_json::from_str(json).unwrap();
        let snap: Snapshot = dto.into();
        assert_eq!(snap.borrow_apy, Some(4.2));
        assert_eq!(snap.lend_apy, None);
    }
}
