//! Core market domain types.
//!
//! Defines the entities the store and pipeline operate on: market rows,
//! token metadata, pool types, and historical chart snapshots.
//! These types are the foundation of the hexagonal architecture's inner ring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────
// Type aliases consumed by ports and adapters
// ────────────────────────────────────────────

/// Lightweight chain identifier used across the store ("ethereum", "arbitrum", ...).
pub type ChainId = String;

/// Lightweight market address used at the ports boundary (0x-prefixed hex).
pub type MarketAddress = String;

/// Identity of a market across chains: (chain, address).
///
/// Used as the key for favorites and snapshot slices.
pub type MarketKey = (ChainId, MarketAddress);

// ────────────────────────────────────────────
// Enums shared across domain and ports
// ────────────────────────────────────────────

/// Market category: crvUSD mint market or lending vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    /// crvUSD minting market (borrow against collateral).
    Mint,
    /// Lending vault (supply/borrow pair).
    Lend,
}

impl std::fmt::Display for PoolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mint => write!(f, "Mint"),
            Self::Lend => write!(f, "Lend"),
        }
    }
}

/// Asset token metadata attached to a market row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Display symbol ("wstETH", "crvUSD").
    pub symbol: String,
    /// Token contract address.
    pub address: String,
}

impl TokenInfo {
    /// Convenience constructor for tests and adapters.
    pub fn new(symbol: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            address: address.into(),
        }
    }
}

/// One lending/minting market's aggregated on-chain metrics for display.
///
/// Numeric fields are `Option` because upstream rows occasionally arrive
/// with holes; the pipeline skips such rows for the affected predicate or
/// sorts them last instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRow {
    /// Chain this market lives on.
    pub chain: ChainId,
    /// Controller/vault address, the row's identity within its chain.
    pub address: MarketAddress,
    /// Human-readable market name ("wstETH-long").
    pub name: String,
    /// Collateral token.
    pub collateral: TokenInfo,
    /// Borrowed token.
    pub borrowed: TokenInfo,
    /// Available liquidity in USD.
    pub liquidity_usd: Option<f64>,
    /// Utilization of the market, percent in [0, 100].
    pub utilization_percent: Option<f64>,
    /// Total supplied assets in USD.
    pub total_assets_usd: Option<f64>,
    /// Total outstanding debt in USD.
    pub total_debt_usd: Option<f64>,
    /// Whether the market currently carries extra reward incentives.
    pub has_rewards: bool,
    /// User-profile favorite flag, stamped on by the store.
    pub favorite: bool,
    /// Mint market or lending vault.
    pub pool_type: PoolType,
}

impl MarketRow {
    /// Identity key of this row.
    pub fn key(&self) -> MarketKey {
        (self.chain.clone(), self.address.clone())
    }

    /// TVL of the pool: total assets minus total debt.
    ///
    /// `None` when either side is missing; callers treat that as
    /// below any threshold.
    pub fn tvl(&self) -> Option<f64> {
        match (self.total_assets_usd, self.total_debt_usd) {
            (Some(assets), Some(debt)) => Some(assets - debt),
            _ => None,
        }
    }

    /// Case-insensitive text match against name and token symbols.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.collateral.symbol.to_lowercase().contains(needle_lower)
            || self.borrowed.symbol.to_lowercase().contains(needle_lower)
    }
}

/// A historical data point for a market's chart, fetched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Borrow APY at that time, percent.
    pub borrow_apy: Option<f64>,
    /// Lend APY at that time, percent (None for mint markets).
    pub lend_apy: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> MarketRow {
        MarketRow {
            chain: "ethereum".to_string(),
            address: "0x37417B2238AA52D0DD2D6252d989E728e8f706e4".to_string(),
            name: "wstETH-long".to_string(),
            collateral: TokenInfo::new("wstETH", "0xc0ll"),
            borrowed: TokenInfo::new("crvUSD", "0xb0rr"),
            liquidity_usd: Some(1_000_000.0),
            utilization_percent: Some(42.5),
            total_assets_usd: Some(2_000_000.0),
            total_debt_usd: Some(850_000.0),
            has_rewards: false,
            favorite: false,
            pool_type: PoolType::Lend,
        }
    }

    #[test]
    fn test_tvl_subtracts_debt() {
        assert_eq!(row().tvl(), Some(1_150_000.0));
    }

    #[test]
    fn test_tvl_none_when_field_missing() {
        let mut r = row();
        r.total_debt_usd = None;
        assert_eq!(r.tvl(), None);
    }

    #[test]
    fn test_matches_text_against_symbols() {
        let r = row();
        assert!(r.matches_text("wsteth"));
        assert!(r.matches_text("crvusd"));
        assert!(!r.matches_text("sfrxeth"));
    }

    #[test]
    fn test_matches_text_against_name() {
        assert!(row().matches_text("long"));
    }

    #[test]
    fn test_pool_type_display() {
        assert_eq!(format!("{}", PoolType::Mint), "Mint");
        assert_eq!(format!("{}", PoolType::Lend), "Lend");
    }
}
