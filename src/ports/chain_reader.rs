//! Chain Reader Port - On-chain Aggregate Reads
//!
//! Defines the trait the analytics store uses for already-resolved
//! on-chain aggregates (CRV supply, locked amounts, fee history).
//! Read-only: this crate never submits transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One weekly fee-distribution epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeEpoch {
    /// Start of the distribution week.
    pub date: DateTime<Utc>,
    /// Total fees distributed that week, USD.
    pub fees_usd: f64,
}

/// veCRV holder counts used by the analytics tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolderCounts {
    /// All addresses with a non-zero lock.
    pub total_holders: u64,
    /// Holders above the 2500 veCRV proposal-creation threshold.
    pub can_create_vote: u64,
}

/// Trait for read-only on-chain aggregate queries.
///
/// Mirrors the read surface of the blockchain client library the
/// dashboard consumes; all amounts arrive as resolved human units.
#[async_trait]
pub trait ChainReader: Send + Sync + 'static {
    /// Total CRV supply.
    async fn crv_supply(&self) -> anyhow::Result<f64>;

    /// CRV locked in the voting escrow.
    async fn locked_crv(&self) -> anyhow::Result<f64>;

    /// Total veCRV supply.
    async fn ve_crv_supply(&self) -> anyhow::Result<f64>;

    /// Weekly fee totals, most recent last. The final entry may be an
    /// incomplete week; APR math uses the last complete one.
    async fn weekly_fees(&self) -> anyhow::Result<Vec<FeeEpoch>>;

    /// Holder counts for the analytics tiles.
    async fn holder_counts(&self) -> anyhow::Result<HolderCounts>;

    /// Check if the RPC connection is healthy.
    async fn is_healthy(&self) -> bool;
}
