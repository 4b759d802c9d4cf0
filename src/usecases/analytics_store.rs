//! Analytics Store - veCRV Dashboard Metrics
//!
//! Loads the aggregate veCRV metrics (supply, locked amount, weekly
//! fees, holder counts) via the `ChainReader` port. Loading is gated on
//! a connected wallet reporting Ethereum mainnet; on any other network
//! the tiles render "-" and nothing is fetched. Each metric is its own
//! fetch domain: an errored one stays errored until an explicit retry
//! while the others keep working.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::ports::chain_reader::{ChainReader, FeeEpoch, HolderCounts};
use crate::ports::wallet::WalletConnector;

use super::fetch::{FetchState, FetchStatus};

/// Ethereum mainnet, the only network the analytics contracts live on.
const MAINNET_CHAIN_ID: u64 = 1;

/// Weekly fee epochs per year, used by the APR estimate.
const WEEKS_PER_YEAR: f64 = 52.0;

/// Aggregated veCRV lock metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VeCrvData {
    /// Total CRV supply.
    pub total_crv: f64,
    /// CRV locked in the voting escrow.
    pub total_locked_crv: f64,
    /// Total veCRV supply.
    pub total_ve_crv: f64,
    /// Share of CRV supply that is locked, percent.
    pub locked_percentage: f64,
}

/// Store of the analytics page's fetch slices.
pub struct AnalyticsStore<R: ChainReader, W: WalletConnector> {
    reader: Arc<R>,
    wallet: Arc<W>,
    ve_data: RwLock<FetchState<VeCrvData>>,
    fees: RwLock<FetchState<Vec<FeeEpoch>>>,
    holders: RwLock<FetchState<HolderCounts>>,
}

impl<R: ChainReader, W: WalletConnector> AnalyticsStore<R, W> {
    pub fn new(reader: Arc<R>, wallet: Arc<W>) -> Self {
        Self {
            reader,
            wallet,
            ve_data: RwLock::new(FetchState::NotStarted),
            fees: RwLock::new(FetchState::NotStarted),
            holders: RwLock::new(FetchState::NotStarted),
        }
    }

    /// Whether analytics may load: connected wallet on mainnet.
    async fn may_load(&self) -> bool {
        if !self.wallet.is_connected().await {
            debug!("No wallet connected, analytics stay idle");
            return false;
        }
        match self.wallet.chain_id().await {
            Ok(MAINNET_CHAIN_ID) => true,
            Ok(chain_id) => {
                debug!(chain_id, "Not on mainnet, analytics stay idle");
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to query wallet chain id");
                false
            }
        }
    }

    /// Load every metric that is not already loaded or errored.
    ///
    /// Errored slices are skipped — retry is explicit via [`Self::retry`].
    pub async fn load(&self) {
        if !self.may_load().await {
            return;
        }

        if self.ve_data.read().await.status() == FetchStatus::NotStarted {
            self.load_ve_data().await;
        }
        if self.fees.read().await.status() == FetchStatus::NotStarted {
            self.load_fees().await;
        }
        if self.holders.read().await.status() == FetchStatus::NotStarted {
            self.load_holders().await;
        }
    }

    /// Reset errored slices and load again (user-initiated retry).
    pub async fn retry(&self) {
        if self.ve_data.read().await.status() == FetchStatus::Error {
            *self.ve_data.write().await = FetchState::NotStarted;
        }
        if self.fees.read().await.status() == FetchStatus::Error {
            *self.fees.write().await = FetchState::NotStarted;
        }
        if self.holders.read().await.status() == FetchStatus::Error {
            *self.holders.write().await = FetchState::NotStarted;
        }
        self.load().await;
    }

    async fn load_ve_data(&self) {
        self.ve_data.write().await.begin();
        let result = async {
            let total_crv = self.reader.crv_supply().await?;
            let total_locked_crv = self.reader.locked_crv().await?;
            let total_ve_crv = self.reader.ve_crv_supply().await?;
            let locked_percentage = if total_crv > 0.0 {
                total_locked_crv / total_crv * 100.0
            } else {
                0.0
            };
            anyhow::Ok(VeCrvData {
                total_crv,
                total_locked_crv,
                total_ve_crv,
                locked_percentage,
            })
        }
        .await;

        let mut slot = self.ve_data.write().await;
        match result {
            Ok(data) => {
                info!(
                    locked_pct = data.locked_percentage,
                    "veCRV data loaded"
                );
                slot.succeed(data);
            }
            Err(e) => {
                warn!(error = %e, "veCRV data load failed");
                slot.fail(e.to_string());
            }
        }
    }

    async fn load_fees(&self) {
        self.fees.write().await.begin();
        let result = self.reader.weekly_fees().await;
        let mut slot = self.fees.write().await;
        match result {
            Ok(fees) => slot.succeed(fees),
            Err(e) => {
                warn!(error = %e, "Weekly fees load failed");
                slot.fail(e.to_string());
            }
        }
    }

    async fn load_holders(&self) {
        self.holders.write().await.begin();
        let result = self.reader.holder_counts().await;
        let mut slot = self.holders.write().await;
        match result {
            Ok(counts) => slot.succeed(counts),
            Err(e) => {
                warn!(error = %e, "Holder counts load failed");
                slot.fail(e.to_string());
            }
        }
    }

    /// Current veCRV data slice.
    pub async fn ve_data(&self) -> FetchState<VeCrvData> {
        self.ve_data.read().await.clone()
    }

    /// Current weekly fees slice.
    pub async fn fees(&self) -> FetchState<Vec<FeeEpoch>> {
        self.fees.read().await.clone()
    }

    /// Current holder counts slice.
    pub async fn holders(&self) -> FetchState<HolderCounts> {
        self.holders.read().await.clone()
    }

    /// Estimated veCRV APR given the current CRV price.
    ///
    /// `fees_of_last_complete_week / total_ve_crv * 52 / price * 100`.
    /// The newest fee epoch is the running, incomplete week, so the one
    /// before it feeds the estimate. `None` while any input is missing.
    pub async fn ve_crv_apr(&self, crv_price_usd: f64) -> Option<f64> {
        if crv_price_usd <= 0.0 {
            return None;
        }
        let ve = self.ve_data.read().await;
        let fees = self.fees.read().await;
        let data = ve.data()?;
        let epochs = fees.data()?;
        if epochs.len() < 2 || data.total_ve_crv <= 0.0 {
            return None;
        }
        let last_complete = &epochs[epochs.len() - 2];
        Some(last_complete.fees_usd / data.total_ve_crv * WEEKS_PER_YEAR / crv_price_usd * 100.0)
    }
}
