//! Snapshot Store - Incremental Chart History per Market
//!
//! Scrolling near the end of the visible list does NOT fetch more rows
//! (the row set is loaded in full upfront per chain); it fetches more
//! historical snapshot pages for the rows' charts. Pages append onto the
//! existing history; the same epoch guard as the market store discards
//! results that arrive after the slice was cleared.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::market::{ChainId, MarketKey, Snapshot};
use crate::ports::market_api::MarketApi;

use super::fetch::{FetchState, FetchStatus};

/// One market's snapshot history slice.
#[derive(Debug, Default)]
struct SnapshotSlice {
    state: FetchState<Vec<Snapshot>>,
    epoch: u64,
    /// Next 1-based page to request.
    next_page: u32,
    /// Set when a fetched page comes back empty.
    exhausted: bool,
}

/// Store of per-market chart snapshot history.
pub struct SnapshotStore<A: MarketApi> {
    api: Arc<A>,
    per_page: u32,
    slices: RwLock<HashMap<MarketKey, SnapshotSlice>>,
}

impl<A: MarketApi> SnapshotStore<A> {
    pub fn new(api: Arc<A>, per_page: u32) -> Self {
        Self {
            api,
            per_page,
            slices: RwLock::new(HashMap::new()),
        }
    }

    /// Load the first page for every visible market that has none yet.
    ///
    /// Called when rows scroll into view; already-loaded or in-flight
    /// slices are left alone.
    pub async fn ensure_loaded(&self, visible: &[MarketKey]) {
        for key in visible {
            let needs_fetch = {
                let slices = self.slices.read().await;
                slices
                    .get(key)
                    .is_none_or(|s| s.state.status() == FetchStatus::NotStarted)
            };
            if needs_fetch {
                self.fetch_next(key).await;
            }
        }
    }

    /// Append the next history page for one market (scroll-extend).
    pub async fn extend(&self, key: &MarketKey) {
        let exhausted = {
            let slices = self.slices.read().await;
            slices.get(key).is_some_and(|s| s.exhausted)
        };
        if !exhausted {
            self.fetch_next(key).await;
        }
    }

    async fn fetch_next(&self, key: &MarketKey) {
        let (token, page) = {
            let mut slices = self.slices.write().await;
            let slice = slices.entry(key.clone()).or_default();
            if slice.state.status() == FetchStatus::Loading {
                return;
            }
            slice.epoch += 1;
            if slice.next_page == 0 {
                slice.next_page = 1;
            }
            slice.state.begin();
            (slice.epoch, slice.next_page)
        };

        let (chain, market) = key;
        debug!(%chain, %market, page, "Fetching snapshot page");
        let result = self
            .api
            .fetch_snapshots(chain, market, page, self.per_page)
            .await;

        let mut slices = self.slices.write().await;
        let Some(slice) = slices.get_mut(key) else {
            return;
        };
        if slice.epoch != token {
            debug!(%chain, %market, "Stale snapshot page discarded");
            return;
        }
        match result {
            Ok(page_snapshots) => {
                if page_snapshots.is_empty() {
                    slice.exhausted = true;
                }
                // Append-extend: pages accumulate onto existing history.
                let mut all = slice.state.data().cloned().unwrap_or_default();
                all.extend(page_snapshots);
                slice.next_page = page + 1;
                slice.state.succeed(all);
            }
            Err(e) => {
                warn!(%chain, %market, error = %e, "Snapshot fetch failed");
                slice.state.fail(e.to_string());
            }
        }
    }

    /// Snapshot history loaded so far for a market.
    pub async fn snapshots(&self, key: &MarketKey) -> Option<Vec<Snapshot>> {
        let slices = self.slices.read().await;
        slices.get(key).and_then(|s| s.state.data().cloned())
    }

    /// Fetch status for a market's history.
    pub async fn status(&self, key: &MarketKey) -> FetchStatus {
        let slices = self.slices.read().await;
        slices
            .get(key)
            .map_or(FetchStatus::NotStarted, |s| s.state.status())
    }

    /// Drop all history belonging to one chain (chain/network switch).
    ///
    /// Epochs of dropped slices die with them; any in-flight commit finds
    /// its slice gone and is discarded.
    pub async fn clear_chain(&self, chain: &ChainId) {
        let mut slices = self.slices.write().await;
        slices.retain(|(c, _), _| c != chain);
    }
}
