//! Market Store - Per-chain Row Slices and the Derived View
//!
//! Holds fetched market rows keyed by chain, tracks each chain's fetch
//! lifecycle, stamps user favorites onto rows, and serves the memoized
//! filter/sort view. A fetch's success callback is the sole writer to
//! its chain's slice; an epoch guard discards results whose originating
//! request is no longer current (refetch or chain switch in between).

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::columns::{ColumnId, SortState};
use crate::domain::filters::{FilterState, RangeFilter};
use crate::domain::market::{ChainId, MarketKey, MarketRow};
use crate::domain::pipeline::{MarketView, ViewCache};
use crate::ports::market_api::MarketApi;

use super::fetch::{FetchState, FetchStatus};

/// One chain's row slice plus the epoch guarding in-flight commits.
#[derive(Debug, Default)]
struct ChainSlice {
    state: FetchState<Vec<MarketRow>>,
    /// Bumped on every fetch start and on clear; a commit whose token no
    /// longer matches is discarded.
    epoch: u64,
}

/// Store of market rows across chains.
pub struct MarketStore<A: MarketApi> {
    api: Arc<A>,
    /// Configured chain order; `rows()` concatenates in this order so the
    /// unsorted view is deterministic.
    chain_order: RwLock<Vec<ChainId>>,
    slices: RwLock<HashMap<ChainId, ChainSlice>>,
    /// Favorite market keys, kept out-of-band like the user-profile store.
    favorites: RwLock<BTreeSet<MarketKey>>,
    /// Bumped whenever `rows()` output may have changed.
    revision: AtomicU64,
    cache: Mutex<ViewCache>,
}

impl<A: MarketApi> MarketStore<A> {
    /// Create a store for the configured chains. Nothing is fetched yet.
    pub fn new(api: Arc<A>, chains: Vec<ChainId>) -> Self {
        Self {
            api,
            chain_order: RwLock::new(chains),
            slices: RwLock::new(HashMap::new()),
            favorites: RwLock::new(BTreeSet::new()),
            revision: AtomicU64::new(0),
            cache: Mutex::new(ViewCache::new()),
        }
    }

    fn bump_revision(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fetch one chain's full row set.
    ///
    /// Also the explicit retry path after an error: calling it again
    /// re-enters `Loading` from the error state. Failures are recorded in
    /// the slice, never propagated — nothing here is fatal.
    pub async fn fetch(&self, chain: &ChainId) {
        let request_id = Uuid::new_v4();
        let token = {
            let mut slices = self.slices.write().await;
            let slice = slices.entry(chain.clone()).or_default();
            slice.epoch += 1;
            slice.state.begin();
            slice.epoch
        };
        self.bump_revision();
        debug!(%chain, %request_id, "Fetching market rows");

        let result = self.api.fetch_markets(chain).await;

        let mut slices = self.slices.write().await;
        let Some(slice) = slices.get_mut(chain) else {
            debug!(%chain, %request_id, "Slice cleared while fetch in flight, discarding");
            return;
        };
        if slice.epoch != token {
            debug!(%chain, %request_id, "Stale fetch result discarded");
            return;
        }
        match result {
            Ok(rows) => {
                info!(%chain, %request_id, rows = rows.len(), "Market rows fetched");
                slice.state.succeed(rows);
            }
            Err(e) => {
                warn!(%chain, %request_id, error = %e, "Market fetch failed");
                slice.state.fail(e.to_string());
            }
        }
        drop(slices);
        self.bump_revision();
    }

    /// Fetch every configured chain concurrently.
    ///
    /// Chains are independent fetch domains: each task writes only its own
    /// slice, so there is no shared mutable row state between them.
    pub async fn fetch_all(self: &Arc<Self>) {
        let chains = self.chain_order.read().await.clone();
        let mut tasks = tokio::task::JoinSet::new();
        for chain in chains {
            let store = Arc::clone(self);
            tasks.spawn(async move { store.fetch(&chain).await });
        }
        while tasks.join_next().await.is_some() {}
    }

    /// Switch the active chain set (network switch).
    ///
    /// Slices of deselected chains are cleared back to `NotStarted` and
    /// their epoch bumped so in-flight results for them are discarded.
    pub async fn set_chains(&self, chains: Vec<ChainId>) {
        {
            let mut order = self.chain_order.write().await;
            *order = chains.clone();
        }
        let mut slices = self.slices.write().await;
        for (chain, slice) in slices.iter_mut() {
            if !chains.contains(chain) {
                info!(%chain, "Chain deselected, clearing slice");
                slice.epoch += 1;
                slice.state = FetchState::NotStarted;
            }
        }
        drop(slices);
        self.bump_revision();
    }

    /// Fetch status of one chain's slice.
    pub async fn status(&self, chain: &ChainId) -> FetchStatus {
        let slices = self.slices.read().await;
        slices
            .get(chain)
            .map_or(FetchStatus::NotStarted, |s| s.state.status())
    }

    /// Error reason of one chain's slice, if it is in the error state.
    pub async fn error(&self, chain: &ChainId) -> Option<String> {
        let slices = self.slices.read().await;
        slices
            .get(chain)
            .and_then(|s| s.state.error().map(str::to_string))
    }

    /// Flip a market's favorite flag.
    pub async fn toggle_favorite(&self, key: MarketKey) {
        let mut favorites = self.favorites.write().await;
        if !favorites.remove(&key) {
            favorites.insert(key);
        }
        drop(favorites);
        self.bump_revision();
    }

    /// All rows across chains in configured order, favorites stamped on.
    ///
    /// Includes last-known-good data of chains whose latest fetch failed.
    pub async fn rows(&self) -> Vec<MarketRow> {
        let order = self.chain_order.read().await;
        let slices = self.slices.read().await;
        let favorites = self.favorites.read().await;
        let mut rows = Vec::new();
        for chain in order.iter() {
            if let Some(chain_rows) = slices.get(chain).and_then(|s| s.state.data()) {
                rows.extend(chain_rows.iter().cloned().map(|mut row| {
                    row.favorite = favorites.contains(&row.key());
                    row
                }));
            }
        }
        rows
    }

    /// The memoized filtered/sorted view for the current rows.
    pub async fn view(&self, filter: &FilterState, sort: &SortState) -> MarketView {
        let rows = self.rows().await;
        let revision = self.revision.load(Ordering::SeqCst);
        let mut cache = self.cache.lock().await;
        cache.view(revision, &rows, filter, sort)
    }

    /// Default slider bounds for a column, derived from currently loaded
    /// data at filter-panel open time. Frozen once taken; streaming more
    /// data later never widens an active filter.
    pub async fn default_range(&self, column: ColumnId) -> Option<RangeFilter> {
        let rows = self.rows().await;
        RangeFilter::from_observed(&rows, column)
    }
}
