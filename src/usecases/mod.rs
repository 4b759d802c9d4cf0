//! Use Cases Layer - Store Orchestration
//!
//! The client-side store: fetch lifecycle, per-domain slices, and the
//! derived views the presentation layer renders. Each store owns its
//! slices; a fetch's success path is the sole writer to its slice.
//!
//! Stores:
//! - `MarketStore`: per-chain market rows + memoized filter/sort view
//! - `SnapshotStore`: incremental chart history per visible market
//! - `AnalyticsStore`: veCRV metrics behind the mainnet/wallet guard
//! - `UserStore`: per-user loan existence/health mappers

pub mod analytics_store;
pub mod fetch;
pub mod market_store;
pub mod snapshot_store;
pub mod user_store;

pub use analytics_store::{AnalyticsStore, VeCrvData};
pub use fetch::{FetchState, FetchStatus};
pub use market_store::MarketStore;
pub use snapshot_store::SnapshotStore;
pub use user_store::UserStore;
