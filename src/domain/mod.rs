//! Domain layer - Core table logic and models.
//!
//! This module contains the pure domain logic for the markets dashboard.
//! No external dependencies allowed here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod columns;
pub mod filters;
pub mod format;
pub mod market;
pub mod pipeline;

// Re-export core types for convenience
pub use columns::{ColumnId, ColumnVisibility, SortDirection, SortState};
pub use filters::{FilterState, MultiSelectKey, RangeFilter};
pub use market::{ChainId, MarketAddress, MarketKey, MarketRow, PoolType, Snapshot, TokenInfo};
pub use pipeline::{build_view, MarketView, ViewCache};
