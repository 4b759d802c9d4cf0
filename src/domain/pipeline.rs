//! The filter/sort pipeline: raw rows in, displayed view out.
//!
//! `build_view` is pure and deterministic — identical (rows, filters, sort)
//! inputs always yield identical membership and ordering. The store wraps
//! it in a `ViewCache` so unchanged state recomputes for free.

use std::cmp::Ordering;

use super::columns::{ColumnId, SortDirection, SortState};
use super::filters::{column_value, FilterState};
use super::market::MarketRow;

/// Derived, display-ready row set plus the counts UI badges show.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketView {
    /// Filtered, ordered rows.
    pub rows: Vec<MarketRow>,
    /// Raw row count before filtering.
    pub total_count: usize,
    /// Row count after filtering (equals `rows.len()`).
    pub filtered_count: usize,
}

/// Compare two rows under the active sort column.
///
/// Numeric columns compare numerically, the assets column lexicographically
/// by collateral then borrowed symbol. Rows missing the sort field order
/// last regardless of direction.
fn compare(a: &MarketRow, b: &MarketRow, column: ColumnId, direction: SortDirection) -> Ordering {
    let ordering = match column {
        ColumnId::Assets => (&a.collateral.symbol, &a.borrowed.symbol)
            .cmp(&(&b.collateral.symbol, &b.borrowed.symbol)),
        _ => match (column_value(a, column), column_value(b, column)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            // Missing values sort last in either direction, so they are
            // exempt from the reversal below.
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        },
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Run the full pipeline: filter, then stable-sort, then count.
pub fn build_view(raw: &[MarketRow], filter: &FilterState, sort: &SortState) -> MarketView {
    let total_count = raw.len();
    let search_lower = filter.search.to_lowercase();
    let mut rows: Vec<MarketRow> = raw
        .iter()
        .filter(|r| filter.matches_lowered(r, &search_lower))
        .cloned()
        .collect();

    if let Some((column, direction)) = sort.active() {
        // sort_by is stable: equal keys keep their fetch order.
        rows.sort_by(|a, b| compare(a, b, column, direction));
    }

    let filtered_count = rows.len();
    MarketView {
        rows,
        total_count,
        filtered_count,
    }
}

/// Memoizes the last computed view, keyed by the store's data revision
/// and the exact filter/sort state that produced it.
#[derive(Debug, Default)]
pub struct ViewCache {
    cached: Option<(u64, FilterState, SortState, MarketView)>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view when (revision, filter, sort) are unchanged,
    /// otherwise recompute and cache.
    pub fn view(
        &mut self,
        revision: u64,
        raw: &[MarketRow],
        filter: &FilterState,
        sort: &SortState,
    ) -> MarketView {
        if let Some((rev, f, s, view)) = &self.cached {
            if *rev == revision && f == filter && s == sort {
                return view.clone();
            }
        }
        let view = build_view(raw, filter, sort);
        self.cached = Some((revision, filter.clone(), *sort, view.clone()));
        view
    }
}
