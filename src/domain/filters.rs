//! Filter state and per-row predicate evaluation.
//!
//! A row stays in the displayed set only if it satisfies every active
//! filter (logical AND). Within one multi-select key, selected values are
//! a union: picking "ethereum" and then "arbitrum" shows both chains.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::columns::{ColumnId, ColumnVisibility};
use super::market::{MarketRow, PoolType};

/// Inclusive numeric range bound to one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

impl RangeFilter {
    /// Build a range filter with explicit bounds.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Derive default bounds from the observed data at panel-open time.
    ///
    /// Bounds are frozen once derived; later pagination never widens an
    /// active filter. Returns `None` when no row carries the field.
    pub fn from_observed(rows: &[MarketRow], column: ColumnId) -> Option<Self> {
        let mut bounds: Option<(f64, f64)> = None;
        for value in rows.iter().filter_map(|r| column_value(r, column)) {
            bounds = Some(match bounds {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
        bounds.map(|(min, max)| Self { min, max })
    }

    /// Whether a value lies within [min, max].
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Categorical fields a multi-select dropdown can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectKey {
    /// Chain the market lives on.
    Chain,
    /// Collateral token symbol.
    CollateralSymbol,
    /// Borrowed token symbol.
    BorrowedSymbol,
}

/// The numeric value a column contributes to range filtering and sorting.
pub(crate) fn column_value(row: &MarketRow, column: ColumnId) -> Option<f64> {
    match column {
        ColumnId::LiquidityUsd => row.liquidity_usd,
        ColumnId::UtilizationPercent => row.utilization_percent,
        ColumnId::TotalAssets => row.total_assets_usd,
        ColumnId::TotalDebt => row.total_debt_usd,
        ColumnId::Assets | ColumnId::BorrowChart | ColumnId::LendChart => None,
    }
}

/// The categorical value a row exposes for a multi-select key.
fn select_value(row: &MarketRow, key: MultiSelectKey) -> &str {
    match key {
        MultiSelectKey::Chain => &row.chain,
        MultiSelectKey::CollateralSymbol => &row.collateral.symbol,
        MultiSelectKey::BorrowedSymbol => &row.borrowed.symbol,
    }
}

/// Complete filter state of the markets table.
///
/// Everything defaults to "no constraint"; `Default` is the reset state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search; empty passes all rows.
    pub search: String,
    /// Active range sliders by column.
    pub ranges: BTreeMap<ColumnId, RangeFilter>,
    /// Active multi-select sets; an empty or absent set is no constraint.
    pub selected: BTreeMap<MultiSelectKey, BTreeSet<String>>,
    /// Favorites chip.
    pub favorites_only: bool,
    /// Rewards chip.
    pub rewards_only: bool,
    /// Pool-type chip (mint/lend); `None` shows both.
    pub pool_type: Option<PoolType>,
}

impl FilterState {
    /// Clear every filter back to defaults (the "reset filters" control).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Toggle a value inside a multi-select set.
    pub fn toggle_selection(&mut self, key: MultiSelectKey, value: impl Into<String>) {
        let set = self.selected.entry(key).or_default();
        let value = value.into();
        if !set.remove(&value) {
            set.insert(value);
        }
    }

    /// Clear one multi-select set (the menu's "clear" button).
    pub fn clear_selection(&mut self, key: MultiSelectKey) {
        self.selected.remove(&key);
    }

    /// Toggle the pool-type chip: clicking the active chip clears it.
    pub fn toggle_pool_type(&mut self, pool_type: PoolType) {
        self.pool_type = match self.pool_type {
            Some(current) if current == pool_type => None,
            _ => Some(pool_type),
        };
    }

    /// Drop filter state owned by columns that are now hidden.
    ///
    /// Hidden columns never contribute to filter state once hidden.
    pub fn retain_visible(&mut self, visibility: &ColumnVisibility) {
        self.ranges.retain(|column, _| !visibility.is_hidden(*column));
    }

    /// Whether a row satisfies ALL active filters.
    pub fn matches(&self, row: &MarketRow) -> bool {
        self.matches_lowered(row, &self.search.to_lowercase())
    }

    /// [`Self::matches`] with the lowercased search precomputed.
    ///
    /// The pipeline lowercases once per pass instead of once per row.
    pub fn matches_lowered(&self, row: &MarketRow, search_lower: &str) -> bool {
        if !search_lower.is_empty() && !row.matches_text(search_lower) {
            return false;
        }

        for (column, range) in &self.ranges {
            // A row missing the filtered field cannot satisfy the range.
            match column_value(row, *column) {
                Some(value) if range.contains(value) => {}
                _ => return false,
            }
        }

        for (key, set) in &self.selected {
            if !set.is_empty() && !set.contains(select_value(row, *key)) {
                return false;
            }
        }

        if self.favorites_only && !row.favorite {
            return false;
        }
        if self.rewards_only && !row.has_rewards {
            return false;
        }
        if let Some(pool_type) = self.pool_type {
            if row.pool_type != pool_type {
                return false;
            }
        }

        true
    }
}

/// Distinct values offered by a multi-select menu, sorted.
///
/// Token menus only offer symbols from pools above the small-pool TVL
/// threshold so dust pools don't clutter the dropdown; the chain menu
/// ignores the threshold.
pub fn select_options(rows: &[MarketRow], key: MultiSelectKey, min_tvl: f64) -> Vec<String> {
    let mut options: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        if key != MultiSelectKey::Chain && row.tvl().unwrap_or(f64::MIN) <= min_tvl {
            continue;
        }
        options.insert(select_value(row, key).to_string());
    }
    options.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::TokenInfo;

    fn row(chain: &str, collateral: &str, tvl: f64) -> MarketRow {
        MarketRow {
            chain: chain.to_string(),
            address: format!("0x{collateral}"),
            name: format!("{collateral}-long"),
            collateral: TokenInfo::new(collateral, "0xc"),
            borrowed: TokenInfo::new("crvUSD", "0xb"),
            liquidity_usd: Some(50_000.0),
            utilization_percent: Some(50.0),
            total_assets_usd: Some(tvl * 2.0),
            total_debt_usd: Some(tvl),
            has_rewards: false,
            favorite: false,
            pool_type: PoolType::Lend,
        }
    }

    #[test]
    fn test_empty_filter_passes_all() {
        let filter = FilterState::default();
        assert!(filter.matches(&row("ethereum", "wstETH", 100_000.0)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut filter = FilterState::default();
        filter.search = "wstETH".to_string();
        assert!(filter.matches(&row("ethereum", "wstETH", 1.0)));
        assert!(!filter.matches(&row("ethereum", "sfrxETH", 1.0)));

        filter.search = "WSTeth".to_string();
        assert!(filter.matches(&row("ethereum", "wstETH", 1.0)));
    }

    #[test]
    fn test_matches_lowered_agrees_with_matches() {
        let mut filter = FilterState::default();
        filter.search = "WSTeth".to_string();
        let needle = filter.search.to_lowercase();
        for r in [
            row("ethereum", "wstETH", 1.0),
            row("ethereum", "sfrxETH", 1.0),
        ] {
            assert_eq!(filter.matches(&r), filter.matches_lowered(&r, &needle));
        }
    }

    #[test]
    fn test_range_filter_inclusive_bounds() {
        let range = RangeFilter::new(10.0, 90.0);
        assert!(range.contains(10.0));
        assert!(range.contains(90.0));
        assert!(!range.contains(9.999));
    }

    #[test]
    fn test_range_filter_rejects_missing_field() {
        let mut filter = FilterState::default();
        filter
            .ranges
            .insert(ColumnId::LiquidityUsd, RangeFilter::new(0.0, 1e12));
        let mut r = row("ethereum", "wstETH", 1.0);
        r.liquidity_usd = None;
        assert!(!filter.matches(&r));
    }

    #[test]
    fn test_from_observed_spans_data() {
        let rows = vec![
            row("ethereum", "a", 1.0),
            {
                let mut r = row("ethereum", "b", 1.0);
                r.utilization_percent = Some(99.99);
                r
            },
            {
                let mut r = row("ethereum", "c", 1.0);
                r.utilization_percent = None;
                r
            },
        ];
        let range = RangeFilter::from_observed(&rows, ColumnId::UtilizationPercent).unwrap();
        assert_eq!(range.min, 50.0);
        assert_eq!(range.max, 99.99);
    }

    #[test]
    fn test_multi_select_union_within_key() {
        let mut filter = FilterState::default();
        filter.toggle_selection(MultiSelectKey::Chain, "ethereum");
        filter.toggle_selection(MultiSelectKey::Chain, "arbitrum");
        assert!(filter.matches(&row("ethereum", "wstETH", 1.0)));
        assert!(filter.matches(&row("arbitrum", "wstETH", 1.0)));
        assert!(!filter.matches(&row("fraxtal", "wstETH", 1.0)));
    }

    #[test]
    fn test_toggle_selection_removes_on_second_toggle() {
        let mut filter = FilterState::default();
        filter.toggle_selection(MultiSelectKey::Chain, "ethereum");
        filter.toggle_selection(MultiSelectKey::Chain, "ethereum");
        // Set is now empty again = no constraint
        assert!(filter.matches(&row("fraxtal", "wstETH", 1.0)));
    }

    #[test]
    fn test_chip_filters() {
        let mut filter = FilterState::default();
        filter.favorites_only = true;
        let mut r = row("ethereum", "wstETH", 1.0);
        assert!(!filter.matches(&r));
        r.favorite = true;
        assert!(filter.matches(&r));

        filter.favorites_only = false;
        filter.toggle_pool_type(PoolType::Mint);
        assert!(!filter.matches(&r));
        filter.toggle_pool_type(PoolType::Mint);
        assert!(filter.matches(&r));
    }

    #[test]
    fn test_retain_visible_drops_hidden_column_range() {
        let mut filter = FilterState::default();
        filter
            .ranges
            .insert(ColumnId::LiquidityUsd, RangeFilter::new(0.0, 1.0));
        let mut vis = ColumnVisibility::all_visible();
        vis.toggle(ColumnId::LiquidityUsd);
        filter.retain_visible(&vis);
        assert!(filter.ranges.is_empty());
    }

    #[test]
    fn test_select_options_respect_small_pool_threshold() {
        let rows = vec![
            row("ethereum", "wstETH", 100_000.0),
            row("ethereum", "DUST", 10.0),
        ];
        let options = select_options(&rows, MultiSelectKey::CollateralSymbol, 1_000.0);
        assert_eq!(options, vec!["wstETH".to_string()]);

        // Chain menu ignores the threshold
        let chains = select_options(&rows, MultiSelectKey::Chain, 1_000.0);
        assert_eq!(chains, vec!["ethereum".to_string()]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut filter = FilterState::default();
        filter.search = "wstETH".to_string();
        filter.favorites_only = true;
        filter.toggle_selection(MultiSelectKey::Chain, "ethereum");
        filter.reset();
        assert_eq!(filter, FilterState::default());
    }
}
