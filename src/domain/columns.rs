//! Table columns, sort state, and column visibility.
//!
//! Column identifiers double as sort keys and as the keys of range
//! filters, so they are stringly round-trippable for config files.

use serde::{Deserialize, Serialize};

/// Identifier of a markets-table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    /// Collateral/borrowed token pair with chain icon.
    Assets,
    /// Available liquidity in USD.
    LiquidityUsd,
    /// Utilization percent.
    UtilizationPercent,
    /// Total supplied assets in USD.
    TotalAssets,
    /// Total outstanding debt in USD.
    TotalDebt,
    /// Borrow APY line graph.
    BorrowChart,
    /// Lend APY line graph.
    LendChart,
}

impl ColumnId {
    /// All columns in default display order.
    pub const ALL: [ColumnId; 7] = [
        Self::Assets,
        Self::LiquidityUsd,
        Self::UtilizationPercent,
        Self::TotalAssets,
        Self::TotalDebt,
        Self::BorrowChart,
        Self::LendChart,
    ];

    /// Stable string id, matching config and test fixtures.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::LiquidityUsd => "liquidityUsd",
            Self::UtilizationPercent => "utilizationPercent",
            Self::TotalAssets => "totalAssets",
            Self::TotalDebt => "totalDebt",
            Self::BorrowChart => "borrowChart",
            Self::LendChart => "lendChart",
        }
    }

    /// Parse the stable string id back into a column.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Whether the column holds a sortable value (charts do not sort).
    pub fn is_sortable(self) -> bool {
        !matches!(self, Self::BorrowChart | Self::LendChart)
    }

    /// Whether the column holds a numeric value a range slider can filter.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::LiquidityUsd | Self::UtilizationPercent | Self::TotalAssets | Self::TotalDebt
        )
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flip the direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// At most one (column, direction) pair is active at a time.
///
/// Repeated header clicks on the same column cycle
/// ascending → descending → none; clicking a different column
/// starts over at ascending on the new column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    active: Option<(ColumnId, SortDirection)>,
}

impl SortState {
    /// No active sort.
    pub fn none() -> Self {
        Self { active: None }
    }

    /// Explicit sort, mostly for tests and default config.
    pub fn by(column: ColumnId, direction: SortDirection) -> Self {
        Self {
            active: Some((column, direction)),
        }
    }

    /// The active (column, direction) pair, if any.
    pub fn active(&self) -> Option<(ColumnId, SortDirection)> {
        self.active
    }

    /// Register a header click on `column`.
    ///
    /// Clicks on an unsortable column are ignored.
    pub fn toggle(&mut self, column: ColumnId) {
        if !column.is_sortable() {
            return;
        }
        self.active = match self.active {
            Some((c, SortDirection::Ascending)) if c == column => {
                Some((column, SortDirection::Descending))
            }
            Some((c, SortDirection::Descending)) if c == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }
}

/// Set of columns the user has hidden via the visibility settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnVisibility {
    hidden: std::collections::BTreeSet<ColumnId>,
}

impl ColumnVisibility {
    /// All columns visible.
    pub fn all_visible() -> Self {
        Self::default()
    }

    /// Start with the given columns hidden (default config hides the lend chart).
    pub fn with_hidden(hidden: impl IntoIterator<Item = ColumnId>) -> Self {
        Self {
            hidden: hidden.into_iter().collect(),
        }
    }

    /// Whether the column is currently hidden.
    pub fn is_hidden(&self, column: ColumnId) -> bool {
        self.hidden.contains(&column)
    }

    /// Flip a column's visibility. Returns the new hidden state.
    pub fn toggle(&mut self, column: ColumnId) -> bool {
        if !self.hidden.remove(&column) {
            self.hidden.insert(column);
        }
        self.is_hidden(column)
    }

    /// Visible columns in default display order.
    pub fn visible(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .filter(|c| !self.is_hidden(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_round_trip() {
        for c in ColumnId::ALL {
            assert_eq!(ColumnId::parse(c.as_str()), Some(c));
        }
        assert_eq!(ColumnId::parse("nope"), None);
    }

    #[test]
    fn test_sort_cycle_same_column() {
        let mut sort = SortState::none();
        sort.toggle(ColumnId::UtilizationPercent);
        assert_eq!(
            sort.active(),
            Some((ColumnId::UtilizationPercent, SortDirection::Ascending))
        );
        sort.toggle(ColumnId::UtilizationPercent);
        assert_eq!(
            sort.active(),
            Some((ColumnId::UtilizationPercent, SortDirection::Descending))
        );
        sort.toggle(ColumnId::UtilizationPercent);
        assert_eq!(sort.active(), None);
    }

    #[test]
    fn test_sort_new_column_resets_to_ascending() {
        let mut sort = SortState::by(ColumnId::LiquidityUsd, SortDirection::Descending);
        sort.toggle(ColumnId::UtilizationPercent);
        assert_eq!(
            sort.active(),
            Some((ColumnId::UtilizationPercent, SortDirection::Ascending))
        );
    }

    #[test]
    fn test_sort_ignores_chart_columns() {
        let mut sort = SortState::by(ColumnId::LiquidityUsd, SortDirection::Ascending);
        sort.toggle(ColumnId::BorrowChart);
        assert_eq!(
            sort.active(),
            Some((ColumnId::LiquidityUsd, SortDirection::Ascending))
        );
    }

    #[test]
    fn test_visibility_toggle_round_trip() {
        let mut vis = ColumnVisibility::all_visible();
        assert!(!vis.is_hidden(ColumnId::LendChart));
        assert!(vis.toggle(ColumnId::LendChart));
        assert!(vis.is_hidden(ColumnId::LendChart));
        assert!(!vis.toggle(ColumnId::LendChart));
        assert_eq!(vis, ColumnVisibility::all_visible());
    }

    #[test]
    fn test_visible_preserves_display_order() {
        let vis = ColumnVisibility::with_hidden([ColumnId::TotalDebt]);
        let visible = vis.visible();
        assert_eq!(visible.len(), ColumnId::ALL.len() - 1);
        assert!(!visible.contains(&ColumnId::TotalDebt));
        assert_eq!(visible[0], ColumnId::Assets);
    }
}
