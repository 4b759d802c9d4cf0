//! Markets table rendering.
//!
//! Projects a `MarketView` into formatted cells, honoring column
//! visibility. Chart columns render as unicode sparklines built from
//! the snapshot history the caller has loaded so far.

use std::collections::HashMap;

use crate::domain::columns::{ColumnId, ColumnVisibility};
use crate::domain::format::{format_cell, format_percent, format_usd, EMPTY};
use crate::domain::market::{MarketKey, MarketRow, Snapshot};
use crate::domain::pipeline::MarketView;

/// Sparkline glyphs from lowest to highest bucket.
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A fully formatted table: header row, body cells, and the count badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTable {
    /// Column titles in display order.
    pub header: Vec<String>,
    /// One formatted cell per visible column per row.
    pub rows: Vec<Vec<String>>,
    /// "n of m markets" badge shown above the table.
    pub badge: String,
}

impl DisplayTable {
    /// Render the table as aligned text lines for a terminal.
    pub fn to_lines(&self) -> Vec<String> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.badge.clone());
        lines.push(pad_row(&self.header, &widths));
        for row in &self.rows {
            lines.push(pad_row(row, &widths));
        }
        lines
    }
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<width$}", width = w))
        .collect::<Vec<_>>()
        .join("  ")
}

fn column_title(column: ColumnId) -> &'static str {
    match column {
        ColumnId::Assets => "Market",
        ColumnId::LiquidityUsd => "Liquidity",
        ColumnId::UtilizationPercent => "Utilization",
        ColumnId::TotalAssets => "Supplied",
        ColumnId::TotalDebt => "Borrowed",
        ColumnId::BorrowChart => "Borrow APY",
        ColumnId::LendChart => "Lend APY",
    }
}

/// Scale a numeric series into sparkline glyphs.
fn sparkline(values: &[f64]) -> String {
    let Some(max) = values.iter().copied().fold(None::<f64>, |acc, v| {
        Some(acc.map_or(v, |m| m.max(v)))
    }) else {
        return EMPTY.to_string();
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let span = max - min;
    values
        .iter()
        .map(|v| {
            let bucket = if span > 0.0 {
                (((v - min) / span) * (SPARK_LEVELS.len() - 1) as f64).round() as usize
            } else {
                0
            };
            SPARK_LEVELS[bucket.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

fn chart_cell(
    charts: &HashMap<MarketKey, Vec<Snapshot>>,
    key: &MarketKey,
    pick: impl Fn(&Snapshot) -> Option<f64>,
) -> String {
    let Some(snapshots) = charts.get(key) else {
        return EMPTY.to_string();
    };
    let series: Vec<f64> = snapshots.iter().filter_map(pick).collect();
    if series.is_empty() {
        EMPTY.to_string()
    } else {
        sparkline(&series)
    }
}

fn cell(row: &MarketRow, column: ColumnId, charts: &HashMap<MarketKey, Vec<Snapshot>>) -> String {
    match column {
        ColumnId::Assets => {
            let star = if row.favorite { "★ " } else { "" };
            format!(
                "{star}{}/{} ({})",
                row.collateral.symbol, row.borrowed.symbol, row.chain
            )
        }
        ColumnId::LiquidityUsd => format_cell(row.liquidity_usd, format_usd),
        ColumnId::UtilizationPercent => {
            format_cell(row.utilization_percent, |v| format_percent(v, 2))
        }
        ColumnId::TotalAssets => format_cell(row.total_assets_usd, format_usd),
        ColumnId::TotalDebt => format_cell(row.total_debt_usd, format_usd),
        ColumnId::BorrowChart => chart_cell(charts, &row.key(), |s| s.borrow_apy),
        ColumnId::LendChart => chart_cell(charts, &row.key(), |s| s.lend_apy),
    }
}

/// Project a view into display cells, skipping hidden columns.
pub fn render_table(
    view: &MarketView,
    visibility: &ColumnVisibility,
    charts: &HashMap<MarketKey, Vec<Snapshot>>,
) -> DisplayTable {
    let columns = visibility.visible();
    let header = columns
        .iter()
        .map(|c| column_title(*c).to_string())
        .collect();
    let rows = view
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| cell(row, *c, charts)).collect())
        .collect();
    DisplayTable {
        header,
        rows,
        badge: format!("{} of {} markets", view.filtered_count, view.total_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{PoolType, TokenInfo};

    fn row(name: &str, favorite: bool) -> MarketRow {
        MarketRow {
            chain: "ethereum".to_string(),
            address: format!("0x{name}"),
            name: name.to_string(),
            collateral: TokenInfo::new("wstETH", "0xc"),
            borrowed: TokenInfo::new("crvUSD", "0xb"),
            liquidity_usd: Some(1_000_000.0),
            utilization_percent: Some(42.5),
            total_assets_usd: None,
            total_debt_usd: Some(850_000.0),
            has_rewards: false,
            favorite,
            pool_type: PoolType::Lend,
        }
    }

    fn view_of(rows: Vec<MarketRow>, total: usize) -> MarketView {
        let filtered = rows.len();
        MarketView {
            rows,
            total_count: total,
            filtered_count: filtered,
        }
    }

    #[test]
    fn test_badge_shows_filtered_of_total() {
        let table = render_table(
            &view_of(vec![row("a", false)], 25),
            &ColumnVisibility::all_visible(),
            &HashMap::new(),
        );
        assert_eq!(table.badge, "1 of 25 markets");
    }

    #[test]
    fn test_hidden_columns_are_skipped() {
        let vis = ColumnVisibility::with_hidden([ColumnId::LendChart, ColumnId::TotalDebt]);
        let table = render_table(&view_of(vec![row("a", false)], 1), &vis, &HashMap::new());
        assert_eq!(table.header.len(), ColumnId::ALL.len() - 2);
        assert!(!table.header.contains(&"Borrowed".to_string()));
    }

    #[test]
    fn test_missing_numeric_renders_dash() {
        let table = render_table(
            &view_of(vec![row("a", false)], 1),
            &ColumnVisibility::all_visible(),
            &HashMap::new(),
        );
        // total_assets_usd is None in the fixture.
        assert_eq!(table.rows[0][3], "-");
    }

    #[test]
    fn test_favorite_star_in_assets_cell() {
        let table = render_table(
            &view_of(vec![row("a", true)], 1),
            &ColumnVisibility::all_visible(),
            &HashMap::new(),
        );
        assert!(table.rows[0][0].starts_with('★'));
    }

    #[test]
    fn test_sparkline_spans_levels() {
        let line = sparkline(&[0.0, 5.0, 10.0]);
        assert_eq!(line.chars().count(), 3);
        assert!(line.starts_with('▁'));
        assert!(line.ends_with('█'));
    }

    #[test]
    fn test_sparkline_flat_series() {
        assert_eq!(sparkline(&[3.0, 3.0]), "▁▁");
        assert_eq!(sparkline(&[]), "-");
    }

    #[test]
    fn test_to_lines_widths_count_chars_not_bytes() {
        let table = DisplayTable {
            header: vec!["Données".to_string(), "X".to_string()],
            rows: vec![vec!["abc".to_string(), "y".to_string()]],
            badge: "1 of 1 markets".to_string(),
        };
        let lines = table.to_lines();
        // "Données" is 7 chars but 8 bytes; the column must be 7 wide.
        assert_eq!(lines[1].chars().count(), "Données  X".chars().count());
        let x = lines[1].chars().position(|c| c == 'X').unwrap();
        let y = lines[2].chars().position(|c| c == 'y').unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_to_lines_alignment() {
        let table = render_table(
            &view_of(vec![row("a", false)], 1),
            &ColumnVisibility::all_visible(),
            &HashMap::new(),
        );
        let lines = table.to_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("markets"));
    }
}
