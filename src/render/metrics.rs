//! Analytics metric tiles.
//!
//! Each tile mirrors one fetch slice: "-" while nothing has loaded,
//! "?" when the slice errored with no prior data, compact notation
//! otherwise. A slice that errored after a successful load keeps
//! showing its last-known-good value.

use crate::domain::format::{format_compact, format_percent, format_usd, EMPTY, SENTINEL};
use crate::ports::chain_reader::{FeeEpoch, HolderCounts};
use crate::usecases::{FetchState, FetchStatus, VeCrvData};

/// One labelled analytics value, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
}

impl MetricTile {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// Project a fetch slice into a tile value.
fn tile_value<T>(state: &FetchState<T>, render: impl Fn(&T) -> String) -> String {
    match state.data() {
        Some(data) => render(data),
        None if state.status() == FetchStatus::Error => SENTINEL.to_string(),
        None => EMPTY.to_string(),
    }
}

/// Fees of the last complete week; the newest epoch is still running.
fn last_complete_fees(epochs: &[FeeEpoch]) -> Option<f64> {
    if epochs.len() < 2 {
        return None;
    }
    Some(epochs[epochs.len() - 2].fees_usd)
}

/// Build the analytics tile row from the store's slices.
///
/// `apr` comes from the store's estimate and is absent when the CRV
/// price or any input slice is missing.
pub fn analytics_tiles(
    ve: &FetchState<VeCrvData>,
    fees: &FetchState<Vec<FeeEpoch>>,
    holders: &FetchState<HolderCounts>,
    apr: Option<f64>,
) -> Vec<MetricTile> {
    vec![
        MetricTile::new("CRV supply", tile_value(ve, |d| format_compact(d.total_crv))),
        MetricTile::new(
            "Locked CRV",
            tile_value(ve, |d| {
                format!(
                    "{} ({})",
                    format_compact(d.total_locked_crv),
                    format_percent(d.locked_percentage, 2)
                )
            }),
        ),
        MetricTile::new(
            "veCRV supply",
            tile_value(ve, |d| format_compact(d.total_ve_crv)),
        ),
        MetricTile::new(
            "Weekly fees",
            tile_value(fees, |epochs| match last_complete_fees(epochs) {
                Some(f) => format_usd(f),
                None => EMPTY.to_string(),
            }),
        ),
        MetricTile::new(
            "veCRV holders",
            tile_value(holders, |h| format_compact(h.total_holders as f64)),
        ),
        MetricTile::new(
            "veCRV APR",
            apr.map_or_else(|| EMPTY.to_string(), |a| format_percent(a, 2)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ve_data() -> VeCrvData {
        VeCrvData {
            total_crv: 2_200_000_000.0,
            total_locked_crv: 880_000_000.0,
            total_ve_crv: 650_000_000.0,
            locked_percentage: 40.0,
        }
    }

    fn epoch(day: u32, fees_usd: f64) -> FeeEpoch {
        FeeEpoch {
            date: Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).single().unwrap(),
            fees_usd,
        }
    }

    #[test]
    fn test_idle_slices_render_dash() {
        let tiles = analytics_tiles(
            &FetchState::NotStarted,
            &FetchState::NotStarted,
            &FetchState::NotStarted,
            None,
        );
        assert!(tiles.iter().all(|t| t.value == "-"));
    }

    #[test]
    fn test_errored_slice_without_data_renders_sentinel() {
        let ve: FetchState<VeCrvData> = FetchState::Error {
            reason: "rpc down".to_string(),
            last_good: None,
        };
        let tiles = analytics_tiles(&ve, &FetchState::NotStarted, &FetchState::NotStarted, None);
        assert_eq!(tiles[0].value, "?");
    }

    #[test]
    fn test_errored_slice_keeps_last_known_good() {
        let ve = FetchState::Error {
            reason: "rpc down".to_string(),
            last_good: Some(ve_data()),
        };
        let tiles = analytics_tiles(&ve, &FetchState::NotStarted, &FetchState::NotStarted, None);
        assert_eq!(tiles[0].value, "2.2B");
    }

    #[test]
    fn test_loaded_tiles_use_compact_notation() {
        let tiles = analytics_tiles(
            &FetchState::Success(ve_data()),
            &FetchState::Success(vec![epoch(9, 1_250_000.0), epoch(16, 300_000.0)]),
            &FetchState::Success(HolderCounts {
                total_holders: 12_345,
                can_create_vote: 400,
            }),
            Some(4.2),
        );
        assert_eq!(tiles[1].value, "880M (40.00%)");
        // Newest epoch is the running week; the one before feeds the tile.
        assert_eq!(tiles[3].value, "$1,250,000");
        assert_eq!(tiles[4].value, "12.35K");
        assert_eq!(tiles[5].value, "4.20%");
    }

    #[test]
    fn test_single_epoch_is_incomplete() {
        assert_eq!(last_complete_fees(&[epoch(9, 10.0)]), None);
    }
}
