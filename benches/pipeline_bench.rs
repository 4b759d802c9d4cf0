//! Pipeline Benchmarks — Filter/Sort Hot Path
//!
//! Benchmarks the view pipeline that runs on every filter, sort, or
//! data change. The table must stay responsive while re-deriving the
//! view over the full cross-chain row set.
//!
//! Run with: cargo bench --bench pipeline_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use llamalend_markets::domain::columns::{ColumnId, SortDirection, SortState};
use llamalend_markets::domain::filters::{FilterState, RangeFilter};
use llamalend_markets::domain::market::{MarketRow, PoolType, TokenInfo};
use llamalend_markets::domain::pipeline::build_view;

fn generate_rows(count: usize) -> Vec<MarketRow> {
    let chains = ["ethereum", "arbitrum", "fraxtal", "optimism"];
    let collaterals = ["wstETH", "sfrxETH", "WBTC", "CRV", "tBTC"];
    (0..count)
        .map(|i| MarketRow {
            chain: chains[i % chains.len()].to_string(),
            address: format!("0x{i:040x}"),
            name: format!("{}-long", collaterals[i % collaterals.len()]),
            collateral: TokenInfo::new(collaterals[i % collaterals.len()], "0xc"),
            borrowed: TokenInfo::new("crvUSD", "0xb"),
            liquidity_usd: Some((i as f64) * 1_017.3 % 5e7),
            utilization_percent: if i % 13 == 0 {
                None
            } else {
                Some((i as f64 * 7.7) % 100.0)
            },
            total_assets_usd: Some((i as f64) * 31_337.0 % 1e8),
            total_debt_usd: Some((i as f64) * 11_113.0 % 4e7),
            has_rewards: i % 5 == 0,
            favorite: i % 50 == 0,
            pool_type: if i % 4 == 0 {
                PoolType::Mint
            } else {
                PoolType::Lend
            },
        })
        .collect()
}

/// Benchmark the unfiltered, unsorted pass (counts only).
fn bench_passthrough(c: &mut Criterion) {
    let rows = generate_rows(1_000);
    let filter = FilterState::default();
    let sort = SortState::none();

    c.bench_function("pipeline_passthrough_1k", |b| {
        b.iter(|| build_view(black_box(&rows), &filter, &sort));
    });
}

/// Benchmark text search across name and symbols.
fn bench_search(c: &mut Criterion) {
    let rows = generate_rows(1_000);
    let mut filter = FilterState::default();
    filter.search = "wstETH".to_string();
    let sort = SortState::none();

    c.bench_function("pipeline_search_1k", |b| {
        b.iter(|| build_view(black_box(&rows), &filter, &sort));
    });
}

/// Benchmark a range filter combined with a numeric sort.
fn bench_filter_and_sort(c: &mut Criterion) {
    let rows = generate_rows(1_000);
    let mut filter = FilterState::default();
    filter
        .ranges
        .insert(ColumnId::UtilizationPercent, RangeFilter::new(20.0, 80.0));
    let sort = SortState::by(ColumnId::LiquidityUsd, SortDirection::Descending);

    c.bench_function("pipeline_filter_sort_1k", |b| {
        b.iter(|| build_view(black_box(&rows), &filter, &sort));
    });
}

criterion_group!(benches, bench_passthrough, bench_search, bench_filter_and_sort);
criterion_main!(benches);
