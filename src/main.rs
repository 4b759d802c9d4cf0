//! LlamaLend Markets — Entry Point
//!
//! Initializes configuration, logging, the REST client, and the market
//! store, then renders the markets table and analytics tiles on a
//! refresh cycle until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create RestClient (HTTP + retry + concurrency cap)
//! 4. Create MarketStore + SnapshotStore over the MarketApi port
//! 5. Optionally connect Ethereum RPC + wallet for analytics
//! 6. Fetch all chains, render, refresh on a timer
//! 7. Wait for SIGINT → exit

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

mod adapters;
mod config;
mod domain;
mod ports;
mod render;
mod usecases;

use adapters::chain::{AnalyticsContracts, EthereumProvider, OnchainReader};
use adapters::http::{LlamaApi, RestClient, RestClientConfig};
use adapters::wallet::RpcWallet;
use domain::columns::{ColumnVisibility, SortState};
use domain::filters::FilterState;
use domain::market::{MarketKey, Snapshot};
use ports::chain_reader::ChainReader;
use ports::market_api::MarketApi;
use ports::wallet::WalletConnector;
use usecases::{AnalyticsStore, MarketStore, SnapshotStore};

/// Seconds between refresh cycles.
const REFRESH_INTERVAL_SECS: u64 = 300;

/// How many visible rows get their chart history loaded per cycle.
const CHART_ROWS: usize = 20;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.app.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        chains = config.chains.len(),
        "Starting LlamaLend markets dashboard"
    );

    // ── 3. Create REST client + API adapter ─────────────────
    let rest = Arc::new(
        RestClient::new(RestClientConfig {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_millis(config.api.timeout_ms),
            max_concurrent: config.api.max_concurrent,
            max_retries: config.api.max_retries,
            retry_base_delay: Duration::from_millis(200),
        })
        .context("Failed to create REST client")?,
    );
    let api = Arc::new(LlamaApi::new(Arc::clone(&rest)));

    // ── 4. Create stores over the MarketApi port ────────────
    let active_chains: Vec<String> = config
        .chains
        .iter()
        .filter(|c| c.active)
        .map(|c| c.name.clone())
        .collect();
    match api.list_chains().await {
        Ok(supported) => {
            for chain in active_chains.iter().filter(|c| !supported.contains(c)) {
                warn!(%chain, "Configured chain is not served by the API");
            }
        }
        Err(e) => warn!(error = %e, "Could not list supported chains"),
    }
    let market_store = Arc::new(MarketStore::new(Arc::clone(&api), active_chains));
    let snapshot_store = Arc::new(SnapshotStore::new(
        Arc::clone(&api),
        config.api.snapshots_page_size,
    ));

    // ── 5. Table state from config defaults ─────────────────
    let visibility = ColumnVisibility::with_hidden(config.table.hidden_column_ids());
    let filter = FilterState::default();
    let sort = SortState::none();

    // ── 6. Optional on-chain analytics ──────────────────────
    let analytics = match &config.analytics {
        Some(cfg) => match setup_analytics(cfg, Arc::clone(&rest)).await {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "Analytics setup failed, tiles will render '-'");
                None
            }
        },
        None => {
            info!("No analytics section configured, tiles will render '-'");
            None
        }
    };

    // ── 7. Refresh cycle until SIGINT ───────────────────────
    loop {
        market_store.fetch_all().await;
        let view = market_store.view(&filter, &sort).await;

        // Load chart history for the rows at the top of the view.
        let visible: Vec<MarketKey> = view.rows.iter().take(CHART_ROWS).map(|r| r.key()).collect();
        snapshot_store.ensure_loaded(&visible).await;
        let mut charts: HashMap<MarketKey, Vec<Snapshot>> = HashMap::new();
        for key in &visible {
            if let Some(history) = snapshot_store.snapshots(key).await {
                charts.insert(key.clone(), history);
            }
        }

        let table = render::render_table(&view, &visibility, &charts);
        for line in table.to_lines() {
            println!("{line}");
        }

        if let Some(store) = &analytics {
            store.load().await;
            let crv_price = match &config.analytics {
                Some(cfg) => api
                    .usd_price(&"ethereum".to_string(), &cfg.crv_token)
                    .await
                    .ok()
                    .flatten(),
                None => None,
            };
            let apr = match crv_price {
                Some(price) => store.ve_crv_apr(price).await,
                None => None,
            };
            let tiles = render::analytics_tiles(
                &store.ve_data().await,
                &store.fees().await,
                &store.holders().await,
                apr,
            );
            println!();
            for tile in tiles {
                println!("{}: {}", tile.label, tile.value);
            }
        }

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("SIGINT received, shutting down");
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(REFRESH_INTERVAL_SECS)) => {
                info!("Refreshing market data");
            }
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Wire the analytics store: RPC provider, contract reader, wallet.
///
/// Analytics only load with a connected wallet on mainnet, so the
/// wallet connects here as part of setup.
async fn setup_analytics(
    cfg: &config::AnalyticsConfig,
    rest: Arc<RestClient>,
) -> Result<Arc<AnalyticsStore<OnchainReader, RpcWallet>>> {
    let provider = Arc::new(
        EthereumProvider::connect(&cfg.rpc_url)
            .await
            .context("Failed to connect Ethereum RPC")?,
    );

    let contracts = AnalyticsContracts {
        crv_token: cfg.crv_token.parse().context("Invalid crv_token address")?,
        voting_escrow: cfg
            .voting_escrow
            .parse()
            .context("Invalid voting_escrow address")?,
        fee_distributor: cfg
            .fee_distributor
            .parse()
            .context("Invalid fee_distributor address")?,
    };
    let reader = Arc::new(
        OnchainReader::new(Arc::clone(&provider), rest, contracts)
            .await
            .context("Failed to validate analytics contracts")?,
    );

    if !reader.is_healthy().await {
        warn!("Ethereum RPC health check failed, analytics may error");
    }

    let wallet = Arc::new(RpcWallet::new(provider, cfg.account_address.clone()));
    wallet.connect().await.context("Failed to connect wallet")?;

    Ok(Arc::new(AnalyticsStore::new(reader, wallet)))
}
