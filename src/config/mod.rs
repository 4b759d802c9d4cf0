//! Configuration Module - TOML-based Dashboard Configuration
//!
//! Loads and validates configuration from `config.toml`. API base
//! URLs, chain selection, table defaults, and analytics contract
//! addresses are all externalized here - nothing is hardcoded in the
//! domain layer.

pub mod loader;

use serde::Deserialize;

use crate::domain::columns::ColumnId;

/// Top-level application configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any fetch begins.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application identity and logging.
    pub app: AppSection,
    /// Market-data REST API settings.
    pub api: ApiConfig,
    /// Chains to fetch markets for.
    pub chains: Vec<ChainConfig>,
    /// Markets-table defaults.
    #[serde(default)]
    pub table: TableConfig,
    /// On-chain analytics settings (optional; tiles render "-" without it).
    pub analytics: Option<AnalyticsConfig>,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    /// Human-readable application name.
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Market-data REST API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// REST API base URL.
    pub base_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum concurrent API requests.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Maximum retries on transient errors.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Snapshot page size for incremental chart loading.
    #[serde(default = "default_page_size")]
    pub snapshots_page_size: u32,
}

/// One chain the dashboard fetches markets for.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// Chain slug as the API knows it ("ethereum", "arbitrum").
    pub name: String,
    /// Whether the chain is selected at startup.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Markets-table defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// TVL below which a pool's tokens are left out of filter menus (USD).
    #[serde(default = "default_small_pool_tvl")]
    pub small_pool_tvl: f64,
    /// Column ids hidden at startup.
    #[serde(default)]
    pub hidden_columns: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_pool_tvl: default_small_pool_tvl(),
            hidden_columns: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Parse the configured hidden column ids.
    ///
    /// Unknown ids are rejected by the loader, so this only sees valid ones.
    pub fn hidden_column_ids(&self) -> Vec<ColumnId> {
        self
            .hidden_columns
            .iter()
            .filter_map(|s| ColumnId::parse(s))
            .collect()
    }
}

/// On-chain analytics configuration.
///
/// Contract addresses are ALWAYS in config - never hardcoded.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Ethereum mainnet RPC endpoint.
    pub rpc_url: String,
    /// Account address the wallet adapter reports once connected.
    pub account_address: String,
    /// CRV ERC-20 token address.
    pub crv_token: String,
    /// veCRV voting escrow address.
    pub voting_escrow: String,
    /// Weekly fee distributor address.
    pub fee_distributor: String,
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_concurrent() -> usize {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_page_size() -> u32 {
    50
}

fn default_small_pool_tvl() -> f64 {
    10_000.0
}
