//! Ethereum RPC Provider - alloy-rs 0.9 Connection Management
//!
//! Manages the connection to Ethereum mainnet via alloy-rs. Validates
//! RPC connectivity at startup and exposes a shared provider instance
//! for all read-only on-chain queries.
//!
//! In alloy 0.9, `ProviderBuilder::new().on_http()` returns a complex
//! filler type. We store it as a type-erased `dyn Provider` to keep
//! the API clean across the adapter layer.

use std::sync::Arc;

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};
use tracing::{info, instrument};

/// Ethereum mainnet chain id; the analytics contracts live only there.
const MAINNET_CHAIN_ID: u64 = 1;

/// Shared Ethereum RPC provider backed by alloy-rs 0.9.
///
/// All chain adapters share a single provider instance to avoid
/// redundant connections and enable connection pooling.
pub struct EthereumProvider {
    /// The alloy HTTP provider connected to mainnet RPC (type-erased).
    provider: Arc<dyn Provider + Send + Sync>,
    /// Chain id reported by the RPC at connect time.
    chain_id: u64,
}

impl EthereumProvider {
    /// Connect to an RPC endpoint and validate the chain id.
    ///
    /// The URL comes from config, never hardcoded. Validates
    /// chain id = 1 (Ethereum mainnet) at startup.
    #[instrument(skip_all)]
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        // alloy 0.9: on_http() is synchronous, returns impl Provider
        let provider = ProviderBuilder::new()
            .on_http(rpc_url.parse().context("Invalid RPC URL")?)
            .boxed();

        let provider: Arc<dyn Provider + Send + Sync> = Arc::new(provider);

        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to query chain ID")?;

        if chain_id != MAINNET_CHAIN_ID {
            anyhow::bail!("Expected Ethereum mainnet (chain_id=1), got {chain_id}");
        }

        info!(chain_id, "Connected to Ethereum RPC");

        Ok(Self { provider, chain_id })
    }

    /// Get a shared reference to the alloy provider (type-erased).
    pub fn inner(&self) -> Arc<dyn Provider + Send + Sync> {
        Arc::clone(&self.provider)
    }

    /// Chain id validated at connect time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Check if the RPC connection is healthy via a lightweight call.
    pub async fn is_healthy(&self) -> bool {
        self.provider.get_block_number().await.is_ok()
    }
}
