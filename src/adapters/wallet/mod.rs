//! Wallet Adapter - `WalletConnector` over an RPC Provider
//!
//! A headless stand-in for the browser's multi-wallet SDK: "connecting"
//! binds a configured account address to the shared RPC provider. The
//! store only ever sees the `WalletConnector` port, so swapping in a
//! real SDK-backed adapter changes nothing above this layer.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::ports::wallet::{WalletAccount, WalletConnector};

use super::chain::EthereumProvider;

/// Wallet adapter backed by a plain RPC provider.
pub struct RpcWallet {
    provider: Arc<EthereumProvider>,
    /// Account address to report once connected.
    account_address: String,
    /// Currently connected account, if any.
    connected: RwLock<Option<WalletAccount>>,
}

impl RpcWallet {
    pub fn new(provider: Arc<EthereumProvider>, account_address: String) -> Self {
        Self {
            provider,
            account_address,
            connected: RwLock::new(None),
        }
    }
}

#[async_trait]
impl WalletConnector for RpcWallet {
    async fn connect(&self) -> Result<WalletAccount> {
        let account = WalletAccount {
            address: self.account_address.clone(),
        };
        {
            let mut connected = self.connected.write().await;
            *connected = Some(account.clone());
        }
        info!(address = %account.address, "Wallet connected");
        Ok(account)
    }

    async fn disconnect(&self) -> Result<()> {
        let mut connected = self.connected.write().await;
        *connected = None;
        info!("Wallet disconnected");
        Ok(())
    }

    async fn account(&self) -> Option<WalletAccount> {
        self.connected.read().await.clone()
    }

    async fn chain_id(&self) -> Result<u64> {
        // The provider validated its chain id at connect time.
        Ok(self.provider.chain_id())
    }

    async fn is_connected(&self) -> bool {
        self.connected.read().await.is_some()
    }
}

/// Always-disconnected wallet for provider-less runs.
///
/// Matches the dashboard's behavior without a wallet: analytics stay
/// idle and tiles render "-".
#[derive(Debug, Default)]
pub struct NoWallet;

#[async_trait]
impl WalletConnector for NoWallet {
    async fn connect(&self) -> Result<WalletAccount> {
        anyhow::bail!("No wallet provider available")
    }

    async fn disconnect(&self) -> Result<()> {
        Ok(())
    }

    async fn account(&self) -> Option<WalletAccount> {
        None
    }

    async fn chain_id(&self) -> Result<u64> {
        anyhow::bail!("No wallet provider available")
    }

    async fn is_connected(&self) -> bool {
        false
    }
}
