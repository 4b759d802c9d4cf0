//! Wallet Port - Multi-wallet SDK Surface
//!
//! Thin boundary over the third-party wallet-connection SDK. This crate
//! only consumes `connect`/`disconnect`, the current account, and the
//! chain id; provider negotiation stays inside the SDK.

use async_trait::async_trait;

/// The connected account as reported by the wallet SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletAccount {
    /// 0x-prefixed account address.
    pub address: String,
}

/// Trait for wallet-connection providers.
#[async_trait]
pub trait WalletConnector: Send + Sync + 'static {
    /// Open the SDK's connection flow. Resolves to the selected account.
    async fn connect(&self) -> anyhow::Result<WalletAccount>;

    /// Disconnect the current wallet.
    async fn disconnect(&self) -> anyhow::Result<()>;

    /// The currently connected account, if any.
    async fn account(&self) -> Option<WalletAccount>;

    /// Chain id the wallet's provider is on (1 = Ethereum mainnet).
    async fn chain_id(&self) -> anyhow::Result<u64>;

    /// Whether a wallet is currently connected.
    async fn is_connected(&self) -> bool;
}
