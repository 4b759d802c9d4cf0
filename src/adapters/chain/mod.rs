//! Chain Adapters - Ethereum Read-only Interaction Layer
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - RPC provider management with chain-id validation
//! - Aggregate reads (CRV supply, locked amounts, weekly fees)

pub mod provider;
pub mod reader;

pub use provider::EthereumProvider;
pub use reader::{AnalyticsContracts, OnchainReader};
