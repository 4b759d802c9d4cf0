//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the store layer requires from
//! the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MarketApi`: Market rows and chart snapshots over REST
//! - `ChainReader`: Read-only on-chain aggregates (CurveApi-like)
//! - `WalletConnector`: Thin surface over the wallet-connection SDK

pub mod chain_reader;
pub mod market_api;
pub mod wallet;
