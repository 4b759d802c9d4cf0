//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, blockchain RPC). Each sub-module
//! groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `http`: Public market-data REST API client
//! - `chain`: Ethereum read-only queries via alloy-rs
//! - `wallet`: Wallet-connection surface over the RPC provider

pub mod chain;
pub mod http;
pub mod wallet;
