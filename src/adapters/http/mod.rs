//! HTTP Adapters - Public Market-data REST API
//!
//! Implements the `MarketApi` port against the read-only REST endpoints.
//!
//! Sub-modules:
//! - `client`: HTTP client with concurrency cap and retries
//! - `markets`: `MarketApi` implementation
//! - `types`: API response type definitions

pub mod client;
pub mod markets;
pub mod types;

pub use client::{RestClient, RestClientConfig};
pub use markets::LlamaApi;
