//! On-chain Aggregate Reader - `ChainReader` over Raw eth_call
//!
//! Implements the `ChainReader` port with read-only calls against the
//! CRV token, the voting escrow, and the fee distributor. Contract
//! addresses come from config and are validated (code exists) at
//! startup. Holder counts are not derivable from a single call, so
//! they come from the indexer's REST endpoint instead.

use std::sync::Arc;

use alloy::primitives::{keccak256, Address, U256};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::adapters::http::RestClient;
use crate::ports::chain_reader::{ChainReader, FeeEpoch, HolderCounts};

use super::provider::EthereumProvider;

/// Seconds in one fee-distribution week.
const WEEK_SECS: u64 = 7 * 24 * 3600;

/// How many past weeks of fees to expose (newest last).
const FEE_WEEKS: u64 = 8;

/// Contract addresses loaded from config.
#[derive(Debug, Clone)]
pub struct AnalyticsContracts {
    /// CRV ERC-20 token.
    pub crv_token: Address,
    /// veCRV voting escrow.
    pub voting_escrow: Address,
    /// Weekly fee distributor.
    pub fee_distributor: Address,
}

/// Holder counts as served by the indexer endpoint.
#[derive(Debug, Clone, Deserialize)]
struct HolderCountsDto {
    total_holders: u64,
    can_create_vote: u64,
}

/// Implements read-only aggregate queries via alloy-rs 0.9.
pub struct OnchainReader {
    /// Shared mainnet RPC provider.
    provider: Arc<EthereumProvider>,
    /// REST client for indexer-backed counts.
    rest: Arc<RestClient>,
    /// Contract addresses from config.
    contracts: AnalyticsContracts,
}

impl OnchainReader {
    /// Create and validate the reader's contract bindings.
    ///
    /// Validates that each contract address has deployed code on-chain,
    /// so a misconfigured address fails at startup instead of returning
    /// zeroes forever.
    #[instrument(skip_all)]
    pub async fn new(
        provider: Arc<EthereumProvider>,
        rest: Arc<RestClient>,
        contracts: AnalyticsContracts,
    ) -> Result<Self> {
        let inner = provider.inner();

        for (name, addr) in [
            ("CRV token", contracts.crv_token),
            ("Voting escrow", contracts.voting_escrow),
            ("Fee distributor", contracts.fee_distributor),
        ] {
            let code = inner
                .get_code_at(addr)
                .await
                .context(format!("Failed to query code for {name}"))?;

            if code.is_empty() {
                bail!("Contract {name} at {addr} has no deployed code — check config.toml");
            }

            info!(contract = name, address = %addr, "Validated on-chain");
        }

        Ok(Self {
            provider,
            rest,
            contracts,
        })
    }

    /// Execute a read-only call and decode the result as a U256 word.
    async fn call_u256(&self, to: Address, calldata: Vec<u8>) -> Result<U256> {
        let inner = self.provider.inner();
        let result = inner
            .call(
                &alloy::rpc::types::TransactionRequest::default()
                    .to(to)
                    .input(alloy::primitives::Bytes::from(calldata).into()),
            )
            .await
            .context("eth_call failed")?;
        Ok(U256::from_be_slice(&result))
    }

    /// 4-byte selector for a function signature.
    fn selector(signature: &[u8]) -> [u8; 4] {
        let hash = keccak256(signature);
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Selector-only calldata (no arguments).
    fn calldata0(signature: &[u8]) -> Vec<u8> {
        Self::selector(signature).to_vec()
    }

    /// Calldata with one address argument, left-padded to 32 bytes.
    fn calldata_address(signature: &[u8], addr: Address) -> Vec<u8> {
        let mut data = Self::selector(signature).to_vec();
        data.extend_from_slice(&[0u8; 12]);
        data.extend_from_slice(addr.as_slice());
        data
    }

    /// Calldata with one uint256 argument.
    fn calldata_u256(signature: &[u8], value: U256) -> Vec<u8> {
        let mut data = Self::selector(signature).to_vec();
        data.extend_from_slice(&value.to_be_bytes::<32>());
        data
    }

    /// Convert an 18-decimal token amount to human units.
    ///
    /// Saturates at `u128::MAX` wei so a garbage word from a hostile or
    /// broken RPC cannot panic the reader.
    fn from_wei(raw: U256) -> f64 {
        raw.min(U256::from(u128::MAX)).to::<u128>() as f64 / 1e18
    }
}

#[async_trait]
impl ChainReader for OnchainReader {
    #[instrument(skip(self))]
    async fn crv_supply(&self) -> Result<f64> {
        let raw = self
            .call_u256(
                self.contracts.crv_token,
                Self::calldata0(b"totalSupply()"),
            )
            .await
            .context("CRV totalSupply call failed")?;
        Ok(Self::from_wei(raw))
    }

    #[instrument(skip(self))]
    async fn locked_crv(&self) -> Result<f64> {
        // CRV held by the voting escrow is the locked amount.
        let raw = self
            .call_u256(
                self.contracts.crv_token,
                Self::calldata_address(b"balanceOf(address)", self.contracts.voting_escrow),
            )
            .await
            .context("CRV balanceOf(escrow) call failed")?;
        Ok(Self::from_wei(raw))
    }

    #[instrument(skip(self))]
    async fn ve_crv_supply(&self) -> Result<f64> {
        let raw = self
            .call_u256(
                self.contracts.voting_escrow,
                Self::calldata0(b"totalSupply()"),
            )
            .await
            .context("veCRV totalSupply call failed")?;
        Ok(Self::from_wei(raw))
    }

    #[instrument(skip(self))]
    async fn weekly_fees(&self) -> Result<Vec<FeeEpoch>> {
        // tokens_per_week is keyed by week-aligned timestamps. Distributed
        // tokens are the crvUSD fee token, treated 1:1 with USD.
        let now = Utc::now().timestamp() as u64;
        let current_week = now / WEEK_SECS * WEEK_SECS;

        let mut epochs = Vec::with_capacity(FEE_WEEKS as usize);
        for weeks_back in (0..FEE_WEEKS).rev() {
            let week_start = current_week - weeks_back * WEEK_SECS;
            let raw = self
                .call_u256(
                    self.contracts.fee_distributor,
                    Self::calldata_u256(b"tokens_per_week(uint256)", U256::from(week_start)),
                )
                .await
                .context("tokens_per_week call failed")?;
            epochs.push(FeeEpoch {
                date: Utc
                    .timestamp_opt(week_start as i64, 0)
                    .single()
                    .context("Invalid week timestamp")?,
                fees_usd: Self::from_wei(raw),
            });
        }
        Ok(epochs)
    }

    #[instrument(skip(self))]
    async fn holder_counts(&self) -> Result<HolderCounts> {
        let dto: HolderCountsDto = self
            .rest
            .get_json("/v1/dao/lockers/count")
            .await
            .context("Holder count endpoint failed")?;
        Ok(HolderCounts {
            total_holders: dto.total_holders,
            can_create_vote: dto.can_create_vote,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.provider.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wei_converts_18_decimals() {
        let raw = U256::from(2_500_000_000_000_000_000u128);
        assert_eq!(OnchainReader::from_wei(raw), 2.5);
    }

    #[test]
    fn test_from_wei_saturates_oversized_words() {
        let wei = OnchainReader::from_wei(U256::MAX);
        assert!(wei.is_finite());
        assert_eq!(wei, u128::MAX as f64 / 1e18);
    }
}
