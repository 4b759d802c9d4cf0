//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::columns::ColumnId;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        app = %config.app.name,
        chains = config.chains.len(),
        page_size = config.api.snapshots_page_size,
        analytics = config.analytics.is_some(),
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty API URL and chain list
/// - Known column ids in the hidden-column list
/// - Complete analytics section when present
fn validate_config(config: &AppConfig) -> Result<()> {
    // API validation
    anyhow::ensure!(
        !config.api.base_url.is_empty(),
        "API base_url must not be empty"
    );
    anyhow::ensure!(
        config.api.timeout_ms > 0,
        "API timeout_ms must be positive"
    );
    anyhow::ensure!(
        config.api.max_concurrent > 0,
        "API max_concurrent must be positive"
    );
    anyhow::ensure!(
        config.api.snapshots_page_size > 0,
        "API snapshots_page_size must be positive"
    );

    // Chain validation
    anyhow::ensure!(
        !config.chains.is_empty(),
        "At least one chain must be configured"
    );
    for (i, chain) in config.chains.iter().enumerate() {
        anyhow::ensure!(
            !chain.name.is_empty(),
            "Chain {} has an empty name",
            i
        );
    }

    // Table validation
    anyhow::ensure!(
        config.table.small_pool_tvl >= 0.0,
        "small_pool_tvl must be non-negative, got {}",
        config.table.small_pool_tvl
    );
    for id in &config.table.hidden_columns {
        anyhow::ensure!(
            ColumnId::parse(id).is_some(),
            "Unknown column id in hidden_columns: {}",
            id
        );
    }

    // Analytics validation
    if let Some(analytics) = &config.analytics {
        anyhow::ensure!(
            !analytics.rpc_url.is_empty(),
            "Analytics rpc_url must not be empty"
        );
        for (field, value) in [
            ("crv_token", &analytics.crv_token),
            ("voting_escrow", &analytics.voting_escrow),
            ("fee_distributor", &analytics.fee_distributor),
        ] {
            anyhow::ensure!(
                value.starts_with("0x") && value.len() == 42,
                "Analytics {} must be a 0x-prefixed 20-byte address, got {:?}",
                field,
                value
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_minimal_config_parses() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            name = "llamalend-markets"

            [api]
            base_url = "https://prices.curve.finance"

            [[chains]]
            name = "ethereum"
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.api.snapshots_page_size, 50);
        assert!(config.chains[0].active);
        assert!(config.analytics.is_none());
    }

    #[test]
    fn test_unknown_hidden_column_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            name = "llamalend-markets"

            [api]
            base_url = "https://prices.curve.finance"

            [[chains]]
            name = "ethereum"

            [table]
            hidden_columns = ["lendChart", "nope"]
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_analytics_address_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            name = "llamalend-markets"

            [api]
            base_url = "https://prices.curve.finance"

            [[chains]]
            name = "ethereum"

            [analytics]
            rpc_url = "https://eth.llamarpc.com"
            account_address = "0xD533a949740bb3306d119CC777fa900bA034cd52"
            crv_token = "not-an-address"
            voting_escrow = "0x5f3b5DfEb7B28CDbD7FAba78963EE202a494e2A2"
            fee_distributor = "0xD16d5eC345Dd86Fb63C6a9C43c517210F1027914"
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_err());
    }
}
