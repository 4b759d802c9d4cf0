//! User Store - Per-user Loan Lookups
//!
//! Holds the loan-existence and loan-health mappers keyed by the user's
//! active market key (chain + market + account). The health cell follows
//! the original display rule: nothing while unknown, "?" when lookups
//! errored, nothing when no loan exists, otherwise the formatted percent.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::format::{format_percent, SENTINEL};

use super::fetch::FetchState;

/// Key identifying one user's position in one market.
pub type UserActiveKey = String;

/// Store of per-user loan lookup slices.
#[derive(Default)]
pub struct UserStore {
    loans_exists: RwLock<HashMap<UserActiveKey, FetchState<bool>>>,
    loans_health: RwLock<HashMap<UserActiveKey, FetchState<f64>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of a loan-existence lookup.
    pub async fn record_exists(&self, key: &str, exists: bool) {
        let mut map = self.loans_exists.write().await;
        map.entry(key.to_string()).or_default().succeed(exists);
    }

    /// Record a failed loan-existence lookup.
    pub async fn record_exists_error(&self, key: &str, reason: impl Into<String>) {
        let mut map = self.loans_exists.write().await;
        map.entry(key.to_string()).or_default().fail(reason);
    }

    /// Record the result of a loan-health lookup (percent).
    pub async fn record_health(&self, key: &str, health_percent: f64) {
        let mut map = self.loans_health.write().await;
        map.entry(key.to_string()).or_default().succeed(health_percent);
    }

    /// Record a failed loan-health lookup.
    pub async fn record_health_error(&self, key: &str, reason: impl Into<String>) {
        let mut map = self.loans_health.write().await;
        map.entry(key.to_string()).or_default().fail(reason);
    }

    /// Resolve the health cell for a user key.
    ///
    /// - `None` — nothing known yet, render nothing
    /// - `Some("?")` — existence errored, or loan exists but health errored
    /// - `None` — lookup succeeded and no loan exists
    /// - `Some("42.50%")` — loan exists with known health
    pub async fn health_cell(&self, key: &str) -> Option<String> {
        let exists_map = self.loans_exists.read().await;
        let exists_state = exists_map.get(key)?;

        if exists_state.error().is_some() {
            return Some(SENTINEL.to_string());
        }
        let exists = *exists_state.data()?;
        if !exists {
            return None;
        }

        let health_map = self.loans_health.read().await;
        match health_map.get(key) {
            Some(state) if state.error().is_some() => Some(SENTINEL.to_string()),
            Some(state) => state.data().map(|h| format_percent(*h, 2)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_key_renders_nothing() {
        let store = UserStore::new();
        assert_eq!(store.health_cell("k").await, None);
    }

    #[tokio::test]
    async fn test_exists_error_renders_sentinel() {
        let store = UserStore::new();
        store.record_exists_error("k", "rpc down").await;
        assert_eq!(store.health_cell("k").await, Some("?".to_string()));
    }

    #[tokio::test]
    async fn test_no_loan_renders_nothing() {
        let store = UserStore::new();
        store.record_exists("k", false).await;
        assert_eq!(store.health_cell("k").await, None);
    }

    #[tokio::test]
    async fn test_loan_with_health_error_renders_sentinel() {
        let store = UserStore::new();
        store.record_exists("k", true).await;
        store.record_health_error("k", "detail lookup failed").await;
        assert_eq!(store.health_cell("k").await, Some("?".to_string()));
    }

    #[tokio::test]
    async fn test_healthy_loan_renders_percent() {
        let store = UserStore::new();
        store.record_exists("k", true).await;
        store.record_health("k", 42.5).await;
        assert_eq!(store.health_cell("k").await, Some("42.50%".to_string()));
    }
}
