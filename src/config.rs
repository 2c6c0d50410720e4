//! Unit configuration.
//!
//! Everything the unit would otherwise read from ambient state (endpoint,
//! credential, selector, page size) lives in one [`UnitConfig`] value that
//! is built once and handed to the fetcher.
//!
//! Environment variables:
//!
//! - `KNAPSACK_RPC_URL`, `INFURA_API_KEY`, `KNAPSACK_BLOCK_TAG`,
//!   `KNAPSACK_RPC_TIMEOUT_SECS`, `KNAPSACK_RPC_CONNECT_TIMEOUT_SECS` - see
//!   [`RpcConfig::from_env`]
//! - `KNAPSACK_SELECTOR` - 4-byte accessor selector (default `0xcbba959b`)
//! - `KNAPSACK_PAGE_SIZE` - items per page (default 100)
//! - `KNAPSACK_MAX_CAPACITY` - largest accepted capacity (default 10,000,000)
//!
//! Unset or empty variables take their defaults. A variable that is set to
//! something unparseable fails [`UnitConfig::from_env`].

use std::num::NonZeroU64;

use anyhow::{anyhow, Context, Result};
use knapsack_offchain_types::encoding::parse_selector;
use knapsack_offchain_types::env_utils::{env_string, env_var_or};
use knapsack_transport::RpcConfig;

use crate::fetcher::FetchConfig;

/// Largest capacity accepted by default. The solution table holds
/// `capacity + 1` 16-byte entries.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000_000;

#[derive(Debug, Clone)]
pub struct UnitConfig {
    pub rpc: RpcConfig,
    pub fetch: FetchConfig,
    pub max_capacity: u64,
}

impl UnitConfig {
    pub fn from_env() -> Result<Self> {
        let mut fetch = FetchConfig::default();

        if let Some(selector) = env_string("KNAPSACK_SELECTOR") {
            fetch.selector = parse_selector(&selector).context("KNAPSACK_SELECTOR")?;
        }
        if let Some(raw) = env_string("KNAPSACK_PAGE_SIZE") {
            fetch.page_size = parse_page_size(&raw).context("KNAPSACK_PAGE_SIZE")?;
        }

        Ok(Self {
            rpc: RpcConfig::from_env()?,
            fetch,
            max_capacity: env_var_or("KNAPSACK_MAX_CAPACITY", DEFAULT_MAX_CAPACITY)?,
        })
    }

    /// Config for a fixed endpoint with default fetch settings.
    pub fn with_url(url: &str) -> Self {
        Self {
            rpc: RpcConfig::with_url(url),
            fetch: FetchConfig::default(),
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Parse a page size, rejecting zero (a zero-sized page never terminates).
pub fn parse_page_size(raw: &str) -> Result<NonZeroU64> {
    let size: u64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow!("Invalid page size '{}': {}", raw, e))?;
    NonZeroU64::new(size).ok_or_else(|| anyhow!("Page size must be greater than zero"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{DEFAULT_PAGE_SIZE, DEFAULT_SELECTOR};
    use std::sync::Mutex;

    const VARS: [&str; 5] = [
        "KNAPSACK_SELECTOR",
        "KNAPSACK_PAGE_SIZE",
        "KNAPSACK_MAX_CAPACITY",
        "KNAPSACK_RPC_TIMEOUT_SECS",
        "KNAPSACK_BLOCK_TAG",
    ];

    // Tests below mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn from_env_with(vars: &[(&str, &str)]) -> Result<UnitConfig> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for key in VARS {
            std::env::remove_var(key);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let config = UnitConfig::from_env();
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        config
    }

    #[test]
    fn test_with_url_defaults() {
        let config = UnitConfig::with_url("http://localhost:8545");
        assert_eq!(config.rpc.base_url, "http://localhost:8545");
        assert!(config.rpc.api_key.is_empty());
        assert_eq!(config.fetch.selector, DEFAULT_SELECTOR);
        assert_eq!(config.fetch.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.max_capacity, DEFAULT_MAX_CAPACITY);
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("100").unwrap().get(), 100);
        assert_eq!(parse_page_size(" 25 ").unwrap().get(), 25);
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("-1").is_err());
        assert!(parse_page_size("ten").is_err());
    }

    #[test]
    fn test_from_env_reads_overrides() {
        let config = from_env_with(&[
            ("KNAPSACK_SELECTOR", "0x01020304"),
            ("KNAPSACK_PAGE_SIZE", "25"),
            ("KNAPSACK_MAX_CAPACITY", "5000"),
            ("KNAPSACK_BLOCK_TAG", "0x10"),
        ])
        .unwrap();
        assert_eq!(config.fetch.selector, [1, 2, 3, 4]);
        assert_eq!(config.fetch.page_size.get(), 25);
        assert_eq!(config.max_capacity, 5000);
        assert_eq!(config.rpc.block_tag, "0x10");
    }

    #[test]
    fn test_from_env_empty_values_use_defaults() {
        let config = from_env_with(&[("KNAPSACK_MAX_CAPACITY", ""), ("KNAPSACK_PAGE_SIZE", " ")])
            .unwrap();
        assert_eq!(config.max_capacity, DEFAULT_MAX_CAPACITY);
        assert_eq!(config.fetch.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_from_env_rejects_malformed_values() {
        for (key, value) in [
            ("KNAPSACK_MAX_CAPACITY", "5e3"),
            ("KNAPSACK_MAX_CAPACITY", "-1"),
            ("KNAPSACK_PAGE_SIZE", "1e2"),
            ("KNAPSACK_PAGE_SIZE", "0"),
            ("KNAPSACK_SELECTOR", "0xzz"),
            ("KNAPSACK_RPC_TIMEOUT_SECS", "soon"),
        ] {
            let err = from_env_with(&[(key, value)]).unwrap_err();
            let message = format!("{:#}", err);
            assert!(
                message.contains(key),
                "{}={} gave unexpected error: {}",
                key,
                value,
                message
            );
        }
    }
}
