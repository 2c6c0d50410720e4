//! Environment variable parsing utilities.
//!
//! Unset and empty variables fall back to the caller's default. A variable
//! that is set but does not parse is an error naming the variable, never a
//! silent fallback.
//!
//! # Example
//!
//! ```
//! use knapsack_offchain_types::env_utils::{env_var, env_var_or};
//!
//! let page_size: usize = env_var_or("KNAPSACK_PAGE_SIZE", 100)?;
//! let timeout: Option<u64> = env_var("KNAPSACK_RPC_TIMEOUT_SECS")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `Ok(None)` if the variable is unset or empty.
pub fn env_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = env_string(key) else {
        return Ok(None);
    };
    raw.parse()
        .map(Some)
        .map_err(|e| anyhow!("Invalid value '{}': {}", raw, e))
        .with_context(|| key.to_string())
}

/// Parse an environment variable with a default for the unset case.
pub fn env_var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(env_var(key)?.unwrap_or(default))
}

/// Read a string environment variable, treating an empty value as unset.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_missing_returns_none() {
        let value: Option<u64> = env_var("KNAPSACK_TEST_DEFINITELY_UNSET_VAR").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_env_var_or_default() {
        let value: usize = env_var_or("KNAPSACK_TEST_DEFINITELY_UNSET_VAR", 100).unwrap();
        assert_eq!(value, 100);
    }

    #[test]
    fn test_env_var_parses_and_trims() {
        std::env::set_var("KNAPSACK_TEST_ENV_VAR_PARSE", " 42 ");
        let value: Option<u64> = env_var("KNAPSACK_TEST_ENV_VAR_PARSE").unwrap();
        assert_eq!(value, Some(42));
        std::env::remove_var("KNAPSACK_TEST_ENV_VAR_PARSE");
    }

    #[test]
    fn test_env_var_unparseable_is_error() {
        std::env::set_var("KNAPSACK_TEST_ENV_VAR_BAD", "5e3");
        let err = env_var_or::<u64>("KNAPSACK_TEST_ENV_VAR_BAD", 7).unwrap_err();
        std::env::remove_var("KNAPSACK_TEST_ENV_VAR_BAD");

        let message = format!("{:#}", err);
        assert!(message.starts_with("KNAPSACK_TEST_ENV_VAR_BAD"), "{}", message);
        assert!(message.contains("'5e3'"), "{}", message);
    }

    #[test]
    fn test_env_var_empty_uses_default() {
        std::env::set_var("KNAPSACK_TEST_ENV_VAR_EMPTY", "  ");
        let value: u64 = env_var_or("KNAPSACK_TEST_ENV_VAR_EMPTY", 9).unwrap();
        std::env::remove_var("KNAPSACK_TEST_ENV_VAR_EMPTY");
        assert_eq!(value, 9);
    }

    #[test]
    fn test_env_string_empty_is_unset() {
        std::env::set_var("KNAPSACK_TEST_ENV_STRING_EMPTY", "   ");
        assert!(env_string("KNAPSACK_TEST_ENV_STRING_EMPTY").is_none());
        std::env::remove_var("KNAPSACK_TEST_ENV_STRING_EMPTY");
    }
}
