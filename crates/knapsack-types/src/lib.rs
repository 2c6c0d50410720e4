//! Shared types for the knapsack-offchain workspace.
//!
//! This crate holds the pieces both the transport layer and the compute unit
//! need, so neither has to depend on the other:
//!
//! - [`encoding`] - 32-byte word codec, selectors, hex and address helpers
//! - [`env_utils`] - typed environment variable parsing
//! - [`secret`] - a credential wrapper that never prints its contents

pub mod encoding;
pub mod env_utils;
pub mod secret;

pub use encoding::{Word, WORD_SIZE};
pub use env_utils::{env_var, env_var_or};
pub use secret::Secret;
