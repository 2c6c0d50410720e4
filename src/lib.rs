//! Off-chain 0/1 knapsack compute unit.
//!
//! Reads `(value, weight)` items from a contract's paged accessor over raw
//! JSON-RPC `eth_call`, solves a bounded 0/1 knapsack over them, and emits the
//! optimum as a single 32-byte big-endian word that independently executing
//! nodes can agree on byte-for-byte.
//!
//! - [`abi`] - strict decoder for the two-array page payload
//! - [`fetcher`] - sequential page reader
//! - [`knapsack`] - dynamic-programming optimizer
//! - [`output`] - result word encoder
//! - [`unit`] - argument validation and the fetch/solve/encode pipeline
//!
//! # Example
//!
//! ```ignore
//! use knapsack_offchain::{config::UnitConfig, unit::{run_unit, UnitArgs}};
//! use knapsack_transport::JsonRpcClient;
//!
//! let config = UnitConfig::from_env()?;
//! let client = JsonRpcClient::new(config.rpc.clone());
//! let args = UnitArgs::new("0x5FbDB2315678afecb367f032d93F642f64180aa3", "500", config.max_capacity)?;
//! let output = run_unit(&config, &client, &args)?;
//! println!("{}", hex::encode(output.encoded));
//! ```

pub mod abi;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod knapsack;
pub mod logging;
pub mod output;
pub mod unit;

pub use error::{DecodeError, InputError, SolveError, UnitError};
pub use fetcher::{FetchConfig, Items, PageFetcher};
pub use unit::{run_unit, run_with_args, UnitArgs, UnitOutput};
