//! The off-chain compute unit: fetch, solve, encode.
//!
//! A run is a pure function of the contract's storage and the two inputs.
//! There is no clock, randomness, or hash-ordered iteration anywhere on the
//! path, so independent executions against the same state produce the same
//! 32 bytes.

use knapsack_offchain_types::encoding::{is_valid_address, normalize_address};
use knapsack_offchain_types::Word;
use knapsack_transport::CallTransport;
use tracing::info;

use crate::config::UnitConfig;
use crate::error::{InputError, UnitError};
use crate::fetcher::{FetchStats, PageFetcher};
use crate::knapsack::solve;
use crate::output::encode_result;

/// Validated unit inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitArgs {
    /// Lowercase `0x`-prefixed contract address.
    pub contract: String,
    pub capacity: u64,
}

impl UnitArgs {
    /// Parse the positional argument array `[contract, capacity]`.
    pub fn parse(args: &[String], max_capacity: u64) -> Result<Self, InputError> {
        match args {
            [contract, capacity] => Self::new(contract, capacity, max_capacity),
            _ => Err(InputError::ArgumentCount(args.len())),
        }
    }

    pub fn new(contract: &str, capacity: &str, max_capacity: u64) -> Result<Self, InputError> {
        let contract = contract.trim();
        if !is_valid_address(contract) {
            return Err(InputError::InvalidAddress(contract.to_string()));
        }
        let capacity = parse_capacity(capacity)?;
        if capacity > max_capacity {
            return Err(InputError::CapacityTooLarge {
                capacity,
                limit: max_capacity,
            });
        }
        Ok(Self {
            contract: normalize_address(contract),
            capacity,
        })
    }
}

/// Parse a base-10 non-negative integer with no sign, fraction, or suffix.
pub fn parse_capacity(raw: &str) -> Result<u64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::InvalidCapacity(raw.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| InputError::InvalidCapacity(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutput {
    pub optimum: u128,
    /// The unit's sole output: `optimum` as a 32-byte big-endian word.
    pub encoded: Word,
    pub stats: FetchStats,
}

/// Run the unit against `transport`.
pub fn run_unit<T: CallTransport>(
    config: &UnitConfig,
    transport: T,
    args: &UnitArgs,
) -> Result<UnitOutput, UnitError> {
    info!(
        contract = %args.contract,
        capacity = args.capacity,
        page_size = config.fetch.page_size.get(),
        "starting knapsack unit"
    );

    let fetcher = PageFetcher::new(transport, config.fetch);
    let (items, stats) = fetcher.fetch_all_with_stats(&args.contract)?;
    let optimum = solve(&items.values, &items.weights, args.capacity)?;

    info!(
        pages = stats.pages,
        items = stats.items,
        optimum = %optimum,
        "knapsack unit complete"
    );

    Ok(UnitOutput {
        optimum,
        encoded: encode_result(optimum),
        stats,
    })
}

/// Parse raw arguments and run the unit in one step.
pub fn run_with_args<T: CallTransport>(
    config: &UnitConfig,
    transport: T,
    args: &[String],
) -> Result<UnitOutput, UnitError> {
    let args = UnitArgs::parse(args, config.max_capacity)?;
    run_unit(config, transport, &args)
}
