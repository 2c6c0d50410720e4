//! Error types for the compute unit.
//!
//! Every variant is fatal. The unit never retries and never substitutes a
//! default result: a missing answer is rejected by the aggregation layer,
//! while a wrong one could be accepted.

use knapsack_transport::TransportError;
use thiserror::Error;

/// Malformed page payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("result is not valid hex: {0}")]
    InvalidHex(String),

    #[error("payload is {len} bytes, shorter than the {min}-byte tuple head")]
    TruncatedHead { len: usize, min: usize },

    #[error("{field} word at byte {at} does not fit in {target}")]
    WordOverflow {
        field: &'static str,
        at: usize,
        target: &'static str,
    },

    #[error("{array} block at offset {offset} with {count} elements exceeds payload of {len} bytes")]
    OutOfBounds {
        array: &'static str,
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error("values has {values} elements but weights has {weights}")]
    LengthMismatch { values: usize, weights: usize },
}

/// Rejected unit input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected 2 arguments (contract address, capacity), got {0}")]
    ArgumentCount(usize),

    #[error("invalid contract address '{0}': expected 0x followed by 40 hex digits")]
    InvalidAddress(String),

    #[error("invalid capacity '{0}': expected a non-negative integer")]
    InvalidCapacity(String),

    #[error("capacity {capacity} exceeds the configured limit of {limit}")]
    CapacityTooLarge { capacity: u64, limit: u64 },
}

/// Optimizer precondition failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("values has {values} elements but weights has {weights}")]
    LengthMismatch { values: usize, weights: usize },

    #[error("capacity {0} cannot be addressed on this platform")]
    CapacityTooLarge(u64),
}

/// Top-level failure of one unit invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("transport error on page {page}: {source}")]
    Transport {
        page: u64,
        #[source]
        source: TransportError,
    },

    #[error("decode error on page {page}: {source}")]
    Decode {
        page: u64,
        #[source]
        source: DecodeError,
    },

    #[error("optimizer error: {0}")]
    Solve(#[from] SolveError),
}

impl UnitError {
    /// Short name of the error kind, used for logs and `--json` output.
    pub fn kind(&self) -> &'static str {
        match self {
            UnitError::Input(_) => "input",
            UnitError::Transport { .. } => "transport",
            UnitError::Decode { .. } => "decode",
            UnitError::Solve(_) => "solve",
        }
    }
}
