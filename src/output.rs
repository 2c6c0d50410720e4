//! Result encoding.
//!
//! The unit's only output is the optimum as a 32-byte big-endian unsigned
//! integer, the same word layout the contract uses for every quantity.

use knapsack_offchain_types::encoding::{to_hex_prefixed, word_from_u128};
use knapsack_offchain_types::Word;

/// Encode the optimum as a `uint256` word.
pub fn encode_result(optimum: u128) -> Word {
    word_from_u128(optimum)
}

/// `0x`-prefixed hex of [`encode_result`].
pub fn result_hex(optimum: u128) -> String {
    to_hex_prefixed(&encode_result(optimum))
}
