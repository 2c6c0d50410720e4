//! Page payload codec.
//!
//! The paged accessor returns a tuple of two dynamic `uint256[]` arrays,
//! laid out as:
//!
//! ```text
//! word 0          byte offset of the values block
//! word 1          byte offset of the weights block
//! ...
//! at offset:      element count n
//!                 n element words
//! ```
//!
//! Offsets are relative to the start of the payload. Decoding is strict:
//! every offset, count and element is bounds-checked, and element words
//! wider than `u64` are rejected instead of truncated.

use knapsack_offchain_types::encoding::{word_from_u64, word_to_u64, word_to_usize};
use knapsack_offchain_types::WORD_SIZE;

use crate::error::DecodeError;

/// Size of the tuple head: one offset word per array.
pub const HEAD_SIZE: usize = 2 * WORD_SIZE;

/// One decoded page of parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub values: Vec<u64>,
    pub weights: Vec<u64>,
}

impl Page {
    /// Number of items on the page (both arrays have this length).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decode an `eth_call` result string (`0x` prefix optional).
pub fn decode_page_hex(result: &str) -> Result<Page, DecodeError> {
    let trimmed = result.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let payload = hex::decode(hex_str).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
    decode_page(&payload)
}

/// Decode a raw page payload into its values and weights.
pub fn decode_page(payload: &[u8]) -> Result<Page, DecodeError> {
    if payload.len() < HEAD_SIZE {
        return Err(DecodeError::TruncatedHead {
            len: payload.len(),
            min: HEAD_SIZE,
        });
    }

    let values = decode_u64_array(payload, 0, "values")?;
    let weights = decode_u64_array(payload, 1, "weights")?;

    if values.len() != weights.len() {
        return Err(DecodeError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }

    Ok(Page { values, weights })
}

/// Decode the dynamic array whose offset sits in head word `head_slot`.
pub fn decode_u64_array(
    payload: &[u8],
    head_slot: usize,
    array: &'static str,
) -> Result<Vec<u64>, DecodeError> {
    let truncated = DecodeError::TruncatedHead {
        len: payload.len(),
        min: head_slot
            .saturating_add(1)
            .saturating_mul(WORD_SIZE),
    };
    let head_at = head_slot.checked_mul(WORD_SIZE).ok_or(truncated.clone())?;
    let head = head_at
        .checked_add(WORD_SIZE)
        .and_then(|end| payload.get(head_at..end))
        .ok_or(truncated)?;
    let offset = word_to_usize(head).ok_or(DecodeError::WordOverflow {
        field: "offset",
        at: head_at,
        target: "usize",
    })?;

    let out_of_bounds = |count: usize| DecodeError::OutOfBounds {
        array,
        offset,
        count,
        len: payload.len(),
    };

    let count_word = offset
        .checked_add(WORD_SIZE)
        .and_then(|end| payload.get(offset..end))
        .ok_or_else(|| out_of_bounds(0))?;
    let count = word_to_usize(count_word).ok_or(DecodeError::WordOverflow {
        field: "length",
        at: offset,
        target: "usize",
    })?;

    let data_start = offset + WORD_SIZE;
    let data = count
        .checked_mul(WORD_SIZE)
        .and_then(|n| data_start.checked_add(n))
        .and_then(|end| payload.get(data_start..end))
        .ok_or_else(|| out_of_bounds(count))?;

    data.chunks_exact(WORD_SIZE)
        .enumerate()
        .map(|(i, word)| {
            word_to_u64(word).ok_or(DecodeError::WordOverflow {
                field: "element",
                at: data_start + i * WORD_SIZE,
                target: "u64",
            })
        })
        .collect()
}

/// Encode two arrays in the page layout, values block first.
pub fn encode_page(values: &[u64], weights: &[u64]) -> Vec<u8> {
    let values_offset = HEAD_SIZE;
    let weights_offset = values_offset + WORD_SIZE * (1 + values.len());

    let mut out = Vec::with_capacity(weights_offset + WORD_SIZE * (1 + weights.len()));
    out.extend_from_slice(&word_from_u64(values_offset as u64));
    out.extend_from_slice(&word_from_u64(weights_offset as u64));
    for array in [values, weights] {
        out.extend_from_slice(&word_from_u64(array.len() as u64));
        for v in array {
            out.extend_from_slice(&word_from_u64(*v));
        }
    }
    out
}
