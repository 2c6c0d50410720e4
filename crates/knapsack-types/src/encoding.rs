//! Word and hex encoding utilities.
//!
//! Every quantity exchanged with the contract layer is a 256-bit unsigned
//! integer laid out as a 32-byte big-endian word. The helpers here convert
//! between those words and native integers without ever truncating: a word
//! whose significant bytes do not fit the target type yields `None`.

use anyhow::{anyhow, Result};

/// Size of one ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Size of a function selector in bytes.
pub const SELECTOR_SIZE: usize = 4;

/// One 32-byte big-endian word.
pub type Word = [u8; WORD_SIZE];

// =============================================================================
// Word Encoding
// =============================================================================

/// Encode an unsigned integer as a zero-padded big-endian word.
pub fn word_from_u128(value: u128) -> Word {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode a `u64` as a zero-padded big-endian word.
pub fn word_from_u64(value: u64) -> Word {
    word_from_u128(u128::from(value))
}

// =============================================================================
// Word Decoding
// =============================================================================

/// Decode a big-endian word into a `u64`.
///
/// Returns `None` if `bytes` is not exactly one word or if any of the upper
/// 24 bytes are non-zero.
pub fn word_to_u64(bytes: &[u8]) -> Option<u64> {
    if bytes.len() != WORD_SIZE {
        return None;
    }
    let (high, low) = bytes.split_at(WORD_SIZE - 8);
    if high.iter().any(|b| *b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    Some(u64::from_be_bytes(buf))
}

/// Decode a big-endian word into a `usize` (used for offsets and lengths).
pub fn word_to_usize(bytes: &[u8]) -> Option<usize> {
    word_to_u64(bytes).and_then(|v| usize::try_from(v).ok())
}

// =============================================================================
// Hex
// =============================================================================

/// Parse a hex string to raw bytes.
///
/// # Arguments
/// * `hex_str` - Hex string (with or without 0x prefix)
/// * `context` - Description for error messages
pub fn parse_hex_bytes(hex_str: &str, context: &str) -> Result<Vec<u8>> {
    let hex_str = strip_hex_prefix(hex_str.trim());
    hex::decode(hex_str).map_err(|e| anyhow!("Invalid {} hex '{}': {}", context, hex_str, e))
}

/// Render bytes as `0x`-prefixed lowercase hex.
pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

// =============================================================================
// Selectors & Addresses
// =============================================================================

/// Parse a 4-byte function selector such as `0xcbba959b`.
pub fn parse_selector(s: &str) -> Result<[u8; SELECTOR_SIZE]> {
    let bytes = parse_hex_bytes(s, "selector")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("Selector must be {} bytes, got {}", SELECTOR_SIZE, b.len()))
}

/// Check that `addr` is a `0x`-prefixed 20-byte hex contract address.
pub fn is_valid_address(addr: &str) -> bool {
    match addr.strip_prefix("0x").or_else(|| addr.strip_prefix("0X")) {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Normalize a contract address to lowercase with a `0x` prefix.
///
/// The caller is expected to have validated it with [`is_valid_address`].
pub fn normalize_address(addr: &str) -> String {
    format!("0x{}", strip_hex_prefix(addr.trim()).to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_from_u64_is_big_endian() {
        let word = word_from_u64(0x0102);
        assert!(word[..30].iter().all(|b| *b == 0));
        assert_eq!(word[30], 0x01);
        assert_eq!(word[31], 0x02);
    }

    #[test]
    fn test_word_from_u128_max() {
        let word = word_from_u128(u128::MAX);
        assert!(word[..16].iter().all(|b| *b == 0));
        assert!(word[16..].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn test_word_to_u64() {
        assert_eq!(word_to_u64(&word_from_u64(0)), Some(0));
        assert_eq!(word_to_u64(&word_from_u64(100)), Some(100));
        assert_eq!(word_to_u64(&word_from_u64(u64::MAX)), Some(u64::MAX));
    }

    #[test]
    fn test_word_to_u64_rejects_wide_values() {
        let mut word = [0u8; WORD_SIZE];
        word[23] = 1;
        assert_eq!(word_to_u64(&word), None);
        assert_eq!(word_to_u64(&word_from_u128(u128::from(u64::MAX) + 1)), None);
    }

    #[test]
    fn test_word_to_u64_rejects_wrong_length() {
        assert_eq!(word_to_u64(&[0u8; 31]), None);
        assert_eq!(word_to_u64(&[0u8; 33]), None);
    }

    #[test]
    fn test_parse_hex_bytes() {
        assert_eq!(parse_hex_bytes("0x0a0b", "test").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(parse_hex_bytes("0A0B", "test").unwrap(), vec![0x0a, 0x0b]);
        assert!(parse_hex_bytes("0x0", "test").is_err());
        assert!(parse_hex_bytes("0xzz", "test").is_err());
    }

    #[test]
    fn test_to_hex_prefixed() {
        assert_eq!(to_hex_prefixed(&[0xab, 0x01]), "0xab01");
        assert_eq!(to_hex_prefixed(&[]), "0x");
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(parse_selector("0xcbba959b").unwrap(), [0xcb, 0xba, 0x95, 0x9b]);
        assert!(parse_selector("0xcbba95").is_err());
        assert!(parse_selector("0xcbba959b00").is_err());
    }

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_valid_address("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_valid_address("0x5FbDB2315678afecb367f032d93F642f64180a"));
        assert!(!is_valid_address("0x5FbDB2315678afecb367f032d93F642f64180aag"));
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
    }
}
