//! Presentation helpers for values and byte sequences.

use crate::protocol::{Result, VarintError};
use crate::utils::bits::packed_bytes;

/// Formats each byte as eight binary digits, separated by spaces.
///
/// ```
/// use protovarint::utils::format::format_bytes;
///
/// assert_eq!(format_bytes(&[0x96, 0x01]), "10010110 00000001");
/// ```
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:08b}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the big-endian packed bytes of `value` in binary.
///
/// ```
/// use protovarint::utils::format::format_value;
///
/// assert_eq!(format_value(150), "10010110");
/// assert_eq!(format_value(0), "00000000");
/// ```
pub fn format_value(value: u64) -> String {
    format_bytes(&packed_bytes(value))
}

/// Formats bytes as spaced lowercase hex, e.g. `96 01`.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a hex byte string such as `9601`, `96 01`, `96:01` or `0x9601`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();

    hex::decode(&digits)
        .map_err(|e| VarintError::InvalidInput(format!("bad hex {:?}: {}", trimmed, e)))
}
