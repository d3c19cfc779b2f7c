use std::num::IntErrorKind;

use crate::protocol::{Result, VarintError};

/// Parse a textual unsigned integer into the codec domain.
///
/// Accepts decimal, `0x` hex and `0b` binary, with optional `_` separators.
/// Negative and out-of-range values are rejected.
pub fn parse_value(input: &str) -> Result<u64> {
    let trimmed = input.trim();

    if trimmed.starts_with('-') {
        return Err(VarintError::InvalidInput(format!(
            "negative value {:?}",
            trimmed
        )));
    }

    let cleaned = trimmed.replace('_', "");
    let (digits, radix) = if let Some(rest) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
    {
        (rest, 2)
    } else {
        (cleaned.as_str(), 10)
    };

    if digits.is_empty() {
        return Err(VarintError::InvalidInput(format!("empty value {:?}", trimmed)));
    }

    u64::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => VarintError::InvalidInput(format!(
            "value {:?} out of range (max {})",
            trimmed,
            u64::MAX
        )),
        _ => VarintError::InvalidInput(format!("{:?} is not an unsigned integer", trimmed)),
    })
}
