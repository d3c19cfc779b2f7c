use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::protocol::{
    Malformed, Result, CONTINUATION_BIT, DATA_MASK, GROUP_BITS, LAST_GROUP_BITS, MAX_VARINT_LEN,
};
use crate::utils::bits::bit_length;

/// How `decode_with` treats bytes after the terminating byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Decode the leading varint and ignore whatever follows
    #[default]
    Prefix,
    /// The input must be exactly one varint
    Strict,
}

/// Encode u64 into varint (LEB128-style), appending to `out`
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= u64::from(CONTINUATION_BIT) {
        out.push((value as u8) | CONTINUATION_BIT);
        value >>= GROUP_BITS;
    }
    out.push(value as u8);
}

/// Encode u64 into a freshly allocated minimal varint
pub fn encode(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    encode_varint(value, &mut out);
    out
}

/// Number of bytes `encode` produces for `value`
pub fn encoded_len(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    bit_length(value).div_ceil(GROUP_BITS) as usize
}

/// The 7-bit data groups of `value`, least significant first
pub fn groups(value: u64) -> Vec<u8> {
    encode(value).into_iter().map(|byte| byte & DATA_MASK).collect()
}

/// Decode the varint at the start of `buf`.
///
/// Returns the value together with the number of bytes it occupied. Bytes
/// after the terminating byte are left alone.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize)> {
    if buf.is_empty() {
        debug!("Rejecting empty varint input");
        return Err(Malformed::Empty.into());
    }

    let mut result = 0u64;

    for (i, &byte) in buf.iter().enumerate() {
        let data = byte & DATA_MASK;

        if i >= MAX_VARINT_LEN || (i == MAX_VARINT_LEN - 1 && data >> LAST_GROUP_BITS != 0) {
            debug!("Varint overflows 64 bits at byte {}: {:02x?}", i, buf);
            return Err(Malformed::Overflow.into());
        }

        result |= u64::from(data) << (GROUP_BITS * i as u32);

        if byte & CONTINUATION_BIT == 0 {
            return Ok((result, i + 1));
        }
    }

    debug!("Unterminated varint: {:02x?}", buf);
    Err(Malformed::Unterminated { len: buf.len() }.into())
}

/// Decode the varint at the start of `buf`, ignoring trailing bytes
pub fn decode(buf: &[u8]) -> Result<u64> {
    decode_varint(buf).map(|(value, _)| value)
}

/// Decode the varint at the start of `buf` under `mode`, returning the
/// value and the number of bytes it occupied
pub fn decode_varint_with(buf: &[u8], mode: DecodeMode) -> Result<(u64, usize)> {
    let (value, consumed) = decode_varint(buf)?;

    if mode == DecodeMode::Strict && consumed < buf.len() {
        debug!("Strict decode saw {} trailing bytes", buf.len() - consumed);
        return Err(Malformed::TrailingBytes {
            consumed,
            len: buf.len(),
        }
        .into());
    }

    Ok((value, consumed))
}

/// Decode the varint at the start of `buf` under `mode`
pub fn decode_with(buf: &[u8], mode: DecodeMode) -> Result<u64> {
    decode_varint_with(buf, mode).map(|(value, _)| value)
}
