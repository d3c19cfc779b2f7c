//! Wire constants for the varint encoding

/// High bit of every encoded byte: set when more bytes follow
pub const CONTINUATION_BIT: u8 = 0x80;

/// Low seven bits of every encoded byte carry data
pub const DATA_MASK: u8 = 0x7F;

/// Data bits per encoded byte
pub const GROUP_BITS: u32 = 7;

/// Longest encoding of a u64: ceil(64 / 7)
pub const MAX_VARINT_LEN: usize = 10;

/// Data bits the final byte of a maximal encoding may carry (64 - 9 * 7)
pub const LAST_GROUP_BITS: u32 = u64::BITS - GROUP_BITS * (MAX_VARINT_LEN as u32 - 1);
