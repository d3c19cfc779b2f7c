/// Number of significant bits in `value`; 0 for 0
pub fn bit_length(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Bytes needed to hold `value` packed 8 bits per byte; 0 needs none
pub fn byte_len(value: u64) -> usize {
    bit_length(value).div_ceil(8) as usize
}

/// Big-endian bytes of `value` without leading zero bytes, at least one byte
pub fn packed_bytes(value: u64) -> Vec<u8> {
    let len = byte_len(value).max(1);
    value.to_be_bytes()[8 - len..].to_vec()
}
