//! Protobuf-style variable-length integer codec.
//!
//! Each encoded byte carries seven data bits, least significant group first,
//! with the high bit set on every byte except the last.
//!
//! ```
//! use protovarint::{decode, encode};
//!
//! assert_eq!(encode(150), vec![0x96, 0x01]);
//! assert_eq!(decode(&[0x96, 0x01]), Ok(150));
//! ```

pub mod cli;
pub mod config;
pub mod protocol;
pub mod report;
pub mod utils;

pub use protocol::{Malformed, Result, VarintError};
pub use utils::varint::{
    decode, decode_varint, decode_varint_with, decode_with, encode, encode_varint, encoded_len, DecodeMode,
};
