pub mod bits;
pub mod format;
pub mod io;
pub mod value;
pub mod varint;

pub use varint::{decode, decode_varint, decode_varint_with, decode_with, encode, encode_varint, encoded_len, DecodeMode};
