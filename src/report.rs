//! Results of CLI commands, printable as text or JSON.

use serde::Serialize;
use std::fmt;

use crate::protocol::Result;
use crate::utils::bits::{bit_length, byte_len};
use crate::utils::format::{format_bytes, format_hex, parse_hex};
use crate::utils::value::parse_value;
use crate::utils::varint::{decode_varint_with, encode, encoded_len, groups, DecodeMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeReport {
    pub value: u64,
    pub hex: String,
    pub binary: String,
    pub len: usize,
}

impl EncodeReport {
    pub fn from_input(input: &str) -> Result<Self> {
        let value = parse_value(input)?;
        let bytes = encode(value);
        Ok(Self {
            value,
            hex: format_hex(&bytes),
            binary: format_bytes(&bytes),
            len: bytes.len(),
        })
    }
}

impl fmt::Display for EncodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.value, self.hex, self.binary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub value: u64,
    pub hex: String,
    pub binary: String,
    pub consumed: usize,
    pub trailing: usize,
}

impl DecodeReport {
    pub fn from_input(input: &str, mode: DecodeMode) -> Result<Self> {
        let bytes = parse_hex(input)?;
        let (value, consumed) = decode_varint_with(&bytes, mode)?;
        let varint = &bytes[..consumed];
        Ok(Self {
            value,
            hex: format_hex(varint),
            binary: format_bytes(varint),
            consumed,
            trailing: bytes.len() - consumed,
        })
    }
}

impl fmt::Display for DecodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.hex, self.value)?;
        if self.trailing > 0 {
            write!(f, " (ignored {} trailing byte(s))", self.trailing)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub value: u64,
    pub bit_length: u32,
    pub set_bits: u32,
    pub byte_len: usize,
    pub encoded_len: usize,
    pub groups: Vec<u8>,
    pub packed_hex: String,
    pub packed_binary: String,
    pub encoded_hex: String,
    pub encoded_binary: String,
}

impl InspectReport {
    pub fn from_input(input: &str) -> Result<Self> {
        let value = parse_value(input)?;
        // 0 packs into no bytes at all
        let be = value.to_be_bytes();
        let packed = &be[be.len() - byte_len(value)..];
        let encoded = encode(value);
        Ok(Self {
            value,
            bit_length: bit_length(value),
            set_bits: value.count_ones(),
            byte_len: byte_len(value),
            encoded_len: encoded_len(value),
            groups: groups(value),
            packed_hex: format_hex(packed),
            packed_binary: format_bytes(packed),
            encoded_hex: format_hex(&encoded),
            encoded_binary: format_bytes(&encoded),
        })
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "value:       {}", self.value)?;
        writeln!(f, "bit length:  {} ({} set)", self.bit_length, self.set_bits)?;
        if self.byte_len == 0 {
            writeln!(f, "packed:      none [0 bytes]")?;
        } else {
            writeln!(f, "packed:      {} [{} byte(s)]", self.packed_binary, self.byte_len)?;
            writeln!(f, "             {}", self.packed_hex)?;
        }
        let groups = self
            .groups
            .iter()
            .map(|g| format!("{:07b}", g))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "groups:      {}", groups)?;
        writeln!(f, "varint:      {} [{} byte(s)]", self.encoded_binary, self.encoded_len)?;
        write!(f, "             {}", self.encoded_hex)
    }
}
