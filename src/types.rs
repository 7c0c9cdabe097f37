//! Fundamental integer codecs for the TLV wire format.
//!
//! Two encodings live here: `BigSize`, the self-delimiting variable-length
//! integer used for TLV type and length fields (BOLT 1), and truncated
//! big-endian integers, the length-delimited compact form used for numeric
//! values inside TLV records (leading zero bytes removed, length recovered
//! from the record length).

use crate::WireError;

/// Decodes a `BigSize` value from bytes.
///
/// `BigSize` is like Bitcoin's `CompactSize` but big-endian:
/// - 0x00-0xFC: 1 byte (value as-is)
/// - 0xFD + 2 bytes BE: values 0xFD-0xFFFF
/// - 0xFE + 4 bytes BE: values 0x10000-0xFFFFFFFF
/// - 0xFF + 8 bytes BE: values > 0xFFFFFFFF
///
/// Returns the decoded value and number of bytes consumed.
///
/// # Errors
///
/// Returns `BigSizeTruncated` if there aren't enough bytes, or
/// `BigSizeNotMinimal` if the encoding is not minimal.
pub fn decode_bigsize(data: &[u8]) -> Result<(u64, usize), WireError> {
    if data.is_empty() {
        return Err(WireError::BigSizeTruncated);
    }

    match data[0] {
        0..=0xfc => Ok((u64::from(data[0]), 1)),
        0xfd => {
            if data.len() < 3 {
                return Err(WireError::BigSizeTruncated);
            }
            let value = u64::from(u16::from_be_bytes([data[1], data[2]]));
            // Must be minimally encoded: value must be >= 0xfd
            if value < 0xfd {
                return Err(WireError::BigSizeNotMinimal);
            }
            Ok((value, 3))
        }
        0xfe => {
            if data.len() < 5 {
                return Err(WireError::BigSizeTruncated);
            }
            let value = u64::from(u32::from_be_bytes([data[1], data[2], data[3], data[4]]));
            // Must be minimally encoded: value must be >= 0x10000
            if value < 0x1_0000 {
                return Err(WireError::BigSizeNotMinimal);
            }
            Ok((value, 5))
        }
        0xff => {
            if data.len() < 9 {
                return Err(WireError::BigSizeTruncated);
            }
            let value = u64::from_be_bytes([
                data[1], data[2], data[3], data[4], data[5], data[6], data[7], data[8],
            ]);
            // Must be minimally encoded: value must be >= 0x100000000
            if value < 0x1_0000_0000 {
                return Err(WireError::BigSizeNotMinimal);
            }
            Ok((value, 9))
        }
    }
}

/// Encodes a value as `BigSize`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Truncation is safe: we check ranges before casting
pub fn encode_bigsize(value: u64) -> Vec<u8> {
    if value < 0xfd {
        vec![value as u8]
    } else if value < 0x1_0000 {
        let mut out = vec![0xfd];
        out.extend_from_slice(&(value as u16).to_be_bytes());
        out
    } else if value < 0x1_0000_0000 {
        let mut out = vec![0xfe];
        out.extend_from_slice(&(value as u32).to_be_bytes());
        out
    } else {
        let mut out = vec![0xff];
        out.extend_from_slice(&value.to_be_bytes());
        out
    }
}

/// Returns the encoded length of a `BigSize` value.
#[must_use]
pub const fn bigsize_len(value: u64) -> usize {
    if value < 0xfd {
        1
    } else if value < 0x1_0000 {
        3
    } else if value < 0x1_0000_0000 {
        5
    } else {
        9
    }
}

/// Returns the encoded length of a truncated u32: the minimal number of
/// big-endian bytes needed, with zero encoding as zero bytes.
#[must_use]
pub const fn tu32_len(value: u32) -> u64 {
    match value {
        0 => 0,
        1..=0xff => 1,
        0x100..=0xffff => 2,
        0x1_0000..=0xff_ffff => 3,
        _ => 4,
    }
}

/// Returns the encoded length of a truncated u64.
#[must_use]
pub const fn tu64_len(value: u64) -> u64 {
    if value <= u32::MAX as u64 {
        tu32_len(value as u32)
    } else {
        8 - (value.leading_zeros() / 8) as u64
    }
}

/// Encodes a u32 as a truncated big-endian integer: leading zero bytes
/// are removed, and zero encodes as nothing at all. The reader recovers
/// the width from the enclosing TLV record length.
pub fn encode_tu32(value: u32, out: &mut Vec<u8>) {
    let start = 4 - tu32_len(value) as usize;
    out.extend_from_slice(&value.to_be_bytes()[start..]);
}

/// Encodes a u64 as a truncated big-endian integer.
pub fn encode_tu64(value: u64, out: &mut Vec<u8>) {
    let start = 8 - tu64_len(value) as usize;
    out.extend_from_slice(&value.to_be_bytes()[start..]);
}

/// Decodes a truncated u32 from a length-delimited slice.
///
/// # Errors
///
/// Returns `ValueConstraint` if the slice is wider than 4 bytes or has a
/// superfluous leading zero byte (non-minimal encoding).
pub fn decode_tu32(data: &[u8]) -> Result<u32, WireError> {
    if data.len() > 4 {
        return Err(WireError::ValueConstraint(
            "truncated u32 wider than 4 bytes",
        ));
    }
    if !data.is_empty() && data[0] == 0 {
        return Err(WireError::ValueConstraint(
            "truncated integer has leading zero byte",
        ));
    }
    let mut buf = [0u8; 4];
    buf[4 - data.len()..].copy_from_slice(data);
    Ok(u32::from_be_bytes(buf))
}

/// Decodes a truncated u64 from a length-delimited slice.
///
/// # Errors
///
/// Returns `ValueConstraint` if the slice is wider than 8 bytes or has a
/// superfluous leading zero byte (non-minimal encoding).
pub fn decode_tu64(data: &[u8]) -> Result<u64, WireError> {
    if data.len() > 8 {
        return Err(WireError::ValueConstraint(
            "truncated u64 wider than 8 bytes",
        ));
    }
    if !data.is_empty() && data[0] == 0 {
        return Err(WireError::ValueConstraint(
            "truncated integer has leading zero byte",
        ));
    }
    let mut buf = [0u8; 8];
    buf[8 - data.len()..].copy_from_slice(data);
    Ok(u64::from_be_bytes(buf))
}

/// Size of an encoded short channel ID in bytes.
pub const SHORT_CHANNEL_ID_SIZE: usize = 8;

/// A short channel ID: the on-chain coordinates of the channel funding
/// output, packed into 8 bytes as 3-byte block height, 3-byte transaction
/// index, and 2-byte output position, all big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortChannelId {
    /// Block the funding transaction confirmed in (24-bit).
    pub block_height: u32,
    /// Index of the funding transaction within the block (24-bit).
    pub tx_index: u32,
    /// Output index of the funding output within the transaction.
    pub tx_position: u16,
}

impl ShortChannelId {
    /// Writes the 8-byte encoding.
    ///
    /// # Errors
    ///
    /// Returns `ValueConstraint` if `block_height` or `tx_index` exceed
    /// their 24-bit wire width.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        if self.block_height > 0xff_ffff {
            return Err(WireError::ValueConstraint("block height exceeds 24 bits"));
        }
        if self.tx_index > 0xff_ffff {
            return Err(WireError::ValueConstraint("tx index exceeds 24 bits"));
        }
        out.extend_from_slice(&self.block_height.to_be_bytes()[1..]);
        out.extend_from_slice(&self.tx_index.to_be_bytes()[1..]);
        out.extend_from_slice(&self.tx_position.to_be_bytes());
        Ok(())
    }

    /// Reads the 8-byte encoding.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if there are fewer than 8 bytes.
    pub fn decode(data: &[u8]) -> Result<Self, WireError> {
        if data.len() < SHORT_CHANNEL_ID_SIZE {
            return Err(WireError::Truncated {
                expected: SHORT_CHANNEL_ID_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self {
            block_height: u32::from_be_bytes([0, data[0], data[1], data[2]]),
            tx_index: u32::from_be_bytes([0, data[3], data[4], data[5]]),
            tx_position: u16::from_be_bytes([data[6], data[7]]),
        })
    }
}
