//! The TLV record abstraction.
//!
//! A record is the atomic wire unit: `bigsize(type) || bigsize(length) ||
//! value`. The stream layer treats the value as opaque bytes; only the
//! [`Value`] implementation for a field's concrete type interprets them.

use secp256k1::PublicKey;

use crate::WireError;
use crate::types::{SHORT_CHANNEL_ID_SIZE, ShortChannelId, bigsize_len, encode_bigsize};

/// Size of a compressed secp256k1 public key in bytes.
pub const PUBKEY_SIZE: usize = 33;

/// A typed TLV record value.
///
/// Implementations form a closed set: each field shape that can appear in a
/// message owns its encode/decode logic here, so a decoder can never be
/// invoked against a value it does not understand.
///
/// Static values report a constant [`encoded_len`](Value::encoded_len);
/// dynamic values compute it from their current state (an address list's
/// length is `count * stride`, an alias's its byte length, and so on).
pub trait Value: Sized {
    /// The number of bytes [`encode_value`](Value::encode_value) will write.
    fn encoded_len(&self) -> u64;

    /// Appends the encoded value bytes.
    ///
    /// # Errors
    ///
    /// Returns `ValueConstraint` if the current state cannot be represented
    /// on the wire.
    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError>;

    /// Decodes a value from exactly the declared-length slice.
    ///
    /// The whole slice belongs to this value: needing more bytes is a
    /// `Truncated` error, and leaving bytes unconsumed is a
    /// `ValueConstraint` error.
    ///
    /// # Errors
    ///
    /// Returns a `WireError` if the bytes do not form a valid value.
    fn decode_value(data: &[u8]) -> Result<Self, WireError>;
}

/// A single TLV record with its value already in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The type identifier for this record.
    pub tlv_type: u64,
    /// The encoded value bytes.
    pub value: Vec<u8>,
}

impl Record {
    /// Builds a record by encoding `value` under the given type.
    ///
    /// # Errors
    ///
    /// Propagates encoding errors from the value.
    pub fn encode<V: Value>(tlv_type: u64, value: &V) -> Result<Self, WireError> {
        let mut buf = Vec::with_capacity(value.encoded_len() as usize);
        value.encode_value(&mut buf)?;
        debug_assert_eq!(buf.len() as u64, value.encoded_len());
        Ok(Self {
            tlv_type,
            value: buf,
        })
    }

    /// Builds a record from raw value bytes, without interpreting them.
    #[must_use]
    pub fn from_raw(tlv_type: u64, value: Vec<u8>) -> Self {
        Self { tlv_type, value }
    }

    /// Writes `type || length || value` to the output buffer.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend(encode_bigsize(self.tlv_type));
        out.extend(encode_bigsize(self.value.len() as u64));
        out.extend_from_slice(&self.value);
    }

    /// Returns the full on-wire size of this record.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        bigsize_len(self.tlv_type) + bigsize_len(self.value.len() as u64) + self.value.len()
    }
}

impl Value for u32 {
    fn encoded_len(&self) -> u64 {
        4
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        out.extend_from_slice(&self.to_be_bytes());
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() < 4 {
            return Err(WireError::Truncated {
                expected: 4,
                actual: data.len(),
            });
        }
        if data.len() > 4 {
            return Err(WireError::ValueConstraint("u32 record longer than 4 bytes"));
        }
        Ok(u32::from_be_bytes([data[0], data[1], data[2], data[3]]))
    }
}

impl Value for PublicKey {
    fn encoded_len(&self) -> u64 {
        PUBKEY_SIZE as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        out.extend_from_slice(&self.serialize());
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() < PUBKEY_SIZE {
            return Err(WireError::Truncated {
                expected: PUBKEY_SIZE,
                actual: data.len(),
            });
        }
        if data.len() > PUBKEY_SIZE {
            return Err(WireError::ValueConstraint(
                "public key record longer than 33 bytes",
            ));
        }
        PublicKey::from_slice(data)
            .map_err(|_| WireError::ValueConstraint("invalid compressed public key"))
    }
}

impl Value for ShortChannelId {
    fn encoded_len(&self) -> u64 {
        SHORT_CHANNEL_ID_SIZE as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        self.encode(out)
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() > SHORT_CHANNEL_ID_SIZE {
            return Err(WireError::ValueConstraint(
                "short channel id record longer than 8 bytes",
            ));
        }
        Self::decode(data)
    }
}
