//! The one-bit Boolean record.
//!
//! Presence semantics carry most of the information: a Boolean record that
//! is absent from the stream means false, present with zero length means
//! true, and present with a single byte carries the value explicitly. The
//! encoder therefore writes nothing for true and one explicit `0x00` byte
//! for false, so that a field which is meant to be emitted is never simply
//! dropped.

use crate::WireError;
use crate::record::Value;

/// A boolean wrapped for use as a TLV record value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boolean(pub bool);

impl Value for Boolean {
    fn encoded_len(&self) -> u64 {
        if self.0 { 0 } else { 1 }
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        if !self.0 {
            out.push(0);
        }
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        match data {
            [] => Ok(Self(true)),
            [0] => Ok(Self(false)),
            [1] => Ok(Self(true)),
            [_] => Err(WireError::ValueConstraint("boolean byte is not 0 or 1")),
            _ => Err(WireError::ValueConstraint(
                "boolean record longer than 1 byte",
            )),
        }
    }
}
