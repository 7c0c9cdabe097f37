//! Feature-bit vectors and the feature-name table.
//!
//! A feature vector is serialized as a big-endian bitfield of minimal byte
//! length: bit `i` lives in byte `len - 1 - i/8` under mask `1 << (i % 8)`,
//! and the empty set serializes to zero bytes. The name table is an
//! immutable process-wide constant; callers that want named features borrow
//! it, nothing ever mutates it.

use std::collections::BTreeSet;

use crate::WireError;
use crate::record::Value;

/// A set of raw feature bits, without name assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeatureVector {
    bits: BTreeSet<u16>,
}

impl RawFeatureVector {
    /// Creates an empty feature vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vector with the given bits set.
    #[must_use]
    pub fn from_bits(bits: impl IntoIterator<Item = u16>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Sets a feature bit.
    pub fn set(&mut self, bit: u16) {
        self.bits.insert(bit);
    }

    /// Clears a feature bit.
    pub fn unset(&mut self, bit: u16) {
        self.bits.remove(&bit);
    }

    /// Returns true if the bit is set.
    #[must_use]
    pub fn is_set(&self, bit: u16) -> bool {
        self.bits.contains(&bit)
    }

    /// Returns true if no bits are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterates over the set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.bits.iter().copied()
    }

    fn serialized_len(&self) -> usize {
        match self.bits.last() {
            Some(max) => usize::from(max / 8) + 1,
            None => 0,
        }
    }
}

impl Value for RawFeatureVector {
    fn encoded_len(&self) -> u64 {
        self.serialized_len() as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        let len = self.serialized_len();
        let start = out.len();
        out.resize(start + len, 0);
        for bit in &self.bits {
            let index = start + len - 1 - usize::from(bit / 8);
            out[index] |= 1 << (bit % 8);
        }
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        let len = data.len();
        let mut bits = BTreeSet::new();
        for (index, byte) in data.iter().enumerate() {
            for offset in 0..8u16 {
                if byte & (1 << offset) != 0 {
                    let bit = (len - 1 - index) * 8 + usize::from(offset);
                    let bit = u16::try_from(bit).map_err(|_| {
                        WireError::ValueConstraint("feature bit exceeds u16 range")
                    })?;
                    bits.insert(bit);
                }
            }
        }
        Ok(Self { bits })
    }
}

/// An immutable mapping from feature bit to human-readable name.
///
/// Constructed once (the crate ships [`FEATURES`]) and only ever read.
#[derive(Debug, Clone, Copy)]
pub struct FeatureNameTable(&'static [(u16, &'static str)]);

impl FeatureNameTable {
    /// Looks up the name for a feature bit.
    #[must_use]
    pub fn name(&self, bit: u16) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(b, _)| *b == bit)
            .map(|(_, name)| *name)
    }
}

/// The default feature-name table (BOLT 9 assignments).
pub const FEATURES: FeatureNameTable = FeatureNameTable(&[
    (0, "data-loss-protect-required"),
    (1, "data-loss-protect-optional"),
    (3, "initial-routing-sync"),
    (4, "upfront-shutdown-script-required"),
    (5, "upfront-shutdown-script-optional"),
    (6, "gossip-queries-required"),
    (7, "gossip-queries-optional"),
    (8, "tlv-onion-required"),
    (9, "tlv-onion-optional"),
    (12, "static-remote-key-required"),
    (13, "static-remote-key-optional"),
    (14, "payment-addr-required"),
    (15, "payment-addr-optional"),
    (16, "multi-path-payments-required"),
    (17, "multi-path-payments-optional"),
    (18, "wumbo-channels-required"),
    (19, "wumbo-channels-optional"),
    (22, "anchors-zero-fee-htlc-tx-required"),
    (23, "anchors-zero-fee-htlc-tx-optional"),
    (26, "shutdown-any-segwit-required"),
    (27, "shutdown-any-segwit-optional"),
    (30, "amp-required"),
    (31, "amp-optional"),
]);

/// A feature vector paired with a borrowed name table.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    raw: RawFeatureVector,
    names: FeatureNameTable,
}

impl FeatureVector {
    /// Pairs a raw vector with a name table.
    #[must_use]
    pub fn new(raw: RawFeatureVector, names: FeatureNameTable) -> Self {
        Self { raw, names }
    }

    /// The underlying raw bits.
    #[must_use]
    pub fn raw(&self) -> &RawFeatureVector {
        &self.raw
    }

    /// The name of a set bit, if the bit is set and the table knows it.
    #[must_use]
    pub fn name(&self, bit: u16) -> Option<&'static str> {
        if self.raw.is_set(bit) {
            self.names.name(bit)
        } else {
            None
        }
    }
}
