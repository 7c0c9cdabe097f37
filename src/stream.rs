//! TLV stream encoding, parsing, and record extraction.
//!
//! A stream is the concatenation of records in strictly ascending type
//! order. The encode path collects [`Record`]s into a [`Stream`]; the
//! decode path parses bytes into a [`RawStream`] of `(type, value bytes)`
//! pairs, then extracts the records the caller understands. Whatever is
//! left over is kept byte-exact as [`OpaqueData`], so a re-encoded message
//! still matches the signature computed by a newer node over fields we
//! cannot interpret.

use std::collections::BTreeSet;

use crate::WireError;
use crate::record::{Record, Value};
use crate::types::{decode_bigsize, encode_bigsize};

/// An ordered collection of records being assembled for encoding.
///
/// Composite message encoders are responsible for pushing records in
/// ascending type order; violating that is a programming error, not a
/// runtime condition, so [`push`](Stream::push) panics on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stream {
    records: Vec<Record>,
}

impl Stream {
    /// Creates an empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record.
    ///
    /// # Panics
    ///
    /// Panics if the record's type is not strictly greater than the last
    /// pushed type.
    pub fn push(&mut self, record: Record) {
        if let Some(last) = self.records.last() {
            assert!(
                record.tlv_type > last.tlv_type,
                "TLV record type {} pushed after type {}",
                record.tlv_type,
                last.tlv_type
            );
        }
        self.records.push(record);
    }

    /// Returns true if the stream contains no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Encodes the stream to bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.records.iter().map(Record::encoded_len).sum());
        for record in &self.records {
            record.write(&mut out);
        }
        out
    }

    /// Encodes the stream merged with an opaque tail of unknown records,
    /// interleaving the two ascending sequences by type.
    ///
    /// This is the re-encoding half of the round-trip law: known fields go
    /// back in beside the unknown records at their original (type-sorted)
    /// positions, reproducing the original bytes exactly.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateType` if a known record's type also appears in the
    /// opaque tail, or a parse error if the tail bytes are malformed.
    pub fn encode_with_extra(&self, extra: &OpaqueData) -> Result<Vec<u8>, WireError> {
        if extra.is_empty() {
            return Ok(self.encode());
        }

        let tail = RawStream::parse(extra.as_bytes())?;
        let mut out = Vec::new();
        let (mut k, mut u) = (0, 0);

        while k < self.records.len() && u < tail.records.len() {
            let known = &self.records[k];
            let unknown = &tail.records[u];
            if known.tlv_type == unknown.tlv_type {
                return Err(WireError::DuplicateType(known.tlv_type));
            }
            if known.tlv_type < unknown.tlv_type {
                known.write(&mut out);
                k += 1;
            } else {
                unknown.write(&mut out);
                u += 1;
            }
        }
        for record in &self.records[k..] {
            record.write(&mut out);
        }
        for record in &tail.records[u..] {
            record.write(&mut out);
        }

        Ok(out)
    }
}

/// A single parsed-but-uninterpreted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// The type identifier for this record.
    pub tlv_type: u64,
    /// The raw value bytes.
    pub value: Vec<u8>,
}

impl RawRecord {
    fn write(&self, out: &mut Vec<u8>) {
        out.extend(encode_bigsize(self.tlv_type));
        out.extend(encode_bigsize(self.value.len() as u64));
        out.extend_from_slice(&self.value);
    }
}

/// The set of types an extraction pass found and successfully decoded.
///
/// Composite decoders consult this, not the decoded values, to establish
/// optional-field presence: zero-length encodings (the Boolean record, an
/// empty feature vector) make absence and default indistinguishable by
/// value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    types: BTreeSet<u64>,
}

impl TypeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a type was decoded.
    pub fn insert(&mut self, tlv_type: u64) {
        self.types.insert(tlv_type);
    }

    /// Returns true if the type was decoded.
    #[must_use]
    pub fn contains(&self, tlv_type: u64) -> bool {
        self.types.contains(&tlv_type)
    }

    /// Number of decoded types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A parsed TLV stream whose records have not yet been interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStream {
    records: Vec<RawRecord>,
}

impl RawStream {
    /// Parses a byte buffer into raw records.
    ///
    /// The buffer must be exhausted exactly: each record's declared length
    /// is checked against the remaining bytes before any slicing, so an
    /// adversarial length prefix fails fast instead of allocating.
    ///
    /// # Errors
    ///
    /// Returns `LengthOverflow` if a declared length exceeds the remaining
    /// buffer, `OutOfOrderType`/`DuplicateType` if the ascending-type
    /// invariant is violated, or a bigsize error on a malformed type or
    /// length field.
    pub fn parse(data: &[u8]) -> Result<Self, WireError> {
        let mut records = Vec::new();
        let mut pos = 0;
        let mut last_type: Option<u64> = None;

        while pos < data.len() {
            let (tlv_type, type_len) = decode_bigsize(&data[pos..])?;
            pos += type_len;

            if let Some(previous) = last_type {
                if tlv_type == previous {
                    return Err(WireError::DuplicateType(tlv_type));
                }
                if tlv_type < previous {
                    return Err(WireError::OutOfOrderType {
                        previous,
                        current: tlv_type,
                    });
                }
            }
            last_type = Some(tlv_type);

            let (length, length_len) = decode_bigsize(&data[pos..])?;
            pos += length_len;

            // Bound the length before touching the value bytes
            let length = usize::try_from(length).map_err(|_| WireError::LengthOverflow)?;
            if length > data.len() - pos {
                return Err(WireError::LengthOverflow);
            }

            records.push(RawRecord {
                tlv_type,
                value: data[pos..pos + length].to_vec(),
            });
            pos += length;
        }

        Ok(Self { records })
    }

    /// Decodes and removes the record of the given type, if present,
    /// recording it in the type map.
    ///
    /// Records of other types are left untouched and in order; after all
    /// known types have been extracted they form the opaque tail.
    ///
    /// # Errors
    ///
    /// Propagates the value decoder's error. Absence is not an error.
    pub fn extract<V: Value>(
        &mut self,
        tlv_type: u64,
        type_map: &mut TypeMap,
    ) -> Result<Option<V>, WireError> {
        let Some(pos) = self.records.iter().position(|r| r.tlv_type == tlv_type) else {
            return Ok(None);
        };
        let record = self.records.remove(pos);
        let value = V::decode_value(&record.value)?;
        type_map.insert(tlv_type);
        Ok(Some(value))
    }

    /// Like [`extract`](RawStream::extract), but the record must be present.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredRecord` if the type is absent, or the value
    /// decoder's error.
    pub fn required<V: Value>(
        &mut self,
        tlv_type: u64,
        type_map: &mut TypeMap,
    ) -> Result<V, WireError> {
        self.extract(tlv_type, type_map)?
            .ok_or(WireError::MissingRequiredRecord(tlv_type))
    }

    /// Gets a record's raw value by type.
    #[must_use]
    pub fn get(&self, tlv_type: u64) -> Option<&[u8]> {
        self.records
            .iter()
            .find(|r| r.tlv_type == tlv_type)
            .map(|r| r.value.as_slice())
    }

    /// Returns true if no records remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-serializes the remaining records, byte-exact, as the opaque tail.
    ///
    /// Parsing accepts only canonically encoded type and length fields, so
    /// re-encoding here reproduces the records' original bytes.
    #[must_use]
    pub fn into_opaque(self) -> OpaqueData {
        let mut out = Vec::new();
        for record in &self.records {
            record.write(&mut out);
        }
        OpaqueData::new(out)
    }
}

/// The raw bytes of records a decoder did not recognize, preserved in
/// original order and encoding.
///
/// Owned by the message that parsed them; carried through to re-encoding
/// so that signatures over the full original byte range stay valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpaqueData(Vec<u8>);

impl OpaqueData {
    /// Wraps already-encoded record bytes.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The encoded record bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if there is no unrecognized data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
