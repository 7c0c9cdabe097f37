//! Blinded route payment data.
//!
//! The per-hop payload a node receives inside a blinded route: which
//! channel to forward over, the relay fee policy, and the constraints the
//! payment must satisfy. The numeric policy fields use truncated integers,
//! so these records were the first composite values whose total length
//! varies with the magnitude of the numbers inside them.

use secp256k1::PublicKey;

use crate::WireError;
use crate::features::RawFeatureVector;
use crate::record::{Record, Value};
use crate::stream::{OpaqueData, RawStream, Stream, TypeMap};
use crate::types::{
    ShortChannelId, decode_tu32, decode_tu64, encode_tu32, encode_tu64, tu32_len, tu64_len,
};

const TLV_SHORT_CHANNEL_ID: u64 = 2;
const TLV_NEXT_NODE_ID: u64 = 8;
const TLV_PAYMENT_RELAY: u64 = 10;
const TLV_PAYMENT_CONSTRAINTS: u64 = 12;
const TLV_FEATURES: u64 = 14;

/// Fee and timelock policy for relaying over the blinded hop.
///
/// Wire form: 2-byte cltv expiry delta, 4-byte fee rate, then the base fee
/// as a truncated u32 filling the rest of the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentRelayInfo {
    /// Blocks subtracted from the incoming HTLC's expiry.
    pub cltv_expiry_delta: u16,
    /// Proportional fee in parts per million.
    pub fee_rate: u32,
    /// Flat fee in millisatoshi.
    pub base_fee_msat: u32,
}

impl Value for PaymentRelayInfo {
    fn encoded_len(&self) -> u64 {
        2 + 4 + tu32_len(self.base_fee_msat)
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        out.extend_from_slice(&self.cltv_expiry_delta.to_be_bytes());
        out.extend_from_slice(&self.fee_rate.to_be_bytes());
        encode_tu32(self.base_fee_msat, out);
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() < 6 {
            return Err(WireError::Truncated {
                expected: 6,
                actual: data.len(),
            });
        }
        Ok(Self {
            cltv_expiry_delta: u16::from_be_bytes([data[0], data[1]]),
            fee_rate: u32::from_be_bytes([data[2], data[3], data[4], data[5]]),
            base_fee_msat: decode_tu32(&data[6..])?,
        })
    }
}

/// Limits a payment must satisfy to be relayed over the blinded hop.
///
/// Wire form: 4-byte max cltv expiry, then the minimum HTLC amount as a
/// truncated u64 filling the rest of the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentConstraints {
    /// Absolute block height after which the hop refuses to relay.
    pub max_cltv_expiry: u32,
    /// Smallest HTLC the hop will relay, in millisatoshi.
    pub htlc_minimum_msat: u64,
}

impl Value for PaymentConstraints {
    fn encoded_len(&self) -> u64 {
        4 + tu64_len(self.htlc_minimum_msat)
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        out.extend_from_slice(&self.max_cltv_expiry.to_be_bytes());
        encode_tu64(self.htlc_minimum_msat, out);
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() < 4 {
            return Err(WireError::Truncated {
                expected: 4,
                actual: data.len(),
            });
        }
        Ok(Self {
            max_cltv_expiry: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            htlc_minimum_msat: decode_tu64(&data[4..])?,
        })
    }
}

/// The payment data for one hop of a blinded route.
///
/// Fields map to TLV types: short channel id (2), next node id (8),
/// payment relay (10), payment constraints (12), features (14).
/// Unrecognized records, padding included, end up in `extra_opaque_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindedRouteData {
    /// The channel to forward over.
    pub short_channel_id: ShortChannelId,
    /// Identity key of the next node, when revealed to this hop.
    pub next_node_id: Option<PublicKey>,
    /// Relay fee and timelock policy.
    pub relay_info: PaymentRelayInfo,
    /// Constraints on payments through this hop.
    pub constraints: Option<PaymentConstraints>,
    /// Features of the blinded route. May be empty.
    pub features: RawFeatureVector,
    /// Records from newer protocol versions, preserved byte-exact.
    pub extra_opaque_data: OpaqueData,
}

impl BlindedRouteData {
    /// Creates payment data with the required fields and no extras.
    #[must_use]
    pub fn new(short_channel_id: ShortChannelId, relay_info: PaymentRelayInfo) -> Self {
        Self {
            short_channel_id,
            next_node_id: None,
            relay_info,
            constraints: None,
            features: RawFeatureVector::new(),
            extra_opaque_data: OpaqueData::default(),
        }
    }

    /// Encodes to wire format.
    ///
    /// # Errors
    ///
    /// Returns an error if a field value cannot be represented, or if the
    /// opaque tail collides with a known record type.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut stream = Stream::new();
        stream.push(Record::encode(TLV_SHORT_CHANNEL_ID, &self.short_channel_id)?);
        if let Some(next) = &self.next_node_id {
            stream.push(Record::encode(TLV_NEXT_NODE_ID, next)?);
        }
        stream.push(Record::encode(TLV_PAYMENT_RELAY, &self.relay_info)?);
        if let Some(constraints) = &self.constraints {
            stream.push(Record::encode(TLV_PAYMENT_CONSTRAINTS, constraints)?);
        }
        stream.push(Record::encode(TLV_FEATURES, &self.features)?);

        stream.encode_with_extra(&self.extra_opaque_data)
    }

    /// Decodes from wire format.
    ///
    /// Aborts on the first malformed field; never yields a partial message.
    ///
    /// # Errors
    ///
    /// Returns a stream error if the TLV bytes are malformed,
    /// `MissingRequiredRecord` if a required field is absent, or a field
    /// decoder's error.
    pub fn decode(data: &[u8]) -> Result<Self, WireError> {
        let mut raw = RawStream::parse(data)?;
        let mut type_map = TypeMap::new();

        let short_channel_id = raw.required(TLV_SHORT_CHANNEL_ID, &mut type_map)?;
        let next_node_id = raw.extract(TLV_NEXT_NODE_ID, &mut type_map)?;
        let relay_info = raw.required(TLV_PAYMENT_RELAY, &mut type_map)?;
        let constraints = raw.extract(TLV_PAYMENT_CONSTRAINTS, &mut type_map)?;
        let features = raw.required(TLV_FEATURES, &mut type_map)?;

        Ok(Self {
            short_channel_id,
            next_node_id,
            relay_info,
            constraints,
            features,
            extra_opaque_data: raw.into_opaque(),
        })
    }
}
