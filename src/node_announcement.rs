//! The node announcement message and its field codecs.
//!
//! A node announcement advertises a node's presence: a 64-byte Schnorr
//! signature over the rest of the message, followed by a TLV stream of
//! features, appearance (color, alias), block height, identity key, and
//! reachable addresses. Everything the decoder does not recognize is kept
//! verbatim so the signature still verifies after a round trip.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

use secp256k1::PublicKey;

use crate::WireError;
use crate::features::RawFeatureVector;
use crate::record::{Record, Value};
use crate::stream::{OpaqueData, RawStream, Stream, TypeMap};

/// Size of a Schnorr signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Bytes per encoded IPv4 address: 4-byte address plus 2-byte port.
pub const IPV4_ADDR_SIZE: usize = 4 + 2;

/// Bytes per encoded IPv6 address: 16-byte address plus 2-byte port.
pub const IPV6_ADDR_SIZE: usize = 16 + 2;

/// Decoded length of a Tor v3 onion host: 32-byte ed25519 public key,
/// 2-byte checksum, and a version byte.
pub const TOR_V3_HOST_LEN: usize = 35;

/// Bytes per encoded Tor v3 address: decoded host plus 2-byte port.
pub const TOR_V3_ADDR_SIZE: usize = TOR_V3_HOST_LEN + 2;

/// Maximum alias length in bytes.
pub const MAX_ALIAS_LEN: usize = 32;

const TLV_FEATURES: u64 = 0;
const TLV_RGB_COLOR: u64 = 1;
const TLV_BLOCK_HEIGHT: u64 = 2;
const TLV_IPV4_ADDRS: u64 = 3;
const TLV_ALIAS: u64 = 4;
const TLV_IPV6_ADDRS: u64 = 5;
const TLV_NODE_ID: u64 = 6;
const TLV_TOR_V3_ADDRS: u64 = 7;

/// A raw 64-byte Schnorr signature.
///
/// Carried opaquely: this codec moves signature bytes, verification
/// happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_SIZE]);

impl Default for Signature {
    fn default() -> Self {
        Self([0; SIGNATURE_SIZE])
    }
}

impl Signature {
    /// Decodes a signature from bytes, advancing the slice.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if there are fewer than 64 bytes.
    pub fn decode(data: &mut &[u8]) -> Result<Self, WireError> {
        if data.len() < SIGNATURE_SIZE {
            return Err(WireError::Truncated {
                expected: SIGNATURE_SIZE,
                actual: data.len(),
            });
        }
        #[allow(clippy::missing_panics_doc)] // Size check above
        let bytes: [u8; SIGNATURE_SIZE] = data[..SIGNATURE_SIZE].try_into().unwrap();
        *data = &data[SIGNATURE_SIZE..];
        Ok(Self(bytes))
    }

    /// Encodes the signature to a vector.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }
}

/// A node's display color, a static 3-byte record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Value for RgbColor {
    fn encoded_len(&self) -> u64 {
        3
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        out.extend_from_slice(&[self.red, self.green, self.blue]);
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        match *data {
            [red, green, blue] => Ok(Self { red, green, blue }),
            _ if data.len() < 3 => Err(WireError::Truncated {
                expected: 3,
                actual: data.len(),
            }),
            _ => Err(WireError::ValueConstraint(
                "rgb color record longer than 3 bytes",
            )),
        }
    }
}

/// A node alias: UTF-8 text of at most 32 bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAlias(String);

impl NodeAlias {
    /// Creates an alias, validating the length bound.
    ///
    /// # Errors
    ///
    /// Returns `ValueConstraint` if the text exceeds 32 bytes.
    pub fn new(alias: impl Into<String>) -> Result<Self, WireError> {
        let alias = alias.into();
        if alias.len() > MAX_ALIAS_LEN {
            return Err(WireError::ValueConstraint("node alias longer than 32 bytes"));
        }
        Ok(Self(alias))
    }

    /// The alias text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Value for NodeAlias {
    fn encoded_len(&self) -> u64 {
        self.0.len() as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        // The length bound is a construction invariant of NodeAlias
        out.extend_from_slice(self.0.as_bytes());
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() > MAX_ALIAS_LEN {
            return Err(WireError::ValueConstraint("node alias longer than 32 bytes"));
        }
        let alias = std::str::from_utf8(data)
            .map_err(|_| WireError::ValueConstraint("node alias is not valid utf-8"))?;
        Ok(Self(alias.to_owned()))
    }
}

/// A list of IPv4 socket addresses, encoded at a fixed 6-byte stride.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ipv4Addrs(pub Vec<SocketAddrV4>);

impl Value for Ipv4Addrs {
    fn encoded_len(&self) -> u64 {
        (self.0.len() * IPV4_ADDR_SIZE) as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        for addr in &self.0 {
            out.extend_from_slice(&addr.ip().octets());
            out.extend_from_slice(&addr.port().to_be_bytes());
        }
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() % IPV4_ADDR_SIZE != 0 {
            return Err(WireError::ValueConstraint(
                "ipv4 address list length not a multiple of 6",
            ));
        }
        let addrs = data
            .chunks_exact(IPV4_ADDR_SIZE)
            .map(|chunk| {
                let ip = Ipv4Addr::new(chunk[0], chunk[1], chunk[2], chunk[3]);
                let port = u16::from_be_bytes([chunk[4], chunk[5]]);
                SocketAddrV4::new(ip, port)
            })
            .collect();
        Ok(Self(addrs))
    }
}

/// A list of IPv6 socket addresses, encoded at a fixed 18-byte stride.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ipv6Addrs(pub Vec<SocketAddrV6>);

impl Value for Ipv6Addrs {
    fn encoded_len(&self) -> u64 {
        (self.0.len() * IPV6_ADDR_SIZE) as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        for addr in &self.0 {
            out.extend_from_slice(&addr.ip().octets());
            out.extend_from_slice(&addr.port().to_be_bytes());
        }
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() % IPV6_ADDR_SIZE != 0 {
            return Err(WireError::ValueConstraint(
                "ipv6 address list length not a multiple of 18",
            ));
        }
        let addrs = data
            .chunks_exact(IPV6_ADDR_SIZE)
            .map(|chunk| {
                #[allow(clippy::missing_panics_doc)] // chunks_exact yields 18 bytes
                let octets: [u8; 16] = chunk[..16].try_into().unwrap();
                let port = u16::from_be_bytes([chunk[16], chunk[17]]);
                SocketAddrV6::new(Ipv6Addr::from(octets), port, 0, 0)
            })
            .collect();
        Ok(Self(addrs))
    }
}

/// A Tor v3 onion address: the decoded onion host plus a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TorV3Addr {
    /// The base32-decoded onion host bytes.
    pub host: [u8; TOR_V3_HOST_LEN],
    /// TCP port.
    pub port: u16,
}

/// A list of Tor v3 addresses, encoded at a fixed 37-byte stride.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorV3Addrs(pub Vec<TorV3Addr>);

impl Value for TorV3Addrs {
    fn encoded_len(&self) -> u64 {
        (self.0.len() * TOR_V3_ADDR_SIZE) as u64
    }

    fn encode_value(&self, out: &mut Vec<u8>) -> Result<(), WireError> {
        for addr in &self.0 {
            out.extend_from_slice(&addr.host);
            out.extend_from_slice(&addr.port.to_be_bytes());
        }
        Ok(())
    }

    fn decode_value(data: &[u8]) -> Result<Self, WireError> {
        if data.len() % TOR_V3_ADDR_SIZE != 0 {
            return Err(WireError::ValueConstraint(
                "tor v3 address list length not a multiple of 37",
            ));
        }
        let addrs = data
            .chunks_exact(TOR_V3_ADDR_SIZE)
            .map(|chunk| {
                #[allow(clippy::missing_panics_doc)] // chunks_exact yields 37 bytes
                let host: [u8; TOR_V3_HOST_LEN] = chunk[..TOR_V3_HOST_LEN].try_into().unwrap();
                let port = u16::from_be_bytes([chunk[TOR_V3_HOST_LEN], chunk[TOR_V3_HOST_LEN + 1]]);
                TorV3Addr { host, port }
            })
            .collect();
        Ok(Self(addrs))
    }
}

/// A node announcement message.
///
/// Fields map to TLV types: features (0), rgb color (1), block height (2),
/// IPv4 addresses (3), alias (4), IPv6 addresses (5), node id (6), Tor v3
/// addresses (7). Unrecognized records end up in `extra_opaque_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAnnouncement {
    /// Signature over the announcement by the node key.
    pub signature: Signature,
    /// Protocol features this node supports. May be empty.
    pub features: RawFeatureVector,
    /// Display color for maps and graphs.
    pub rgb_color: Option<RgbColor>,
    /// Block height, for ordering competing announcements.
    pub block_height: u32,
    /// Reachable IPv4 addresses.
    pub ipv4_addrs: Option<Ipv4Addrs>,
    /// Human-readable alias.
    pub alias: Option<NodeAlias>,
    /// Reachable IPv6 addresses.
    pub ipv6_addrs: Option<Ipv6Addrs>,
    /// The announced node's identity key.
    pub node_id: PublicKey,
    /// Reachable Tor v3 addresses.
    pub tor_v3_addrs: Option<TorV3Addrs>,
    /// Records from newer protocol versions, preserved byte-exact.
    pub extra_opaque_data: OpaqueData,
}

impl NodeAnnouncement {
    /// Creates an announcement with only the required fields set.
    #[must_use]
    pub fn new(signature: Signature, node_id: PublicKey, block_height: u32) -> Self {
        Self {
            signature,
            features: RawFeatureVector::new(),
            rgb_color: None,
            block_height,
            ipv4_addrs: None,
            alias: None,
            ipv6_addrs: None,
            node_id,
            tor_v3_addrs: None,
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
        let mut out = Vec::new();
        self.signature.encode(&mut out);

        let mut stream = Stream::new();
        stream.push(Record::encode(TLV_FEATURES, &self.features)?);
        if let Some(rgb) = &self.rgb_color {
            stream.push(Record::encode(TLV_RGB_COLOR, rgb)?);
        }
        stream.push(Record::encode(TLV_BLOCK_HEIGHT, &self.block_height)?);
        if let Some(ipv4) = &self.ipv4_addrs {
            stream.push(Record::encode(TLV_IPV4_ADDRS, ipv4)?);
        }
        if let Some(alias) = &self.alias {
            stream.push(Record::encode(TLV_ALIAS, alias)?);
        }
        if let Some(ipv6) = &self.ipv6_addrs {
            stream.push(Record::encode(TLV_IPV6_ADDRS, ipv6)?);
        }
        stream.push(Record::encode(TLV_NODE_ID, &self.node_id)?);
        if let Some(tor) = &self.tor_v3_addrs {
            stream.push(Record::encode(TLV_TOR_V3_ADDRS, tor)?);
        }

        out.extend(stream.encode_with_extra(&self.extra_opaque_data)?);
        Ok(out)
    }

    /// Decodes from wire format.
    ///
    /// Aborts on the first malformed field; never yields a partial message.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if the signature is short, a stream error if the
    /// TLV bytes are malformed, `MissingRequiredRecord` if a required field
    /// is absent, or a field decoder's error.
    pub fn decode(data: &[u8]) -> Result<Self, WireError> {
        let mut cursor = data;
        let signature = Signature::decode(&mut cursor)?;

        let mut raw = RawStream::parse(cursor)?;
        let mut type_map = TypeMap::new();

        let features = raw.required(TLV_FEATURES, &mut type_map)?;
        let rgb_color = raw.extract(TLV_RGB_COLOR, &mut type_map)?;
        let block_height = raw.required(TLV_BLOCK_HEIGHT, &mut type_map)?;
        let ipv4_addrs = raw.extract(TLV_IPV4_ADDRS, &mut type_map)?;
        let alias = raw.extract(TLV_ALIAS, &mut type_map)?;
        let ipv6_addrs = raw.extract(TLV_IPV6_ADDRS, &mut type_map)?;
        let node_id = raw.required(TLV_NODE_ID, &mut type_map)?;
        let tor_v3_addrs = raw.extract(TLV_TOR_V3_ADDRS, &mut type_map)?;

        Ok(Self {
            signature,
            features,
            rgb_color,
            block_height,
            ipv4_addrs,
            alias,
            ipv6_addrs,
            node_id,
            tor_v3_addrs,
            extra_opaque_data: raw.into_opaque(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY_HEX: &str = "02eec7245d6b7d2ccb30380bfbe2a3648cd7a942653f5aa340edcea1f283686619";

    fn node_key() -> PublicKey {
        let bytes = hex::decode(PUBKEY_HEX).unwrap();
        PublicKey::from_slice(&bytes).unwrap()
    }

    fn announcement() -> NodeAnnouncement {
        NodeAnnouncement::new(Signature([0x42; SIGNATURE_SIZE]), node_key(), 800_000)
    }

    // ===== Field codecs =====

    #[test]
    fn rgb_roundtrip() {
        let color = RgbColor {
            red: 0x12,
            green: 0x34,
            blue: 0x56,
        };
        let mut out = Vec::new();
        color.encode_value(&mut out).unwrap();
        assert_eq!(out, [0x12, 0x34, 0x56]);
        assert_eq!(RgbColor::decode_value(&out), Ok(color));
    }

    #[test]
    fn rgb_wrong_length() {
        assert_eq!(
            RgbColor::decode_value(&[0x12, 0x34]),
            Err(WireError::Truncated {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            RgbColor::decode_value(&[0x12, 0x34, 0x56, 0x78]),
            Err(WireError::ValueConstraint(
                "rgb color record longer than 3 bytes"
            ))
        );
    }

    #[test]
    fn alias_roundtrip() {
        let alias = NodeAlias::new("satoshi").unwrap();
        let mut out = Vec::new();
        alias.encode_value(&mut out).unwrap();
        assert_eq!(out, b"satoshi");
        assert_eq!(NodeAlias::decode_value(&out), Ok(alias));
    }

    #[test]
    fn alias_at_limit() {
        let text = "a".repeat(MAX_ALIAS_LEN);
        let alias = NodeAlias::new(text.clone()).unwrap();
        assert_eq!(alias.encoded_len(), MAX_ALIAS_LEN as u64);
        assert_eq!(alias.as_str(), text);
    }

    #[test]
    fn alias_too_long() {
        assert_eq!(
            NodeAlias::new("a".repeat(MAX_ALIAS_LEN + 1)),
            Err(WireError::ValueConstraint("node alias longer than 32 bytes"))
        );
        assert_eq!(
            NodeAlias::decode_value(&[b'a'; MAX_ALIAS_LEN + 1]),
            Err(WireError::ValueConstraint("node alias longer than 32 bytes"))
        );
    }

    #[test]
    fn alias_invalid_utf8() {
        assert_eq!(
            NodeAlias::decode_value(&[0xff, 0xfe]),
            Err(WireError::ValueConstraint("node alias is not valid utf-8"))
        );
    }

    #[test]
    fn ipv4_list_encodes_every_entry() {
        let addrs = Ipv4Addrs(vec![
            SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 9735),
            SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 2), 19735),
        ]);
        let mut out = Vec::new();
        addrs.encode_value(&mut out).unwrap();
        assert_eq!(out.len(), 2 * IPV4_ADDR_SIZE);
        assert_eq!(
            out,
            [
                10, 0, 0, 1, 0x26, 0x07, // 9735 = 0x2607
                192, 168, 1, 2, 0x4d, 0x17, // 19735 = 0x4d17
            ]
        );
        assert_eq!(Ipv4Addrs::decode_value(&out), Ok(addrs));
    }

    #[test]
    fn ipv4_list_bad_stride() {
        assert_eq!(
            Ipv4Addrs::decode_value(&[0x00; 7]),
            Err(WireError::ValueConstraint(
                "ipv4 address list length not a multiple of 6"
            ))
        );
    }

    #[test]
    fn ipv6_list_roundtrip() {
        let addrs = Ipv6Addrs(vec![
            SocketAddrV6::new(Ipv6Addr::LOCALHOST, 9735, 0, 0),
            SocketAddrV6::new(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1), 80, 0, 0),
        ]);
        let mut out = Vec::new();
        addrs.encode_value(&mut out).unwrap();
        assert_eq!(out.len(), 2 * IPV6_ADDR_SIZE);
        assert_eq!(Ipv6Addrs::decode_value(&out), Ok(addrs));
    }

    #[test]
    fn ipv6_list_bad_stride() {
        assert_eq!(
            Ipv6Addrs::decode_value(&[0x00; 19]),
            Err(WireError::ValueConstraint(
                "ipv6 address list length not a multiple of 18"
            ))
        );
    }

    #[test]
    fn tor_v3_list_roundtrip() {
        let addrs = TorV3Addrs(vec![
            TorV3Addr {
                host: [0xab; TOR_V3_HOST_LEN],
                port: 9735,
            },
            TorV3Addr {
                host: [0xcd; TOR_V3_HOST_LEN],
                port: 443,
            },
        ]);
        let mut out = Vec::new();
        addrs.encode_value(&mut out).unwrap();
        assert_eq!(out.len(), 2 * TOR_V3_ADDR_SIZE);
        assert_eq!(TorV3Addrs::decode_value(&out), Ok(addrs));
    }

    #[test]
    fn tor_v3_list_bad_stride() {
        assert_eq!(
            TorV3Addrs::decode_value(&[0x00; TOR_V3_ADDR_SIZE + 1]),
            Err(WireError::ValueConstraint(
                "tor v3 address list length not a multiple of 37"
            ))
        );
    }

    #[test]
    fn signature_roundtrip() {
        let sig = Signature([0x5a; SIGNATURE_SIZE]);
        let mut buf = Vec::new();
        sig.encode(&mut buf);
        assert_eq!(buf.len(), SIGNATURE_SIZE);

        let mut cursor: &[u8] = &buf;
        assert_eq!(Signature::decode(&mut cursor), Ok(sig));
        assert!(cursor.is_empty());
    }

    #[test]
    fn signature_truncated() {
        let mut short: &[u8] = &[0x00; 40];
        assert_eq!(
            Signature::decode(&mut short),
            Err(WireError::Truncated {
                expected: SIGNATURE_SIZE,
                actual: 40
            })
        );
    }

    // ===== The composite message =====

    #[test]
    fn minimal_roundtrip() {
        let ann = announcement();
        let encoded = ann.encode().unwrap();
        // sig(64) + features(0,len 0 => 2) + height(2,len 4 => 6) + node_id(6,len 33 => 35)
        assert_eq!(encoded.len(), 64 + 2 + 6 + 35);
        assert_eq!(NodeAnnouncement::decode(&encoded), Ok(ann));
    }

    #[test]
    fn full_roundtrip() {
        let mut ann = announcement();
        ann.features = RawFeatureVector::from_bits([13, 15]);
        ann.rgb_color = Some(RgbColor {
            red: 0xff,
            green: 0x00,
            blue: 0x99,
        });
        ann.ipv4_addrs = Some(Ipv4Addrs(vec![SocketAddrV4::new(
            Ipv4Addr::new(1, 2, 3, 4),
            9735,
        )]));
        ann.alias = Some(NodeAlias::new("carol").unwrap());
        ann.ipv6_addrs = Some(Ipv6Addrs(vec![SocketAddrV6::new(
            Ipv6Addr::LOCALHOST,
            9735,
            0,
            0,
        )]));
        ann.tor_v3_addrs = Some(TorV3Addrs(vec![TorV3Addr {
            host: [0x11; TOR_V3_HOST_LEN],
            port: 9735,
        }]));

        let encoded = ann.encode().unwrap();
        assert_eq!(NodeAnnouncement::decode(&encoded), Ok(ann));
    }

    #[test]
    fn optional_fields_absent_on_wire() {
        let encoded = announcement().encode().unwrap();
        let tlv = &encoded[SIGNATURE_SIZE..];
        // Only types 0, 2, and 6 appear
        assert_eq!(tlv[0], 0x00);
        assert_eq!(tlv[2], 0x02);
        assert_eq!(tlv[8], 0x06);
    }

    #[test]
    fn unknown_records_preserved() {
        let mut encoded = announcement().encode().unwrap();
        // Append a record of unknown type 561 after node_id (6)
        encoded.extend_from_slice(&[0xfd, 0x02, 0x31, 0x03, 0x12, 0x34, 0x56]);

        let decoded = NodeAnnouncement::decode(&encoded).unwrap();
        assert_eq!(
            decoded.extra_opaque_data.as_bytes(),
            &[0xfd, 0x02, 0x31, 0x03, 0x12, 0x34, 0x56]
        );

        // Round trip reproduces the extended message byte for byte
        assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn unknown_record_between_known_types() {
        let ann = announcement();
        let mut stream = Stream::new();
        stream.push(Record::encode(TLV_FEATURES, &ann.features).unwrap());
        stream.push(Record::encode(TLV_BLOCK_HEIGHT, &ann.block_height).unwrap());
        // Type 5 would be ipv6, type 4 alias; 9 is unknown and odd
        stream.push(Record::from_raw(9, vec![0xaa, 0xbb]));
        let mut encoded = Vec::new();
        ann.signature.encode(&mut encoded);
        encoded.extend(stream.encode());

        // Missing node_id: required record absent
        assert_eq!(
            NodeAnnouncement::decode(&encoded),
            Err(WireError::MissingRequiredRecord(TLV_NODE_ID))
        );
    }

    #[test]
    fn missing_features_rejected() {
        let ann = announcement();
        let mut stream = Stream::new();
        stream.push(Record::encode(TLV_BLOCK_HEIGHT, &ann.block_height).unwrap());
        stream.push(Record::encode(TLV_NODE_ID, &ann.node_id).unwrap());
        let mut encoded = Vec::new();
        ann.signature.encode(&mut encoded);
        encoded.extend(stream.encode());

        assert_eq!(
            NodeAnnouncement::decode(&encoded),
            Err(WireError::MissingRequiredRecord(TLV_FEATURES))
        );
    }

    #[test]
    fn truncated_signature_rejected() {
        assert_eq!(
            NodeAnnouncement::decode(&[0x00; 10]),
            Err(WireError::Truncated {
                expected: SIGNATURE_SIZE,
                actual: 10
            })
        );
    }

    #[test]
    fn malformed_field_aborts_decode() {
        let ann = announcement();
        let mut stream = Stream::new();
        stream.push(Record::encode(TLV_FEATURES, &ann.features).unwrap());
        // rgb color with 2 bytes instead of 3
        stream.push(Record::from_raw(TLV_RGB_COLOR, vec![0x12, 0x34]));
        stream.push(Record::encode(TLV_BLOCK_HEIGHT, &ann.block_height).unwrap());
        stream.push(Record::encode(TLV_NODE_ID, &ann.node_id).unwrap());
        let mut encoded = Vec::new();
        ann.signature.encode(&mut encoded);
        encoded.extend(stream.encode());

        assert_eq!(
            NodeAnnouncement::decode(&encoded),
            Err(WireError::Truncated {
                expected: 3,
                actual: 2
            })
        );
    }
}
