//! Extensible TLV wire-format codec for Lightning Network messages.
//!
//! Implements the type-length-value stream format from BOLT 1 and the
//! composite messages built on top of it: records carry a `BigSize` type
//! and length followed by value bytes, streams keep records in strictly
//! ascending type order, and decoders extract the records they understand
//! while preserving the rest byte-exact. That preservation is what keeps
//! signatures over a whole message valid on nodes that do not yet know
//! every field in it.
//!
//! The codec is purely functional over caller-supplied buffers: no shared
//! state, no I/O, safe to use concurrently across independent messages.

mod blinded;
mod boolean;
mod features;
mod node_announcement;
mod record;
mod stream;
mod types;

pub use blinded::{BlindedRouteData, PaymentConstraints, PaymentRelayInfo};
pub use boolean::Boolean;
pub use features::{FEATURES, FeatureNameTable, FeatureVector, RawFeatureVector};
pub use node_announcement::{
    IPV4_ADDR_SIZE, IPV6_ADDR_SIZE, Ipv4Addrs, Ipv6Addrs, MAX_ALIAS_LEN, NodeAlias,
    NodeAnnouncement, RgbColor, SIGNATURE_SIZE, Signature, TOR_V3_ADDR_SIZE, TOR_V3_HOST_LEN,
    TorV3Addr, TorV3Addrs,
};
pub use record::{PUBKEY_SIZE, Record, Value};
pub use stream::{OpaqueData, RawRecord, RawStream, Stream, TypeMap};
pub use types::{
    SHORT_CHANNEL_ID_SIZE, ShortChannelId, bigsize_len, decode_bigsize, decode_tu32, decode_tu64,
    encode_bigsize, encode_tu32, encode_tu64, tu32_len, tu64_len,
};

use thiserror::Error;

/// Errors that can occur during TLV encoding/decoding.
///
/// Every operation either yields a complete value or one of these; the
/// codec never returns partial results and never retries. Unknown record
/// types are not an error anywhere: they are the forward-compatibility
/// path and travel through [`OpaqueData`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Not enough bytes to decode a fixed-size element
    #[error("TRUNCATED expected {expected} got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// `BigSize` truncated (unexpected EOF)
    #[error("BIGSIZE_TRUNCATED")]
    BigSizeTruncated,

    /// `BigSize` not minimally encoded
    #[error("BIGSIZE_NOT_MINIMAL")]
    BigSizeNotMinimal,

    /// TLV record length exceeds the remaining buffer
    #[error("TLV_LENGTH_OVERFLOW")]
    LengthOverflow,

    /// TLV type not in strictly ascending order
    #[error("TLV_OUT_OF_ORDER previous {previous} current {current}")]
    OutOfOrderType { previous: u64, current: u64 },

    /// The same TLV type appeared twice
    #[error("TLV_DUPLICATE_TYPE {0}")]
    DuplicateType(u64),

    /// A record the message requires was absent from the stream
    #[error("TLV_MISSING_REQUIRED_TYPE {0}")]
    MissingRequiredRecord(u64),

    /// A value violated a field-specific constraint
    #[error("VALUE_CONSTRAINT {0}")]
    ValueConstraint(&'static str),
}
