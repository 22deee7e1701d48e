//! Hash and serialization primitives of the FROST(secp256k1, SHA-256) suite
//!
//! Domain separation follows [Section 6.5] of the FROST draft: a single
//! context string is shared by every hash invocation, with a per-purpose
//! suffix (`rho` for binding factors, `nonce` for nonce generation, `msg`
//! for the message pre-hash, `com` for the commitment-list hash). The
//! Schnorr challenge uses the `BIP0340/challenge` tagged hash instead, so
//! the aggregated output verifies as a plain [BIP-340] signature.
//!
//! [Section 6.5]: https://www.ietf.org/archive/id/draft-irtf-cfrg-frost-15.html#name-frostsecp256k1-sha-256
//! [BIP-340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

use digest::Digest;
use generic_ec::{NonZero, Point, Scalar};

use crate::{
    errors::{ValidationError, ValidationReason},
    Curve,
};

/// Context string shared by every domain-separated hash in the protocol
pub const CONTEXT_STRING: &str = "FROST-secp256k1-SHA256-v1";

/// `H1` hash function: hash-to-scalar with the `rho` domain suffix
///
/// Used for binding-factor derivation. Accepts a list of bytestrings that
/// are concatenated before hashing.
pub fn h1(msg: &[&[u8]]) -> Scalar<Curve> {
    hash_to_scalar(msg, &[CONTEXT_STRING.as_bytes(), b"rho"])
}

/// `H3` hash function: hash-to-scalar with the `nonce` domain suffix
///
/// Used for deterministic nonce generation.
pub fn h3(msg: &[&[u8]]) -> Scalar<Curve> {
    hash_to_scalar(msg, &[CONTEXT_STRING.as_bytes(), b"nonce"])
}

/// `H4` hash function: SHA-256 keyed with the `msg` domain suffix
///
/// Used to pre-hash the message when assembling the commitment prefix.
pub fn h4() -> sha2::Sha256 {
    sha2::Sha256::new()
        .chain_update(CONTEXT_STRING)
        .chain_update(b"msg")
}

/// `H5` hash function: SHA-256 keyed with the `com` domain suffix
///
/// Used to hash the encoded commitment list.
pub fn h5() -> sha2::Sha256 {
    sha2::Sha256::new()
        .chain_update(CONTEXT_STRING)
        .chain_update(b"com")
}

/// Tagged hash as defined by BIP-340: `SHA256(SHA256(tag) || SHA256(tag) || msg)`
pub fn tagged_hash(tag: &str) -> sha2::Sha256 {
    let tag = sha2::Sha256::digest(tag);
    sha2::Sha256::new().chain_update(tag).chain_update(tag)
}

/// Serializes a point in 33-byte compressed form
pub fn serialize_point(point: &Point<Curve>) -> generic_ec::EncodedPoint<Curve> {
    point.to_bytes(true)
}

/// Serializes a point in 32-byte x-only form
///
/// Fails if stripping the parity byte does not leave exactly 32 bytes.
pub fn serialize_xonly(point: &Point<Curve>) -> Result<[u8; 32], ValidationError> {
    let bytes = point.to_bytes(true);
    bytes[1..]
        .try_into()
        .map_err(|_| ValidationReason::InvalidXOnly.into())
}

/// Serializes a scalar in 32-byte big-endian form
pub fn serialize_scalar(scalar: &Scalar<Curve>) -> generic_ec::EncodedScalar<Curve> {
    scalar.to_be_bytes()
}

/// Tells whether the point has an even y-coordinate
pub fn is_even_y(point: &Point<Curve>) -> bool {
    // First byte of a compressed point is either 2 or 3. 2 means the Y coordinate is even.
    debug_assert!(matches!(point.to_bytes(true)[0], 2 | 3));
    point.to_bytes(true)[0] == 2
}

/// Lifts an encoded public key to a curve point
///
/// Accepts either a 32-byte x-only encoding (even y-coordinate implied) or a
/// 33-byte compressed encoding (parity byte honored). The identity point and
/// any other input length are rejected.
pub fn lift_x(bytes: &[u8]) -> Result<NonZero<Point<Curve>>, ValidationError> {
    let point = match bytes.len() {
        32 => {
            let mut compressed = [0u8; 33];
            compressed[0] = 2;
            compressed[1..].copy_from_slice(bytes);
            Point::from_bytes(compressed)
        }
        33 => Point::from_bytes(bytes),
        _ => return Err(ValidationReason::InvalidPoint.into()),
    };
    let point = point.map_err(|_| ValidationError::from(ValidationReason::InvalidPoint))?;
    NonZero::from_point(point).ok_or_else(|| ValidationReason::ZeroPoint.into())
}

/// Hash-to-scalar-field primitive, `expand_message_xmd` with SHA-256
fn hash_to_scalar(msgs: &[&[u8]], dsts: &[&[u8]]) -> Scalar<Curve> {
    use generic_ec::as_raw::FromRaw;
    use k256::elliptic_curve::{
        generic_array::typenum::Unsigned,
        hash2curve::{ExpandMsgXmd, FromOkm, GroupDigest as _},
    };

    // According to the doc, `k256::Secp256k1::hash_to_scalar` returns error if:
    // * dst.is_empty()
    // * len_in_bytes == 0
    // * len_in_bytes > u16::MAX
    // * len_in_bytes > 255 * HashT::OutputSize
    // where len_in_bytes = <Self::FieldElement as FromOkm>::Length

    // Every caller in this module passes the context string as part of the
    // dst, but we enforce non-emptiness via debug assert as well:
    debug_assert!(
        dsts.iter().map(|part| part.len()).sum::<usize>() > 0,
        "dst must not be empty"
    );

    // The other conditions are checked statically below
    #[allow(dead_code)]
    {
        const LENGTH_IN_BYTES: usize = <<k256::Scalar as FromOkm>::Length as Unsigned>::USIZE;
        const SHA256_OUTPUT_SIZE: usize =
            <<sha2::Sha256 as digest::OutputSizeUser>::OutputSize as Unsigned>::USIZE;
        use static_assertions as sa;

        sa::const_assert!(LENGTH_IN_BYTES > 0);
        sa::const_assert!(LENGTH_IN_BYTES <= u16::MAX as _);
        sa::const_assert!(LENGTH_IN_BYTES <= 255 * SHA256_OUTPUT_SIZE);
    }

    // So, we can safely unwrap the result
    #[allow(clippy::expect_used)]
    let scalar_raw = k256::Secp256k1::hash_to_scalar::<ExpandMsgXmd<sha2::Sha256>>(msgs, dsts)
        .expect("should never fail");
    Scalar::from_raw(generic_ec::curves::Secp256k1::scalar(scalar_raw))
}
