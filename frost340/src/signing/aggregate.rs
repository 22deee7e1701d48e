//! Signature share aggregation
//!
//! The Coordinator sums the verified partial signatures, applies the
//! accumulated tweak term once, and obtains a plain [BIP-340] signature
//! `x(R) || s` that any Schnorr verifier accepts against the tweaked x-only
//! group key.
//!
//! [BIP-340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

use core::fmt;

use generic_ec::Scalar;
use k256::schnorr;

use crate::{
    ciphersuite,
    errors::{AggregationError, AggregationReason, SerializationError, SerializationReason},
    Curve,
};

use super::{round2::PartialSignature, session::SessionContext, utils};

/// A complete BIP-340 signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    /// X-only encoding of the group nonce `R`
    pub r: [u8; 32],
    /// The signature scalar `s`
    pub z: Scalar<Curve>,
}

impl Signature {
    /// Serializes the signature in the 64-byte wire form `x(R) || s`
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(ciphersuite::serialize_scalar(&self.z).as_bytes());
        out
    }

    /// Parses a signature from its 64-byte wire form
    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Self, SerializationError> {
        let mut r = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        let z = Scalar::from_be_bytes(&bytes[32..])
            .map_err(|_| SerializationError::from(SerializationReason::InvalidScalar))?;
        Ok(Self { r, z })
    }

    /// Verifies the signature against an x-only public key and a message
    ///
    /// Delegates to an independent BIP-340 verifier, so a signature accepted
    /// here is accepted by any Schnorr implementation.
    pub fn verify(&self, public_key: &[u8; 32], msg: &[u8]) -> Result<(), InvalidSignature> {
        let key = schnorr::VerifyingKey::from_bytes(public_key).map_err(|_| InvalidSignature)?;
        let sig =
            schnorr::Signature::try_from(self.to_bytes().as_slice()).map_err(|_| InvalidSignature)?;
        key.verify_raw(msg, &sig).map_err(|_| InvalidSignature)
    }
}

/// Aggregates partial signatures into a complete BIP-340 signature
///
/// Computes `s = Σ z_i + c * parity * tweak`: the accumulated tweak enters
/// the signature exactly once here, never in the partial signatures. Every
/// partial signature should have passed
/// [`verify_partial`](super::round2::verify_partial) first; aggregation
/// itself only checks that the signers belong to the session.
pub fn aggregate(
    ctx: &SessionContext,
    partial_sigs: &[PartialSignature],
) -> Result<Signature, AggregationError> {
    if partial_sigs.is_empty() {
        return Err(AggregationReason::NoShares.into());
    }

    let mut s = Scalar::<Curve>::zero();
    for psig in partial_sigs {
        if utils::binding_factor_for(&ctx.binding_factors, psig.index).is_none() {
            return Err(AggregationReason::MissingBindingFactor(psig.index).into());
        }
        s += psig.scalar;
    }
    s += ctx.challenge * ctx.key.state.parity * ctx.key.state.tweak;

    let r = ciphersuite::serialize_xonly(&ctx.group_nonce)
        .map_err(|_| AggregationError::from(AggregationReason::MalformedGroupNonce))?;
    Ok(Signature { r, z: s })
}

/// Signature verification failed
#[derive(Debug)]
pub struct InvalidSignature;

impl fmt::Display for InvalidSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid signature")
    }
}

impl std::error::Error for InvalidSignature {}
