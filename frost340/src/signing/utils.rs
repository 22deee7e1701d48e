//! Helpers shared by the signing rounds

use digest::Digest;
use generic_ec::{NonZero, Point, Scalar};

use crate::{
    ciphersuite,
    errors::{AggregationError, AggregationReason, ValidationError},
    tweak::PointState,
    Curve, ShareIndex,
};

use super::round1::PublicNonces;

/// Binding factor of one signer, derived from the whole commitment list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingFactor {
    /// Index of the signer the factor binds
    pub index: ShareIndex,
    /// The factor itself
    pub factor: Scalar<Curve>,
}

/// Encodes a commitment list for hashing
///
/// Per signer, ascending by index: 4-byte big-endian index, 33-byte hiding
/// commitment, 33-byte binding commitment. The input must already be sorted.
pub fn encode_commitment_list(nonces: &[PublicNonces]) -> Vec<u8> {
    debug_assert!(is_sorted_by_index(nonces));
    let mut out = Vec::with_capacity(nonces.len() * (4 + 33 + 33));
    for nonce in nonces {
        out.extend_from_slice(&u32::from(nonce.index).to_be_bytes());
        out.extend_from_slice(ciphersuite::serialize_point(&nonce.hiding_comm).as_bytes());
        out.extend_from_slice(ciphersuite::serialize_point(&nonce.binding_comm).as_bytes());
    }
    out
}

/// Builds the shared prefix of every binding-factor hash
///
/// `group_pk(33) || H4(msg) || H5(encoded sorted commitment list)`. The
/// group key is the tweaked key, so tweaks feed into the binding factors.
pub fn commit_prefix(
    nonces: &[PublicNonces],
    group_pk: &NonZero<Point<Curve>>,
    msg: &[u8],
) -> Vec<u8> {
    let mut sorted = nonces.to_vec();
    sorted.sort_unstable_by_key(|nonce| nonce.index);

    let msg_hash = ciphersuite::h4().chain_update(msg).finalize();
    let list_hash = ciphersuite::h5()
        .chain_update(encode_commitment_list(&sorted))
        .finalize();

    let mut prefix = Vec::with_capacity(33 + 32 + 32);
    prefix.extend_from_slice(ciphersuite::serialize_point(group_pk).as_bytes());
    prefix.extend_from_slice(&msg_hash);
    prefix.extend_from_slice(&list_hash);
    prefix
}

/// Derives one binding factor per signer
///
/// Each factor is `H1(prefix || index)` with the index serialized as a
/// 32-byte scalar, so each signer's binding factor commits to the full
/// session while remaining distinct per signer.
pub fn binding_factors(nonces: &[PublicNonces], prefix: &[u8]) -> Vec<BindingFactor> {
    nonces
        .iter()
        .map(|nonce| {
            let index = ciphersuite::serialize_scalar(&Scalar::from(nonce.index));
            BindingFactor {
                index: nonce.index,
                factor: ciphersuite::h1(&[prefix, index.as_bytes()]),
            }
        })
        .collect()
}

/// Looks up the binding factor of a signer
pub fn binding_factor_for(factors: &[BindingFactor], index: ShareIndex) -> Option<Scalar<Curve>> {
    factors
        .iter()
        .find(|factor| factor.index == index)
        .map(|factor| factor.factor)
}

/// Aggregates the group nonce `R = Σ (hiding_i + ρ_i * binding_i)`
///
/// The group nonce becomes the x-coordinate of the final signature, so the
/// identity point is rejected.
pub fn aggregate_group_nonce(
    nonces: &[PublicNonces],
    factors: &[BindingFactor],
) -> Result<NonZero<Point<Curve>>, AggregationError> {
    if nonces.is_empty() {
        return Err(AggregationReason::NoParticipants.into());
    }
    let mut acc = Point::<Curve>::zero();
    for nonce in nonces {
        let rho = binding_factor_for(factors, nonce.index)
            .ok_or(AggregationReason::MissingBindingFactor(nonce.index))?;
        acc = acc + nonce.hiding_comm + nonce.binding_comm * rho;
    }
    NonZero::from_point(acc).ok_or_else(|| AggregationReason::PointAtInfinity.into())
}

/// BIP-340 challenge `e = H_tag(x(R) || x(P) || msg) mod q`
pub fn bip340_challenge(
    group_nonce: &NonZero<Point<Curve>>,
    group_pk: &NonZero<Point<Curve>>,
    msg: &[u8],
) -> Result<Scalar<Curve>, ValidationError> {
    let hash = ciphersuite::tagged_hash("BIP0340/challenge")
        .chain_update(ciphersuite::serialize_xonly(group_nonce)?)
        .chain_update(ciphersuite::serialize_xonly(group_pk)?)
        .chain_update(msg)
        .finalize();
    Ok(Scalar::from_be_bytes_mod_order(hash))
}

/// Per-signer effective secret-key multiplier `parity * state`
///
/// Folding the tweak accumulator into the share secret this way keeps each
/// partial signature consistent with the tweaked x-only group key.
pub(crate) fn key_coefficient(key_state: &PointState) -> Scalar<Curve> {
    key_state.parity * key_state.state
}

fn is_sorted_by_index(nonces: &[PublicNonces]) -> bool {
    nonces
        .windows(2)
        .all(|pair| pair[0].index <= pair[1].index)
}
