//! Round 2 - Partial signing
//!
//! Each signer combines its secret share, its secret nonces, and the shared
//! [`SessionContext`](super::session::SessionContext) into a partial
//! signature scalar. The Coordinator checks every partial signature with
//! [`verify_partial`] before aggregating, so a misbehaving signer can be
//! identified without re-running the whole session for diagnosis.

use core::fmt;

use generic_ec::{Point, Scalar};

use crate::{
    errors::{
        DomainError, IndexMismatchError, IndexMismatchReason, ValidationError, ValidationReason,
    },
    poly, vss, Curve, ShareIndex,
};

use super::{
    round1::{PublicNonces, SecretNonces},
    session::SessionContext,
    utils,
};

/// Partial signature of one signer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialSignature {
    /// Index of the signer that produced the share
    pub index: ShareIndex,
    /// The signature scalar `z_i`
    pub scalar: Scalar<Curve>,
    /// The signer's share public key, used by [`verify_partial`]
    pub public_key: Point<Curve>,
}

/// Produces a partial signature over the session's message
///
/// Computes `z_i = (d_i + ρ_i * e_i) + c * λ_i * (parity * state * sk_i)`,
/// with the secret nonces negated first when the group nonce has an odd
/// y-coordinate. The secret nonces must be discarded after this call.
pub fn sign(
    ctx: &SessionContext,
    share: &vss::SecretShare,
    nonces: &SecretNonces,
) -> Result<PartialSignature, SigningError> {
    if nonces.index != share.index {
        return Err(Reason::IndexMismatch(
            IndexMismatchReason::Mismatch {
                left: nonces.index,
                right: share.index,
            }
            .into(),
        )
        .into());
    }

    let lambda = interpolating_value(ctx, share.index).map_err(Reason::Interpolation)?;
    let rho = utils::binding_factor_for(&ctx.binding_factors, share.index)
        .ok_or(Reason::MissingBindingFactor(share.index))?;

    let mut hiding = *nonces.hiding_nonce.as_ref();
    let mut binding = *nonces.binding_nonce.as_ref();
    if !crate::ciphersuite::is_even_y(&ctx.group_nonce) {
        hiding = -hiding;
        binding = -binding;
    }

    let secret = utils::key_coefficient(&ctx.key.state) * *share.secret.as_ref();
    let scalar = hiding + rho * binding + ctx.challenge * lambda * secret;

    Ok(PartialSignature {
        index: share.index,
        scalar,
        public_key: share.public_key(),
    })
}

/// Verifies a partial signature against a signer's share public key
///
/// Checks `z_i * G == D_i + ρ_i * E_i + (λ_i * state * parity * c) * PK_i`,
/// with the commitment points negated first when the group nonce has an odd
/// y-coordinate. Returns `false` when the equation does not hold; errors
/// only when the signer is not part of the session.
pub fn verify_partial(
    ctx: &SessionContext,
    nonces: &PublicNonces,
    public_key: &Point<Curve>,
    scalar: &Scalar<Curve>,
) -> Result<bool, ValidationError> {
    let lambda = interpolating_value(ctx, nonces.index)
        .map_err(|_| ValidationError::from(ValidationReason::UnknownSigner(nonces.index)))?;
    let rho = utils::binding_factor_for(&ctx.binding_factors, nonces.index)
        .ok_or(ValidationReason::UnknownSigner(nonces.index))?;

    let mut hiding_comm = nonces.hiding_comm;
    let mut binding_comm = nonces.binding_comm;
    if !crate::ciphersuite::is_even_y(&ctx.group_nonce) {
        hiding_comm = -hiding_comm;
        binding_comm = -binding_comm;
    }

    let key_coeff = lambda * utils::key_coefficient(&ctx.key.state) * ctx.challenge;
    let expected = hiding_comm + binding_comm * rho + *public_key * key_coeff;
    Ok(Point::generator() * *scalar == expected)
}

/// Lagrange coefficient of a signer within the session's quorum
fn interpolating_value(
    ctx: &SessionContext,
    index: ShareIndex,
) -> Result<Scalar<Curve>, DomainError> {
    let xs = vss::indices_to_scalars(&ctx.indices)?;
    let x = poly::index_to_scalar(index)?;
    poly::lagrange_basis(&xs, x.as_ref())
}

/// Partial signing error
#[derive(Debug)]
pub struct SigningError(Reason);

#[derive(Debug)]
enum Reason {
    IndexMismatch(IndexMismatchError),
    Interpolation(DomainError),
    MissingBindingFactor(ShareIndex),
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Reason::IndexMismatch(_) => {
                f.write_str("nonces were generated for a different share")
            }
            Reason::Interpolation(_) => f.write_str("signer is not part of the session quorum"),
            Reason::MissingBindingFactor(i) => {
                write!(f, "no binding factor computed for signer {i}")
            }
        }
    }
}

impl std::error::Error for SigningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Reason::IndexMismatch(err) => Some(err),
            Reason::Interpolation(err) => Some(err),
            Reason::MissingBindingFactor(_) => None,
        }
    }
}

impl From<Reason> for SigningError {
    fn from(err: Reason) -> Self {
        Self(err)
    }
}
