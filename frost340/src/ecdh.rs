//! Threshold ECDH
//!
//! A quorum of share holders can jointly compute `group_secret * PK` for a
//! counterparty public key `PK` without reconstructing the group secret:
//! each member contributes `λ_i * share_i * PK` and the contributions add up
//! to the shared point.

use generic_ec::{NonZero, Point};

use crate::{
    errors::{AggregationError, AggregationReason, DomainError},
    poly,
    vss::{self, SecretShare},
    Curve, ShareIndex,
};

/// One member's contribution to a threshold ECDH exchange
///
/// The contribution alone does not reveal the share, but the combined result
/// is the shared secret and must be treated as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcdhShare {
    /// Index of the contributing member
    pub index: ShareIndex,
    /// `λ * share_secret * PK`
    pub point: Point<Curve>,
}

/// Computes one member's ECDH contribution
///
/// `members` lists the participating quorum (including the caller) and fixes
/// the Lagrange weights; every member must use the same list.
pub fn create_ecdh_share(
    members: &[ShareIndex],
    share: &SecretShare,
    public_key: &NonZero<Point<Curve>>,
) -> Result<EcdhShare, DomainError> {
    let xs = vss::indices_to_scalars(members)?;
    let x = poly::index_to_scalar(share.index)?;
    let lambda = poly::lagrange_basis(&xs, x.as_ref())?;

    let scalar = lambda * *share.secret.as_ref();
    Ok(EcdhShare {
        index: share.index,
        point: **public_key * scalar,
    })
}

/// Combines the quorum's contributions into the shared point
///
/// Expects exactly one contribution per member of the agreed quorum; a
/// member contributing twice yields garbage, not an error.
pub fn derive_ecdh_secret(
    shares: &[EcdhShare],
) -> Result<NonZero<Point<Curve>>, AggregationError> {
    if shares.is_empty() {
        return Err(AggregationReason::NoShares.into());
    }
    let sum = shares
        .iter()
        .map(|share| share.point)
        .sum::<Point<Curve>>();
    NonZero::from_point(sum).ok_or_else(|| AggregationReason::PointAtInfinity.into())
}
