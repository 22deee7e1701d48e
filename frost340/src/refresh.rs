//! Proactive share refresh
//!
//! Each participant deals a polynomial with a zero constant term and
//! distributes its evaluations. Folding the received updates into a share
//! re-randomizes every share while the group secret (and thus the group
//! public key) stays fixed, invalidating any sub-threshold set of old shares
//! an attacker may have collected.

use core::fmt;

use generic_ec::{Scalar, SecretScalar};
use rand_core::{CryptoRng, RngCore};

use crate::{
    errors::{
        DomainError, IndexMismatchError, IndexMismatchReason, ThresholdError, ThresholdReason,
        ValidationError, ValidationReason,
    },
    vss::{self, SecretShare, VssCommitments},
};

/// One participant's contribution to a refresh round
#[derive(Debug, Clone)]
pub struct RefreshPackage {
    /// Zero-constant polynomial evaluations, one update per share index
    ///
    /// Update `i` must be delivered confidentially to the holder of share `i`.
    pub shares: Vec<SecretShare>,
    /// Commitments to the nonzero coefficients of the refresh polynomial
    ///
    /// The constant term is fixed to zero, so its commitment (the identity
    /// point) is omitted: the set holds `threshold - 1` points.
    pub commitments: VssCommitments,
}

/// Deals one refresh contribution for a `threshold`-of-`count` group
pub fn generate_refresh(
    rng: &mut (impl RngCore + CryptoRng),
    threshold: u16,
    count: u16,
) -> Result<RefreshPackage, RefreshError> {
    if threshold == 0 {
        return Err(Reason::Threshold(ThresholdReason::ZeroThreshold.into()).into());
    }
    if threshold > count {
        return Err(Reason::Threshold(
            ThresholdReason::ThresholdExceedsShares {
                threshold,
                shares: count,
            }
            .into(),
        )
        .into());
    }

    let mut coeffs = vss::generate_coefficients(rng, &[], threshold);
    coeffs[0] = Scalar::zero();
    let shares = vss::derive_shares(&coeffs, count).map_err(Reason::Poly)?;
    let commitments = vss::commit_coefficients(&coeffs[1..]);

    Ok(RefreshPackage {
        shares,
        commitments,
    })
}

/// Folds received refresh updates into a share
///
/// All updates must carry the share's own index. The refreshed share
/// replaces the old one, which must be destroyed.
pub fn refresh_share(
    share: &SecretShare,
    updates: &[SecretShare],
) -> Result<SecretShare, IndexMismatchError> {
    let mut sum = *share.secret.as_ref();
    for update in updates {
        if update.index != share.index {
            return Err(IndexMismatchReason::Mismatch {
                left: share.index,
                right: update.index,
            }
            .into());
        }
        sum += *update.secret.as_ref();
    }
    Ok(SecretShare {
        index: share.index,
        secret: SecretScalar::new(&mut sum),
    })
}

/// Merges refresh commitments into an existing commitment set
///
/// The constant-term commitment (the group public key) is carried over
/// unchanged; refresh commitment `j` is added to coefficient commitment
/// `j + 1`. Fails unless the refresh set is exactly one element shorter than
/// the existing set.
pub fn merge_refresh_commitments(
    existing: &VssCommitments,
    refresh: &VssCommitments,
) -> Result<VssCommitments, ValidationError> {
    if refresh.len() + 1 != existing.len() {
        return Err(ValidationReason::CommitmentSetMismatch {
            left: existing.len(),
            right: refresh.len() + 1,
        }
        .into());
    }
    let mut points = Vec::with_capacity(existing.len());
    points.extend(existing.points().first().copied());
    points.extend(
        existing.points()[1..]
            .iter()
            .zip(refresh.points())
            .map(|(x, y)| *x + *y),
    );
    Ok(VssCommitments::new(points))
}

/// Refresh dealing error
#[derive(Debug)]
pub struct RefreshError(Reason);

#[derive(Debug)]
enum Reason {
    Threshold(ThresholdError),
    Poly(DomainError),
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Reason::Threshold(_) => f.write_str("invalid refresh parameters"),
            Reason::Poly(_) => f.write_str("refresh share derivation failed"),
        }
    }
}

impl std::error::Error for RefreshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Reason::Threshold(err) => Some(err),
            Reason::Poly(err) => Some(err),
        }
    }
}

impl From<Reason> for RefreshError {
    fn from(err: Reason) -> Self {
        Self(err)
    }
}
