//! Shamir secret sharing with verifiable commitments
//!
//! A dealer (or each DKG participant) samples a degree `t-1` polynomial,
//! hands out evaluations at `x = 1..=n` as shares, and publishes one
//! base-point commitment per coefficient. Any holder of a share can check it
//! against the commitments without learning anything about the secret; any
//! `t` holders can reconstruct the secret by Lagrange interpolation.

use generic_ec::{Point, Scalar, SecretScalar};
use rand_core::{CryptoRng, RngCore};

use crate::{
    errors::{
        DomainError, IndexMismatchError, IndexMismatchReason, ValidationError, ValidationReason,
    },
    poly, Curve, ShareIndex,
};

/// One participant's secret share: an evaluation of the dealer polynomial
///
/// The secret half is exclusively owned by the participant it was dealt to
/// and must never be serialized into any structure shared with other
/// parties. Indices are 1-based; 0 is reserved for the secret itself.
#[derive(Debug, Clone)]
pub struct SecretShare {
    /// Participant index the polynomial was evaluated at
    pub index: ShareIndex,
    /// The evaluation, i.e. the share of the group secret
    pub secret: SecretScalar<Curve>,
}

impl SecretShare {
    /// Public counterpart of the share secret
    pub fn public_key(&self) -> Point<Curve> {
        Point::generator() * &self.secret
    }
}

/// Ordered base-point commitments to a dealer polynomial's coefficients
///
/// Element 0 commits to the secret and equals the (sub-)group public key.
/// Public and immutable once published.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VssCommitments(Vec<Point<Curve>>);

impl VssCommitments {
    /// Wraps a list of coefficient commitments
    pub fn new(points: Vec<Point<Curve>>) -> Self {
        Self(points)
    }

    /// Commitment to coefficient 0, i.e. the (sub-)group public key
    pub fn group_pubkey(&self) -> Option<&Point<Curve>> {
        self.0.first()
    }

    /// The coefficient commitments, ascending by power
    pub fn points(&self) -> &[Point<Curve>] {
        &self.0
    }

    /// Number of committed coefficients (the polynomial threshold)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Tells whether the commitment set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Produces `threshold` polynomial coefficients
///
/// The first `seeds.len()` coefficients are taken from the caller-supplied
/// seeds (reduced mod the group order); the rest are drawn from `rng`.
/// Determinism is caller-controlled only through seeds.
pub fn generate_coefficients(
    rng: &mut (impl RngCore + CryptoRng),
    seeds: &[[u8; 32]],
    threshold: u16,
) -> Vec<Scalar<Curve>> {
    (0..usize::from(threshold))
        .map(|i| match seeds.get(i) {
            Some(seed) => Scalar::from_be_bytes_mod_order(seed),
            None => Scalar::random(rng),
        })
        .collect()
}

/// Evaluates the polynomial at `x = 1..=count`, producing `count` shares
pub fn derive_shares(
    coeffs: &[Scalar<Curve>],
    count: u16,
) -> Result<Vec<SecretShare>, DomainError> {
    (1..=count)
        .map(|index| {
            let x = poly::index_to_scalar(index)?;
            let mut secret = poly::evaluate_at(coeffs, &x)?;
            Ok(SecretShare {
                index,
                secret: SecretScalar::new(&mut secret),
            })
        })
        .collect()
}

/// Commits to each coefficient as `coefficient * BasePoint`
///
/// Element 0 of the result is the (sub-)group public key.
pub fn commit_coefficients(coeffs: &[Scalar<Curve>]) -> VssCommitments {
    VssCommitments(
        coeffs
            .iter()
            .map(|coeff| Point::generator() * coeff)
            .collect(),
    )
}

/// Verifies a share against the dealer's coefficient commitments
///
/// Checks `share.secret * BasePoint == Σ_{j<threshold} commitments[j] * index^j`.
/// Returns `false` when the share does not lie on the committed polynomial;
/// errors only on malformed input (zero index, threshold exceeding the
/// published commitments).
pub fn verify_share(
    commitments: &VssCommitments,
    share: &SecretShare,
    threshold: u16,
) -> Result<bool, ValidationError> {
    if share.index == 0 {
        return Err(ValidationReason::UnknownSigner(share.index).into());
    }
    if usize::from(threshold) > commitments.len() {
        return Err(ValidationReason::ThresholdOutOfRange {
            threshold: usize::from(threshold),
            commitments: commitments.len(),
        }
        .into());
    }

    let index = Scalar::<Curve>::from(share.index);
    let mut power = Scalar::<Curve>::one();
    let mut acc: Option<Point<Curve>> = None;
    for commitment in &commitments.points()[..usize::from(threshold)] {
        let term = *commitment * power;
        acc = Some(match acc {
            Some(sum) => sum + term,
            None => term,
        });
        power *= index;
    }

    let expected = share.public_key();
    Ok(acc == Some(expected))
}

/// Folds a participant's per-dealer sub-shares into one local share
///
/// All shares must carry the same index; the secrets are summed mod the
/// group order. This is the local step of a DKG round where every dealer
/// sends one sub-share to each participant.
pub fn combine_shares(shares: &[SecretShare]) -> Result<SecretShare, IndexMismatchError> {
    let Some(first) = shares.first() else {
        return Err(IndexMismatchReason::EmptyShareSet.into());
    };
    for share in &shares[1..] {
        if share.index != first.index {
            return Err(IndexMismatchReason::Mismatch {
                left: first.index,
                right: share.index,
            }
            .into());
        }
    }

    let mut sum = shares
        .iter()
        .map(|share| *share.secret.as_ref())
        .sum::<Scalar<Curve>>();
    Ok(SecretShare {
        index: first.index,
        secret: SecretScalar::new(&mut sum),
    })
}

/// Reconstructs the group secret by interpolating the shares at zero
///
/// Intended for tests and key export only; the live signing path never
/// reconstructs the secret.
pub fn derive_secret(shares: &[SecretShare]) -> Result<Scalar<Curve>, DomainError> {
    let points = shares
        .iter()
        .map(|share| {
            let x = poly::index_to_scalar(share.index)?;
            Ok((*x.as_ref(), *share.secret.as_ref()))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;
    poly::interpolate_at_zero(&points)
}

/// Pointwise group addition of two equal-length commitment sets
///
/// Used when merging independently generated polynomials, e.g. during DKG
/// or a refresh round.
pub fn merge_commitment_sets(
    a: &VssCommitments,
    b: &VssCommitments,
) -> Result<VssCommitments, ValidationError> {
    if a.len() != b.len() {
        return Err(ValidationReason::CommitmentSetMismatch {
            left: a.len(),
            right: b.len(),
        }
        .into());
    }
    Ok(VssCommitments(
        a.points()
            .iter()
            .zip(b.points())
            .map(|(x, y)| *x + *y)
            .collect(),
    ))
}

/// Converts sorted participant indices into nonzero scalars
pub(crate) fn indices_to_scalars(
    indices: &[ShareIndex],
) -> Result<Vec<Scalar<Curve>>, DomainError> {
    indices
        .iter()
        .map(|index| Ok(*poly::index_to_scalar(*index)?.as_ref()))
        .collect()
}
