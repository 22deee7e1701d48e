//! Cooperative share repair
//!
//! A quorum of helpers can rebuild a lost share without any of them learning
//! it. Each helper splits its Lagrange-weighted share contribution into
//! random summands, one per helper, and keeps the books balanced with a
//! correction term; every helper then sums what it received, and the
//! recovering participant adds up those aggregates. No single exchanged
//! value reveals anything about a share.

use core::fmt;

use generic_ec::{Scalar, SecretScalar};
use rand_core::{CryptoRng, RngCore};

use crate::{
    errors::{
        DomainError, DomainReason, IndexMismatchError, IndexMismatchReason, ThresholdError,
        ThresholdReason,
    },
    poly,
    vss::{self, SecretShare},
    Curve, ShareIndex,
};

/// One masked summand exchanged during a repair round
///
/// `index` names the helper the value is addressed to. The values must
/// travel over confidential channels: while no single value reveals a share,
/// an observer collecting a helper's full set can unmask its contribution.
#[derive(Debug, Clone, Copy)]
pub struct RepairShare {
    /// Index of the helper this value is addressed to
    pub index: ShareIndex,
    /// The masked summand
    pub value: Scalar<Curve>,
}

/// Splits a helper's repair contribution into one summand per helper
///
/// The helper's contribution is `λ * share_secret`, where `λ` is the
/// Lagrange coefficient of the helper toward the lost index `target` over
/// the helper quorum. All summands but the helper's own are random; the
/// helper's own carries the correction that makes the set sum to the
/// contribution. `helpers` lists the whole quorum including the caller, one
/// entry per peer; duplicate entries are rejected.
pub fn generate_repair_shares(
    rng: &mut (impl RngCore + CryptoRng),
    share: &SecretShare,
    helpers: &[ShareIndex],
    threshold: u16,
    target: ShareIndex,
) -> Result<Vec<RepairShare>, RepairError> {
    // A duplicated helper would slip past the quorum count below and skew
    // the Lagrange weights
    for (i, index) in helpers.iter().enumerate() {
        if helpers[i + 1..].contains(index) {
            return Err(Reason::Domain(DomainReason::DuplicateAbscissa.into()).into());
        }
    }
    if helpers.len() < usize::from(threshold) {
        return Err(Reason::Threshold(
            ThresholdReason::TooFewParticipants {
                required: threshold,
                provided: helpers.len(),
            }
            .into(),
        )
        .into());
    }

    let others = helpers
        .iter()
        .filter(|index| **index != share.index)
        .copied()
        .collect::<Vec<_>>();
    if others.len() == helpers.len() {
        return Err(Reason::Domain(DomainReason::NotInSet.into()).into());
    }
    let others = vss::indices_to_scalars(&others).map_err(Reason::Domain)?;
    let self_index = poly::index_to_scalar(share.index).map_err(Reason::Domain)?;
    let target_index = poly::index_to_scalar(target).map_err(Reason::Domain)?;

    let lambda = poly::lagrange_coefficient(&others, self_index.as_ref(), target_index.as_ref())
        .map_err(Reason::Domain)?;
    if lambda == Scalar::zero() {
        return Err(Reason::Threshold(ThresholdReason::ZeroLagrangeCoefficient.into()).into());
    }

    let contribution = lambda * *share.secret.as_ref();
    let mut summands = Vec::with_capacity(helpers.len());
    let mut random_sum = Scalar::<Curve>::zero();
    for index in helpers {
        if *index == share.index {
            continue;
        }
        let value = Scalar::random(rng);
        random_sum += value;
        summands.push(RepairShare {
            index: *index,
            value,
        });
    }
    summands.push(RepairShare {
        index: share.index,
        value: contribution - random_sum,
    });
    summands.sort_unstable_by_key(|summand| summand.index);
    Ok(summands)
}

/// Sums the summands a helper received, one from each member of the quorum
///
/// Every summand must be addressed to `index`. The result is the helper's
/// aggregate, handed to the recovering participant.
pub fn aggregate_repair_shares(
    index: ShareIndex,
    received: &[RepairShare],
) -> Result<RepairShare, IndexMismatchError> {
    if received.is_empty() {
        return Err(IndexMismatchReason::EmptyShareSet.into());
    }
    let mut value = Scalar::<Curve>::zero();
    for summand in received {
        if summand.index != index {
            return Err(IndexMismatchReason::Mismatch {
                left: index,
                right: summand.index,
            }
            .into());
        }
        value += summand.value;
    }
    Ok(RepairShare { index, value })
}

/// Rebuilds the lost share from the helpers' aggregates
pub fn recover_share(
    aggregates: &[RepairShare],
    target: ShareIndex,
) -> Result<SecretShare, DomainError> {
    if aggregates.is_empty() {
        return Err(DomainReason::EmptySet.into());
    }
    let mut secret = aggregates
        .iter()
        .map(|aggregate| aggregate.value)
        .sum::<Scalar<Curve>>();
    Ok(SecretShare {
        index: target,
        secret: SecretScalar::new(&mut secret),
    })
}

/// Repair dealing error
#[derive(Debug)]
pub struct RepairError(Reason);

#[derive(Debug)]
enum Reason {
    Threshold(ThresholdError),
    Domain(DomainError),
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Reason::Threshold(_) => f.write_str("repair quorum is invalid"),
            Reason::Domain(_) => f.write_str("repair coefficient derivation failed"),
        }
    }
}

impl std::error::Error for RepairError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Reason::Threshold(err) => Some(err),
            Reason::Domain(err) => Some(err),
        }
    }
}

impl From<Reason> for RepairError {
    fn from(err: Reason) -> Self {
        Self(err)
    }
}
