//! Trusted dealer keygen
//!
//! Generates a full share group in one place. Note that this creates a
//! single point of failure/trust: it is mainly intended for tests and for
//! importing an existing key into the threshold scheme. For distributed
//! generation, each participant instead runs [`vss`](crate::vss) locally and
//! folds the received sub-shares with
//! [`combine_shares`](crate::vss::combine_shares).

use core::fmt;

use generic_ec::{NonZero, Point};
use rand_core::{CryptoRng, RngCore};

use crate::{
    errors::DomainError,
    vss::{self, SecretShare, VssCommitments},
    Curve,
};

/// Output of a dealer keygen round
#[derive(Debug, Clone)]
pub struct DealerGroup {
    /// The group public key (commitment to the polynomial's constant term)
    pub group_pubkey: NonZero<Point<Curve>>,
    /// Number of shares required to sign
    pub threshold: u16,
    /// One secret share per participant, indices `1..=n`
    ///
    /// The dealer must deliver each share to its participant out-of-band and
    /// destroy its own copy.
    pub shares: Vec<SecretShare>,
    /// Public commitments to the polynomial coefficients
    pub commitments: VssCommitments,
}

/// Deals a `threshold`-of-`count` share group
///
/// The first `seeds.len()` polynomial coefficients are derived from the
/// caller-supplied seeds (pass the secret key to be imported as the first
/// seed for a deterministic group secret); the rest are drawn from `rng`.
pub fn deal(
    rng: &mut (impl RngCore + CryptoRng),
    seeds: &[[u8; 32]],
    threshold: u16,
    count: u16,
) -> Result<DealerGroup, TrustedDealerError> {
    if threshold == 0 {
        return Err(Reason::ZeroThreshold.into());
    }
    if threshold > count {
        return Err(Reason::ThresholdExceedsShares {
            threshold,
            shares: count,
        }
        .into());
    }

    let coeffs = vss::generate_coefficients(rng, seeds, threshold);
    let shares = vss::derive_shares(&coeffs, count).map_err(Reason::Poly)?;
    let commitments = vss::commit_coefficients(&coeffs);
    let group_pubkey = commitments
        .group_pubkey()
        .copied()
        .and_then(NonZero::from_point)
        .ok_or(Reason::ZeroGroupKey)?;

    Ok(DealerGroup {
        group_pubkey,
        threshold,
        shares,
        commitments,
    })
}

/// Dealer keygen error
#[derive(Debug)]
pub struct TrustedDealerError(Reason);

#[derive(Debug)]
enum Reason {
    ZeroThreshold,
    ThresholdExceedsShares { threshold: u16, shares: u16 },
    ZeroGroupKey,
    Poly(DomainError),
}

impl fmt::Display for TrustedDealerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Reason::ZeroThreshold => f.write_str("threshold must be at least 1"),
            Reason::ThresholdExceedsShares { threshold, shares } => {
                write!(f, "threshold {threshold} exceeds share count {shares}")
            }
            Reason::ZeroGroupKey => f.write_str("group secret reduces to zero"),
            Reason::Poly(_) => f.write_str("share derivation failed"),
        }
    }
}

impl std::error::Error for TrustedDealerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Reason::Poly(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Reason> for TrustedDealerError {
    fn from(err: Reason) -> Self {
        Self(err)
    }
}
