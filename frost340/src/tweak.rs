//! X-only key tweaking with accumulated parity state
//!
//! BIP-340 works with x-only public keys, so every additive tweak must first
//! normalize the running point to even y. The accumulator below records the
//! per-step negations so the signing engine can correct each share secret
//! (`state`) and the aggregator can correct the summed tweak (`tweak`)
//! without any participant reconstructing the group secret.

use digest::Digest;
use generic_ec::{NonZero, Point, Scalar};

use crate::{
    ciphersuite,
    errors::{ValidationError, ValidationReason},
    Curve,
};

/// Accumulated tweak state of an x-only public key
///
/// Immutable once produced by [`apply_tweaks`].
#[derive(Debug, Clone, Copy)]
pub struct PointState {
    /// The tweaked public key
    pub point: NonZero<Point<Curve>>,
    /// `1` if [`point`](Self::point) has even y, `-1` otherwise
    ///
    /// Unlike `state`, this final parity is not folded into the accumulator:
    /// it corrects the signing equation separately.
    pub parity: Scalar<Curve>,
    /// Running product of the per-step parity corrections
    pub state: Scalar<Curve>,
    /// Running parity-corrected sum of the applied tweak scalars
    pub tweak: Scalar<Curve>,
}

impl PointState {
    /// X-only encoding of the tweaked public key
    pub fn xonly_pubkey(&self) -> Result<[u8; 32], ValidationError> {
        ciphersuite::serialize_xonly(&self.point)
    }
}

/// Applies a sequence of additive tweaks to a public key
///
/// Each round negates the running point if its y-coordinate is odd, adds
/// `tweak_i * BasePoint`, and folds the negation into the accumulated
/// `state`/`tweak` values. With zero tweaks the function is the identity
/// (`state = 1`, `tweak = 0`, point unchanged), except that the final parity
/// is still computed from the point's y-coordinate.
pub fn apply_tweaks(
    base: NonZero<Point<Curve>>,
    tweaks: &[Scalar<Curve>],
) -> Result<PointState, ValidationError> {
    let pos = Scalar::<Curve>::one();
    let neg = -Scalar::<Curve>::one();

    let mut point = base;
    let mut state = pos;
    let mut tweak = Scalar::<Curve>::zero();

    for t in tweaks {
        let parity = if ciphersuite::is_even_y(&point) {
            pos
        } else {
            neg
        };
        let negated = *point * parity;
        let tweaked = negated + Point::generator() * *t;
        point = NonZero::from_point(tweaked).ok_or(ValidationReason::ZeroPoint)?;

        state *= parity;
        tweak = *t + parity * tweak;
    }

    let parity = if ciphersuite::is_even_y(&point) {
        pos
    } else {
        neg
    };

    Ok(PointState {
        point,
        parity,
        state,
        tweak,
    })
}

/// Calculates the BIP-341 taproot tweak for a public key and merkle root
///
/// Returns `None` if the tweak is not defined for the given input
/// (probability of that is negligible).
pub fn taproot_tweak(
    public_key: &NonZero<Point<Curve>>,
    merkle_root: Option<[u8; 32]>,
) -> Option<Scalar<Curve>> {
    let xonly = ciphersuite::serialize_xonly(public_key).ok()?;
    let hash = ciphersuite::tagged_hash("TapTweak")
        .chain_update(xonly)
        .chain_update(if let Some(root) = &merkle_root {
            root.as_slice()
        } else {
            &[]
        })
        .finalize();
    Scalar::from_be_bytes(hash).ok()
}
