//! Round 1 - Nonce commitments
//!
//! Each signer generates a pair of secret nonces (`hiding`, `binding`) and
//! broadcasts their public points. A commitment bundle must be used for
//! exactly one signing attempt: reusing nonces across sessions leaks the
//! secret share.
//!
//! For more details refer to [Section 5.1] of the FROST draft.
//!
//! [Section 5.1]: https://www.ietf.org/archive/id/draft-irtf-cfrg-frost-15.html#name-round-one-commitment

use generic_ec::{Point, SecretScalar};
use rand_core::{CryptoRng, RngCore};

use crate::{ciphersuite, vss::SecretShare, Curve, ShareIndex};

/// Secret half of a nonce commitment
///
/// Never leaves the signer that generated it. **Never reuse nonces!**
#[derive(Debug, Clone)]
pub struct SecretNonces {
    /// Index of the share the nonces were generated for
    pub index: ShareIndex,
    /// Hiding nonce
    pub hiding_nonce: SecretScalar<Curve>,
    /// Binding nonce
    pub binding_nonce: SecretScalar<Curve>,
}

impl SecretNonces {
    /// Public points matching the secret nonces
    pub fn public_nonces(&self) -> PublicNonces {
        PublicNonces {
            index: self.index,
            hiding_comm: Point::generator() * &self.hiding_nonce,
            binding_comm: Point::generator() * &self.binding_nonce,
        }
    }
}

/// Public half of a nonce commitment, broadcast to every other signer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicNonces {
    /// Index of the signer that produced the commitment
    pub index: ShareIndex,
    /// Commitment to the hiding nonce
    pub hiding_comm: Point<Curve>,
    /// Commitment to the binding nonce
    pub binding_comm: Point<Curve>,
}

/// Derives a secret nonce from a share secret and a 32-byte seed
///
/// Computes `H3(seed || share_secret)` with the `nonce` domain suffix. The
/// seed is taken from `rng` unless the caller supplies one; a caller-supplied
/// seed makes the nonce deterministic, which is useful for rebuilding a
/// commitment from an exported secret package.
pub fn generate_nonce(
    rng: &mut (impl RngCore + CryptoRng),
    secret: &SecretScalar<Curve>,
    seed: Option<[u8; 32]>,
) -> SecretScalar<Curve> {
    let seed = seed.unwrap_or_else(|| {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        bytes
    });
    let secret_bytes = ciphersuite::serialize_scalar(secret.as_ref());
    let mut nonce = ciphersuite::h3(&[seed.as_slice(), secret_bytes.as_bytes()]);
    SecretScalar::new(&mut nonce)
}

/// Produces a one-session nonce commitment bundle for one signer
pub fn commit(
    rng: &mut (impl RngCore + CryptoRng),
    share: &SecretShare,
) -> (SecretNonces, PublicNonces) {
    commit_with_seeds(rng, share, None, None)
}

/// [`commit`] with caller-controlled nonce seeds
///
/// Passing `Some(seed)` for both halves makes the bundle deterministic;
/// seeds must then be single-use and kept as secret as the share itself.
pub fn commit_with_seeds(
    rng: &mut (impl RngCore + CryptoRng),
    share: &SecretShare,
    hiding_seed: Option<[u8; 32]>,
    binding_seed: Option<[u8; 32]>,
) -> (SecretNonces, PublicNonces) {
    let secret = SecretNonces {
        index: share.index,
        hiding_nonce: generate_nonce(rng, &share.secret, hiding_seed),
        binding_nonce: generate_nonce(rng, &share.secret, binding_seed),
    };
    let public = secret.public_nonces();
    (secret, public)
}
