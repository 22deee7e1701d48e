//! Immutable signing session context
//!
//! Every signer and the Coordinator derive the same [`SessionContext`] from
//! the group key, the chosen commitment set, and the message. Since the
//! derivation is deterministic, no extra communication round is needed for
//! the participants to agree on the binding factors and the challenge.

use core::fmt;

use generic_ec::{NonZero, Point, Scalar};

use crate::{
    ciphersuite,
    errors::{AggregationError, ValidationError, ValidationReason},
    tweak::{self, PointState},
    Curve, ShareIndex,
};

use super::{round1::PublicNonces, utils};

/// The group key with all session tweaks applied
#[derive(Debug, Clone, Copy)]
pub struct KeyContext {
    /// The untweaked group key as decoded from its input encoding
    pub internal_key: NonZero<Point<Curve>>,
    /// Tweak accumulator over the internal key
    pub state: PointState,
}

impl KeyContext {
    /// The tweaked group public key
    pub fn group_pubkey(&self) -> NonZero<Point<Curve>> {
        self.state.point
    }

    /// X-only encoding of the tweaked group public key
    pub fn xonly_pubkey(&self) -> Result<[u8; 32], ValidationError> {
        self.state.xonly_pubkey()
    }
}

/// Decodes a group key and applies a sequence of additive tweaks to it
///
/// The key may be encoded x-only (32 bytes, even y-coordinate implied) or
/// compressed (33 bytes, parity byte honored). An odd-y key is handled by
/// the parity accumulator, not rejected.
pub fn build_key_context(
    group_pk: &[u8],
    tweaks: &[Scalar<Curve>],
) -> Result<KeyContext, ValidationError> {
    let internal_key = ciphersuite::lift_x(group_pk)?;
    let state = tweak::apply_tweaks(internal_key, tweaks)?;
    Ok(KeyContext {
        internal_key,
        state,
    })
}

/// Everything the signing rounds need to know about one session
///
/// Immutable once built. A new message, commitment set, or tweak sequence
/// requires a fresh context (and fresh nonces).
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// The tweaked group key the session signs for
    pub key: KeyContext,
    /// Nonce commitments of the participating signers, ascending by index
    pub nonces: Vec<PublicNonces>,
    /// One binding factor per participant
    pub binding_factors: Vec<utils::BindingFactor>,
    /// The aggregated group nonce `R`
    pub group_nonce: NonZero<Point<Curve>>,
    /// The BIP-340 challenge of the session
    pub challenge: Scalar<Curve>,
    /// Indices of the participating signers, ascending
    pub indices: Vec<ShareIndex>,
    /// The message being signed
    pub message: Vec<u8>,
}

/// Derives the session context from the key, the commitments, and the message
///
/// Sorts the commitments by signer index and rejects zero or duplicate
/// indices. Deterministic: every honest participant obtains a bitwise
/// identical context.
pub fn build_session_context(
    key: KeyContext,
    nonces: &[PublicNonces],
    message: &[u8],
) -> Result<SessionContext, SessionError> {
    let mut nonces = nonces.to_vec();
    nonces.sort_unstable_by_key(|nonce| nonce.index);
    for pair in nonces.windows(2) {
        if pair[0].index == pair[1].index {
            return Err(Reason::Validation(
                ValidationReason::DuplicateSigner(pair[0].index).into(),
            )
            .into());
        }
    }
    if nonces.iter().any(|nonce| nonce.index == 0) {
        return Err(Reason::Validation(ValidationReason::UnknownSigner(0).into()).into());
    }

    let group_pk = key.group_pubkey();
    let prefix = utils::commit_prefix(&nonces, &group_pk, message);
    let binding_factors = utils::binding_factors(&nonces, &prefix);
    let group_nonce =
        utils::aggregate_group_nonce(&nonces, &binding_factors).map_err(Reason::Aggregation)?;
    let challenge =
        utils::bip340_challenge(&group_nonce, &group_pk, message).map_err(Reason::Validation)?;

    let indices = nonces.iter().map(|nonce| nonce.index).collect();
    Ok(SessionContext {
        key,
        nonces,
        binding_factors,
        group_nonce,
        challenge,
        indices,
        message: message.to_vec(),
    })
}

/// Session derivation error
#[derive(Debug)]
pub struct SessionError(Reason);

#[derive(Debug)]
enum Reason {
    Validation(ValidationError),
    Aggregation(AggregationError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Reason::Validation(_) => f.write_str("commitment set is malformed"),
            Reason::Aggregation(_) => f.write_str("group nonce aggregation failed"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Reason::Validation(err) => Some(err),
            Reason::Aggregation(err) => Some(err),
        }
    }
}

impl From<Reason> for SessionError {
    fn from(err: Reason) -> Self {
        Self(err)
    }
}
