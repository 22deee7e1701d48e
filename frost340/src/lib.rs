//! Threshold Schnorr signatures over secp256k1, based on [FROST IETF Draft][draft]
//!
//! FROST is state of art protocol for Threshold Schnorr Signatures that supports 1-round
//! signing (requires signers to [commit nonces](signing::round1) ahead of time). This crate
//! instantiates the FROST(secp256k1, SHA-256) suite and always emits plain 64-byte [BIP-340]
//! signatures verifiable against an x-only public key, including after [taproot
//! tweaking](tweak).
//!
//! This crate provides:
//! * [Shamir secret sharing with feldman commitments](vss) \
//!   The building blocks double as a dealerless DKG: every participant deals locally and the
//!   sub-shares are folded with [vss::combine_shares].
//! * [Trusted dealer](trusted_dealer) (importing key into TSS)
//! * [FROST signing](signing), carried out manually phase by phase
//! * [Proactive share refresh](refresh), [cooperative share repair](repair), and
//!   [threshold ECDH](ecdh)
//! * [Bech32m import/export packages](pkg)
//!
//! This crate doesn't provide:
//! * Networking or any other transport between the participants
//! * Identifiable abort
//!
//! [draft]: https://www.ietf.org/archive/id/draft-irtf-cfrg-frost-15.html
//! [BIP-340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

#![forbid(unsafe_code, unused_crate_dependencies)]
#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use generic_ec;

pub mod ciphersuite;
pub mod ecdh;
pub mod errors;
pub mod pkg;
pub mod poly;
pub mod refresh;
pub mod repair;
pub mod signing;
pub mod trusted_dealer;
pub mod tweak;
pub mod vss;

/// The curve every type in this crate is instantiated with
pub type Curve = generic_ec::curves::Secp256k1;

/// Share index
///
/// 1-based: index 0 addresses the group secret itself and is rejected
/// everywhere a participant index is expected.
pub type ShareIndex = u16;

pub use self::{
    signing::aggregate::Signature,
    tweak::PointState,
    vss::{SecretShare, VssCommitments},
};
