//! FROST threshold signing
//!
//! The protocol is carried out manually, phase by phase. We assume presence
//! of a Coordinator; it can be either some entity in the system, or it could
//! be implemented as some sort of consensus protocol between the signers.
//!
//! 1. Each signer commits nonces via [round1::commit] \
//!    Message to be signed doesn't need to be known at this point yet. \
//!    Outputs [round1::SecretNonces] that are kept private and
//!    [round1::PublicNonces] that are sent to the Coordinator.
//! 2. Coordinator receives a request to sign `msg`. It chooses a set of
//!    signers, collects one commitment per signer, and everyone derives the
//!    same immutable [session::SessionContext] from the group key, the
//!    commitments, and the message.
//! 3. Each signer signs via [round2::sign] using its secret share and the
//!    secret nonces matching the commitment the Coordinator chose. Secret
//!    nonces must be deleted afterwards and never used again.
//! 4. Coordinator verifies each share with [round2::verify_partial]
//!    (excluding misbehaving signers and retrying with another quorum if
//!    needed) and aggregates via [aggregate::aggregate] into a plain BIP-340
//!    signature.

pub mod aggregate;
pub mod round1;
pub mod round2;
pub mod session;
pub mod utils;
