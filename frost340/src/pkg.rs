//! Bech32m package encoding
//!
//! Two export formats tie a dealt group together: the public [`GroupPackage`]
//! carries the group key and one commitment record per member, the private
//! [`SecretPackage`] carries one member's share and the nonce seeds that
//! deterministically rebuild the commitments recorded in the group package.
//! Both are encoded as bech32m strings with distinct human-readable
//! prefixes, so a secret package can never be mistaken for a public one.

use bech32::{Bech32m, Hrp};
use generic_ec::{NonZero, Point, Scalar, SecretScalar};
use rand_core::{CryptoRng, RngCore};

use crate::{
    ciphersuite,
    errors::{SerializationError, SerializationReason},
    signing::round1,
    trusted_dealer::DealerGroup,
    vss::SecretShare,
    Curve, ShareIndex,
};

const GROUP_HRP: Hrp = Hrp::parse_unchecked("fgroup");
const SECRET_HRP: Hrp = Hrp::parse_unchecked("fsecret");

/// Public commitment record of one group member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRecord {
    /// Member index
    pub index: ShareIndex,
    /// Commitment to the member's hiding nonce
    pub hiding_comm: Point<Curve>,
    /// Commitment to the member's binding nonce
    pub binding_comm: Point<Curve>,
    /// The member's share public key
    pub public_key: Point<Curve>,
}

impl From<&MemberRecord> for round1::PublicNonces {
    fn from(record: &MemberRecord) -> Self {
        Self {
            index: record.index,
            hiding_comm: record.hiding_comm,
            binding_comm: record.binding_comm,
        }
    }
}

/// Public description of a dealt group, safe to share with anyone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPackage {
    /// The group public key
    pub group_pk: NonZero<Point<Curve>>,
    /// Number of shares required to sign
    pub threshold: u16,
    /// One commitment record per member, ascending by index
    pub commits: Vec<MemberRecord>,
}

/// One member's private material, never shared with anyone
///
/// The nonce seeds rebuild the member's first nonce commitments via
/// [`round1::commit_with_seeds`]; they are single-use, like the nonces they
/// derive.
#[derive(Debug, Clone)]
pub struct SecretPackage {
    /// Member index
    pub index: ShareIndex,
    /// The member's secret share
    pub secret: SecretScalar<Curve>,
    /// Seed of the hiding nonce
    pub hiding_seed: [u8; 32],
    /// Seed of the binding nonce
    pub binding_seed: [u8; 32],
}

impl SecretPackage {
    /// The secret share held by the package
    pub fn share(&self) -> SecretShare {
        SecretShare {
            index: self.index,
            secret: self.secret.clone(),
        }
    }
}

/// Packages a dealt group for distribution
///
/// Draws one pair of nonce seeds per member from `rng` and records the
/// matching commitments in the group package, so the members can run their
/// first signing session straight from the packages.
pub fn create_group_packages(
    rng: &mut (impl RngCore + CryptoRng),
    group: &DealerGroup,
) -> (GroupPackage, Vec<SecretPackage>) {
    let mut commits = Vec::with_capacity(group.shares.len());
    let mut secrets = Vec::with_capacity(group.shares.len());

    for share in &group.shares {
        let mut hiding_seed = [0u8; 32];
        let mut binding_seed = [0u8; 32];
        rng.fill_bytes(&mut hiding_seed);
        rng.fill_bytes(&mut binding_seed);

        let (_, public) =
            round1::commit_with_seeds(rng, share, Some(hiding_seed), Some(binding_seed));
        commits.push(MemberRecord {
            index: share.index,
            hiding_comm: public.hiding_comm,
            binding_comm: public.binding_comm,
            public_key: share.public_key(),
        });
        secrets.push(SecretPackage {
            index: share.index,
            secret: share.secret.clone(),
            hiding_seed,
            binding_seed,
        });
    }

    let package = GroupPackage {
        group_pk: group.group_pubkey,
        threshold: group.threshold,
        commits,
    };
    (package, secrets)
}

impl GroupPackage {
    /// Encodes the package as a bech32m string with the `fgroup` prefix
    pub fn encode(&self) -> Result<String, SerializationError> {
        let mut data = Vec::with_capacity(33 + 2 + 2 + self.commits.len() * (2 + 33 * 3));
        data.extend_from_slice(ciphersuite::serialize_point(&self.group_pk).as_bytes());
        data.extend_from_slice(&self.threshold.to_be_bytes());
        let count = u16::try_from(self.commits.len()).map_err(|_| {
            SerializationError::from(SerializationReason::InvalidLength {
                expected: usize::from(u16::MAX),
                actual: self.commits.len(),
            })
        })?;
        data.extend_from_slice(&count.to_be_bytes());
        for record in &self.commits {
            data.extend_from_slice(&record.index.to_be_bytes());
            data.extend_from_slice(ciphersuite::serialize_point(&record.hiding_comm).as_bytes());
            data.extend_from_slice(ciphersuite::serialize_point(&record.binding_comm).as_bytes());
            data.extend_from_slice(ciphersuite::serialize_point(&record.public_key).as_bytes());
        }
        bech32::encode::<Bech32m>(GROUP_HRP, &data)
            .map_err(|err| SerializationReason::Bech32Encode(err).into())
    }

    /// Decodes a package from its bech32m encoding
    pub fn decode(encoded: &str) -> Result<Self, SerializationError> {
        let (hrp, data) =
            bech32::decode(encoded).map_err(SerializationReason::Bech32)?;
        if hrp != GROUP_HRP {
            return Err(SerializationReason::WrongHrp.into());
        }

        let mut cursor = Cursor::new(&data);
        let group_pk = NonZero::from_point(cursor.point()?)
            .ok_or(SerializationReason::InvalidPoint)?;
        let threshold = cursor.u16()?;
        let count = cursor.u16()?;
        let mut commits = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            commits.push(MemberRecord {
                index: cursor.u16()?,
                hiding_comm: cursor.point()?,
                binding_comm: cursor.point()?,
                public_key: cursor.point()?,
            });
        }
        cursor.finish()?;

        Ok(Self {
            group_pk,
            threshold,
            commits,
        })
    }
}

impl SecretPackage {
    /// Encodes the package as a bech32m string with the `fsecret` prefix
    ///
    /// The output contains the share secret. Handle it like a private key.
    pub fn encode(&self) -> Result<String, SerializationError> {
        let mut data = Vec::with_capacity(2 + 32 * 3);
        data.extend_from_slice(&self.index.to_be_bytes());
        data.extend_from_slice(ciphersuite::serialize_scalar(self.secret.as_ref()).as_bytes());
        data.extend_from_slice(&self.hiding_seed);
        data.extend_from_slice(&self.binding_seed);
        bech32::encode::<Bech32m>(SECRET_HRP, &data)
            .map_err(|err| SerializationReason::Bech32Encode(err).into())
    }

    /// Decodes a package from its bech32m encoding
    pub fn decode(encoded: &str) -> Result<Self, SerializationError> {
        let (hrp, data) =
            bech32::decode(encoded).map_err(SerializationReason::Bech32)?;
        if hrp != SECRET_HRP {
            return Err(SerializationReason::WrongHrp.into());
        }

        let mut cursor = Cursor::new(&data);
        let index = cursor.u16()?;
        let mut secret = cursor.scalar()?;
        let secret = SecretScalar::new(&mut secret);
        let hiding_seed = cursor.array()?;
        let binding_seed = cursor.array()?;
        cursor.finish()?;

        Ok(Self {
            index,
            secret,
            hiding_seed,
            binding_seed,
        })
    }
}

/// Byte reader over a decoded payload
struct Cursor<'a> {
    data: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], SerializationError> {
        if self.data.len() < len {
            return Err(SerializationReason::Truncated.into());
        }
        let (head, tail) = self.data.split_at(len);
        self.data = tail;
        Ok(head)
    }

    fn u16(&mut self) -> Result<u16, SerializationError> {
        let bytes = self.take(2)?;
        let bytes: [u8; 2] = bytes
            .try_into()
            .map_err(|_| SerializationError::from(SerializationReason::Truncated))?;
        Ok(u16::from_be_bytes(bytes))
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], SerializationError> {
        self.take(N)?
            .try_into()
            .map_err(|_| SerializationReason::Truncated.into())
    }

    fn point(&mut self) -> Result<Point<Curve>, SerializationError> {
        Point::from_bytes(self.take(33)?)
            .map_err(|_| SerializationReason::InvalidPoint.into())
    }

    fn scalar(&mut self) -> Result<Scalar<Curve>, SerializationError> {
        Scalar::from_be_bytes(self.take(32)?)
            .map_err(|_| SerializationReason::InvalidScalar.into())
    }

    fn finish(self) -> Result<(), SerializationError> {
        if self.data.is_empty() {
            Ok(())
        } else {
            Err(SerializationReason::TrailingBytes.into())
        }
    }
}
