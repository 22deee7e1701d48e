//! Error types shared across the protocol engine
//!
//! Contract violations (bad evaluation points, duplicate coordinate sets,
//! malformed encodings) are reported through the types below. Expected
//! cryptographic verification outcomes (a share or a partial signature
//! failing its check) are reported as `bool` by the respective functions and
//! never through these types.

use core::fmt;

use crate::ShareIndex;

/// Invalid operation over the scalar field
///
/// Returned by the polynomial engine when a caller violates its contract,
/// e.g. evaluates a polynomial at `x = 0` or interpolates over a coordinate
/// set with duplicates.
#[derive(Debug)]
pub struct DomainError(DomainReason);

#[derive(Debug)]
pub(crate) enum DomainReason {
    ZeroEvaluationPoint,
    ZeroIndex,
    DuplicateAbscissa,
    NotInSet,
    EmptySet,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            DomainReason::ZeroEvaluationPoint => {
                f.write_str("polynomial cannot be evaluated at x=0: x=0 is reserved for the secret")
            }
            DomainReason::ZeroIndex => f.write_str("participant index must not be zero"),
            DomainReason::DuplicateAbscissa => {
                f.write_str("coordinate set contains a duplicate x-coordinate")
            }
            DomainReason::NotInSet => {
                f.write_str("evaluation point is not a member of the coordinate set")
            }
            DomainReason::EmptySet => f.write_str("coordinate set is empty"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<DomainReason> for DomainError {
    fn from(err: DomainReason) -> Self {
        Self(err)
    }
}

/// A share or point failed a cryptographic well-formedness check
///
/// Covers invalid curve points, x-only encodings of unexpected length, and
/// participants unknown to the session. Note that a share failing VSS
/// verification is *not* a `ValidationError`: `verify_share` returns `false`
/// in that case.
#[derive(Debug)]
pub struct ValidationError(ValidationReason);

#[derive(Debug)]
pub(crate) enum ValidationReason {
    InvalidPoint,
    InvalidXOnly,
    ZeroPoint,
    UnknownSigner(ShareIndex),
    DuplicateSigner(ShareIndex),
    CommitmentSetMismatch { left: usize, right: usize },
    ThresholdOutOfRange { threshold: usize, commitments: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ValidationReason::InvalidPoint => f.write_str("invalid curve point"),
            ValidationReason::InvalidXOnly => {
                f.write_str("x-only encoding is not exactly 32 bytes")
            }
            ValidationReason::ZeroPoint => f.write_str("point accumulation produced the identity"),
            ValidationReason::UnknownSigner(i) => write!(f, "unknown signer with index {i}"),
            ValidationReason::DuplicateSigner(i) => {
                write!(f, "signer {i} appears more than once")
            }
            ValidationReason::CommitmentSetMismatch { left, right } => write!(
                f,
                "commitment sets have mismatched lengths: {left} != {right}"
            ),
            ValidationReason::ThresholdOutOfRange {
                threshold,
                commitments,
            } => write!(
                f,
                "threshold {threshold} exceeds the {commitments} published commitments"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationReason> for ValidationError {
    fn from(err: ValidationReason) -> Self {
        Self(err)
    }
}

/// Point or scalar accumulation yielded an empty or null result
#[derive(Debug)]
pub struct AggregationError(AggregationReason);

#[derive(Debug)]
pub(crate) enum AggregationReason {
    NoParticipants,
    NoShares,
    MissingBindingFactor(ShareIndex),
    PointAtInfinity,
    MalformedGroupNonce,
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            AggregationReason::NoParticipants => {
                f.write_str("no participants supplied to the accumulation")
            }
            AggregationReason::NoShares => f.write_str("no signature shares supplied"),
            AggregationReason::MissingBindingFactor(i) => {
                write!(f, "no binding factor computed for signer {i}")
            }
            AggregationReason::PointAtInfinity => {
                f.write_str("accumulated point is the point at infinity")
            }
            AggregationReason::MalformedGroupNonce => {
                f.write_str("group nonce has no x-only encoding")
            }
        }
    }
}

impl std::error::Error for AggregationError {}

impl From<AggregationReason> for AggregationError {
    fn from(err: AggregationReason) -> Self {
        Self(err)
    }
}

/// Not enough participants to run interpolation or recovery
#[derive(Debug)]
pub struct ThresholdError(ThresholdReason);

#[derive(Debug)]
pub(crate) enum ThresholdReason {
    TooFewParticipants { required: u16, provided: usize },
    ThresholdExceedsShares { threshold: u16, shares: u16 },
    ZeroThreshold,
    ZeroLagrangeCoefficient,
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ThresholdReason::TooFewParticipants { required, provided } => write!(
                f,
                "{provided} participants provided, at least {required} required"
            ),
            ThresholdReason::ThresholdExceedsShares { threshold, shares } => {
                write!(f, "threshold {threshold} exceeds share count {shares}")
            }
            ThresholdReason::ZeroThreshold => f.write_str("threshold must be at least 1"),
            ThresholdReason::ZeroLagrangeCoefficient => {
                f.write_str("lagrange coefficient is zero: degenerate index collision")
            }
        }
    }
}

impl std::error::Error for ThresholdError {}

impl From<ThresholdReason> for ThresholdError {
    fn from(err: ThresholdReason) -> Self {
        Self(err)
    }
}

/// Participant index differs across a commitment/share pair
#[derive(Debug)]
pub struct IndexMismatchError(IndexMismatchReason);

#[derive(Debug)]
pub(crate) enum IndexMismatchReason {
    Mismatch { left: ShareIndex, right: ShareIndex },
    EmptyShareSet,
}

impl fmt::Display for IndexMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            IndexMismatchReason::Mismatch { left, right } => {
                write!(f, "participant index mismatch: {left} != {right}")
            }
            IndexMismatchReason::EmptyShareSet => f.write_str("share set is empty"),
        }
    }
}

impl std::error::Error for IndexMismatchError {}

impl From<IndexMismatchReason> for IndexMismatchError {
    fn from(err: IndexMismatchReason) -> Self {
        Self(err)
    }
}

/// Malformed encoded package
///
/// Raised by the package codec before any protocol logic touches the input.
#[derive(Debug)]
pub struct SerializationError(SerializationReason);

#[derive(Debug)]
pub(crate) enum SerializationReason {
    Bech32(bech32::DecodeError),
    Bech32Encode(bech32::EncodeError),
    WrongHrp,
    Truncated,
    TrailingBytes,
    InvalidPoint,
    InvalidScalar,
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            SerializationReason::Bech32(_) => f.write_str("bech32m decoding failed"),
            SerializationReason::Bech32Encode(_) => f.write_str("bech32m encoding failed"),
            SerializationReason::WrongHrp => {
                f.write_str("human-readable prefix does not match the package type")
            }
            SerializationReason::Truncated => f.write_str("encoded package is truncated"),
            SerializationReason::TrailingBytes => {
                f.write_str("encoded package has trailing bytes")
            }
            SerializationReason::InvalidPoint => f.write_str("package contains an invalid point"),
            SerializationReason::InvalidScalar => f.write_str("package contains an invalid scalar"),
            SerializationReason::InvalidLength { expected, actual } => {
                write!(f, "invalid encoding length: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            SerializationReason::Bech32(err) => Some(err),
            SerializationReason::Bech32Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SerializationReason> for SerializationError {
    fn from(err: SerializationReason) -> Self {
        Self(err)
    }
}
