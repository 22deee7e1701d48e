//! Polynomial arithmetic over the scalar field
//!
//! Everything in this module works mod the group order. A polynomial is a
//! list of coefficients in ascending order of powers; coefficient 0 is the
//! shared secret, which is why `x = 0` is never a valid evaluation point.

use generic_ec::{NonZero, Scalar};

use crate::{
    errors::{DomainError, DomainReason},
    Curve,
};

/// Evaluates a polynomial at `x` using Horner's method
///
/// `coeffs` are in ascending order of powers: `coeffs[0] + coeffs[1]*x + ...`.
/// Fails if `x == 0`, which is reserved for the secret itself.
pub fn evaluate_at(
    coeffs: &[Scalar<Curve>],
    x: &Scalar<Curve>,
) -> Result<Scalar<Curve>, DomainError> {
    let x = NonZero::from_scalar(*x).ok_or(DomainReason::ZeroEvaluationPoint)?;

    let mut value = Scalar::<Curve>::zero();
    for coeff in coeffs.iter().rev() {
        value = value * x + *coeff;
    }
    Ok(value)
}

/// Interpolates the polynomial defined by `points` and evaluates it at `x = 0`
///
/// Each entry is an `(x, y)` pair; x-coordinates must be unique. The value at
/// zero is the shared secret when the points are secret shares.
pub fn interpolate_at_zero(
    points: &[(Scalar<Curve>, Scalar<Curve>)],
) -> Result<Scalar<Curve>, DomainError> {
    if points.is_empty() {
        return Err(DomainReason::EmptySet.into());
    }
    let xs = points.iter().map(|(x, _)| *x).collect::<Vec<_>>();

    let mut acc = Scalar::<Curve>::zero();
    for (x, y) in points {
        let basis = lagrange_basis(&xs, x)?;
        acc = acc + basis * *y;
    }
    Ok(acc)
}

/// Computes the Lagrange basis coefficient at zero for the point `x`
///
/// Given the coordinate set `xs`, returns `∏_{j != x} x_j / (x_j - x)`, i.e.
/// the weight that the sample at `x` carries in the interpolated value at
/// `x = 0`. Fails if `x` is not a member of `xs` or if `xs` contains
/// duplicates.
pub fn lagrange_basis(
    xs: &[Scalar<Curve>],
    x: &Scalar<Curve>,
) -> Result<Scalar<Curve>, DomainError> {
    ensure_unique(xs)?;
    if !xs.contains(x) {
        return Err(DomainReason::NotInSet.into());
    }

    let mut num = Scalar::<Curve>::one();
    let mut denom = NonZero::<Scalar<Curve>>::one();

    for x_j in xs {
        if x_j == x {
            continue;
        }
        num *= x_j;
        // `x_j - x` is nonzero: the set is unique and `x_j != x`
        let diff = NonZero::from_scalar(x_j - x).ok_or(DomainReason::DuplicateAbscissa)?;
        denom = denom * diff;
    }

    Ok(num * denom.invert())
}

/// Computes the Lagrange coefficient of participant `self_index` toward `target`
///
/// Generalization of [`lagrange_basis`] used for share repair: summing
/// `coefficient * share_secret` over all participants reconstructs the
/// polynomial's value at `target`, which may be any index rather than only
/// zero. `others` lists the remaining participants and must not contain
/// `self_index` or duplicates.
pub fn lagrange_coefficient(
    others: &[Scalar<Curve>],
    self_index: &Scalar<Curve>,
    target: &Scalar<Curve>,
) -> Result<Scalar<Curve>, DomainError> {
    ensure_unique(others)?;
    if others.contains(self_index) {
        return Err(DomainReason::DuplicateAbscissa.into());
    }

    let mut num = Scalar::<Curve>::one();
    let mut denom = NonZero::<Scalar<Curve>>::one();

    for x_j in others {
        num *= target - x_j;
        let diff = NonZero::from_scalar(self_index - x_j).ok_or(DomainReason::DuplicateAbscissa)?;
        denom = denom * diff;
    }

    Ok(num * denom.invert())
}

/// Converts a participant index into a nonzero scalar
pub fn index_to_scalar(index: crate::ShareIndex) -> Result<NonZero<Scalar<Curve>>, DomainError> {
    NonZero::from_scalar(Scalar::from(index)).ok_or_else(|| DomainReason::ZeroIndex.into())
}

fn ensure_unique(xs: &[Scalar<Curve>]) -> Result<(), DomainError> {
    for (i, x) in xs.iter().enumerate() {
        if xs[i + 1..].contains(x) {
            return Err(DomainReason::DuplicateAbscissa.into());
        }
    }
    Ok(())
}
