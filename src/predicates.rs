//! Tolerance-based numeric predicates and structural matrix checks.
//!
//! Every comparison in the crate that has to survive floating-point noise
//! goes through this module: operator `==` on matrices and views, the
//! zero-rounding pass after each factorization step, the normalization
//! guard, and the optional convergence tests. They all share the single
//! [`tolerance`] constant so "equal", "zero", and "converged" mean the
//! same thing everywhere.

use crate::matrix::MatrixView;
use crate::traits::{FloatScalar, LinalgScalar};
use num_traits::{Float, Zero};

/// The fixed comparison tolerance for a real scalar type.
///
/// `sqrt(machine epsilon)`: ≈1.5e-8 for `f64`, ≈3.5e-4 for `f32`. Loose
/// enough that the fixed-count iterative loops settle inside it at their
/// default budgets, and derived from the type so `f32` keeps a
/// proportionate margin.
///
/// ```
/// use lamina::predicates::tolerance;
/// assert!(tolerance::<f64>() < 1e-7);
/// assert!(tolerance::<f64>() > 1e-9);
/// ```
#[inline]
pub fn tolerance<R: FloatScalar>() -> R {
    R::epsilon().sqrt()
}

/// Whether two scalars are equal within [`tolerance`].
///
/// ```
/// use lamina::predicates::is_equal;
/// assert!(is_equal(1.0_f64, 1.0 + 1e-12));
/// assert!(!is_equal(1.0_f64, 1.001));
/// ```
#[inline]
pub fn is_equal<T: LinalgScalar>(lhs: T, rhs: T) -> bool {
    (lhs - rhs).modulus() < tolerance::<T::Real>()
}

/// Whether a scalar's modulus is inside [`tolerance`].
#[inline]
pub fn is_zero<T: LinalgScalar>(value: T) -> bool {
    value.modulus() < tolerance::<T::Real>()
}

/// Unit-modulus direction of a scalar: `x / |x|`.
///
/// `±1` for reals, a unit phase for complex values, and `0` for values
/// inside the zero tolerance.
///
/// ```
/// use lamina::predicates::sign;
/// assert_eq!(sign(-3.5_f64), -1.0);
/// assert_eq!(sign(2.0_f64), 1.0);
/// assert_eq!(sign(0.0_f64), 0.0);
/// ```
#[inline]
pub fn sign<T: LinalgScalar>(value: T) -> T {
    if is_zero(value) {
        T::zero()
    } else {
        value / T::from_real(value.modulus())
    }
}

/// Whether a view is square and equal to its own conjugate transpose.
///
/// For real scalars this is a plain symmetry test.
pub fn is_hermitian<T: LinalgScalar>(view: MatrixView<'_, T>) -> bool {
    if view.nrows() != view.ncols() {
        return false;
    }
    for i in 0..view.nrows() {
        for j in 0..=i {
            if !is_equal(view.get(i, j), view.get(j, i).conj()) {
                return false;
            }
        }
    }
    true
}

/// Whether every entry outside the main and first super-diagonal is zero.
pub fn is_bidiagonal<T: LinalgScalar>(view: MatrixView<'_, T>) -> bool {
    let mut ok = true;
    view.for_each_indexed(|value, i, j| {
        if j != i && j != i + 1 && !is_zero(value) {
            ok = false;
        }
    });
    ok
}

/// Whether every entry below the main diagonal is zero.
pub fn is_upper_triangular<T: LinalgScalar>(view: MatrixView<'_, T>) -> bool {
    let mut ok = true;
    view.for_each_indexed(|value, i, j| {
        if j < i && !is_zero(value) {
            ok = false;
        }
    });
    ok
}

/// Whether every off-diagonal entry is zero.
pub fn is_diagonal<T: LinalgScalar>(view: MatrixView<'_, T>) -> bool {
    let mut ok = true;
    view.for_each_indexed(|value, i, j| {
        if i != j && !is_zero(value) {
            ok = false;
        }
    });
    ok
}

/// Frobenius mass of the off-diagonal part of a view.
///
/// The convergence measure behind [`crate::linalg::Termination::Converged`]:
/// the iterative loops are done when this drops inside [`tolerance`].
pub fn off_diagonal_norm<T: LinalgScalar>(view: MatrixView<'_, T>) -> T::Real {
    let mut sum = <T::Real as Zero>::zero();
    view.for_each_indexed(|value, i, j| {
        if i != j {
            let m = value.modulus();
            sum = sum + m * m;
        }
    });
    sum.lsqrt()
}
