//! Bulk operators over matrices and views.
//!
//! Everything here is built on the elementwise traversal primitives:
//! compound assignment mutates the owning matrix in place, the binary
//! operators materialize a fresh [`Matrix`] (copy, then compound-assign),
//! and equality walks elements through the fixed-tolerance predicate,
//! stopping at the first mismatch.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use super::view::MatrixView;
use super::Matrix;
use crate::predicates;
use crate::traits::LinalgScalar;

// ── Shared kernels ──────────────────────────────────────────────────

fn check_same_shape<T: LinalgScalar>(lhs: &Matrix<T>, rhs: MatrixView<'_, T>, op: &str) {
    assert!(
        lhs.nrows() == rhs.nrows() && lhs.ncols() == rhs.ncols(),
        "dimension mismatch: {}x{} {} {}x{}",
        lhs.nrows(),
        lhs.ncols(),
        op,
        rhs.nrows(),
        rhs.ncols(),
    );
}

fn eq_views<T: LinalgScalar>(lhs: MatrixView<'_, T>, rhs: MatrixView<'_, T>) -> bool {
    if lhs.nrows() != rhs.nrows() || lhs.ncols() != rhs.ncols() {
        return false;
    }
    for i in 0..lhs.nrows() {
        for j in 0..lhs.ncols() {
            if !predicates::is_equal(lhs.get(i, j), rhs.get(i, j)) {
                return false;
            }
        }
    }
    true
}

fn add_views<T: LinalgScalar>(lhs: MatrixView<'_, T>, rhs: MatrixView<'_, T>) -> Matrix<T> {
    let mut res = Matrix::from(lhs);
    res += rhs;
    res
}

fn sub_views<T: LinalgScalar>(lhs: MatrixView<'_, T>, rhs: MatrixView<'_, T>) -> Matrix<T> {
    let mut res = Matrix::from(lhs);
    res -= rhs;
    res
}

fn mul_views<T: LinalgScalar>(lhs: MatrixView<'_, T>, rhs: MatrixView<'_, T>) -> Matrix<T> {
    assert_eq!(
        lhs.ncols(),
        rhs.nrows(),
        "dimension mismatch: {}x{} * {}x{}",
        lhs.nrows(),
        lhs.ncols(),
        rhs.nrows(),
        rhs.ncols(),
    );
    if lhs.nrows() == 0 || rhs.ncols() == 0 {
        return Matrix::default();
    }
    let mut res = Matrix::zeros(lhs.nrows(), rhs.ncols());
    for i in 0..lhs.nrows() {
        for j in 0..rhs.ncols() {
            let mut sum = T::zero();
            for k in 0..lhs.ncols() {
                sum = sum + lhs.get(i, k) * rhs.get(k, j);
            }
            res[(i, j)] = sum;
        }
    }
    res.round_zeroes();
    res
}

// ── Equality ────────────────────────────────────────────────────────

impl<T: LinalgScalar> PartialEq for Matrix<T> {
    /// Tolerance-based elementwise equality; shape mismatch is `false`.
    fn eq(&self, other: &Self) -> bool {
        eq_views(self.view(), other.view())
    }
}

impl<T: LinalgScalar> PartialEq<MatrixView<'_, T>> for Matrix<T> {
    fn eq(&self, other: &MatrixView<'_, T>) -> bool {
        eq_views(self.view(), *other)
    }
}

impl<T: LinalgScalar> PartialEq<Matrix<T>> for MatrixView<'_, T> {
    fn eq(&self, other: &Matrix<T>) -> bool {
        eq_views(*self, other.view())
    }
}

impl<'b, T: LinalgScalar> PartialEq<MatrixView<'b, T>> for MatrixView<'_, T> {
    fn eq(&self, other: &MatrixView<'b, T>) -> bool {
        eq_views(*self, *other)
    }
}

// ── Compound assignment ─────────────────────────────────────────────

impl<T: LinalgScalar> AddAssign<MatrixView<'_, T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: MatrixView<'_, T>) {
        check_same_shape(self, rhs, "+=");
        self.apply_indexed(|value, i, j| *value = *value + rhs.get(i, j));
    }
}

impl<T: LinalgScalar> AddAssign<&Matrix<T>> for Matrix<T> {
    fn add_assign(&mut self, rhs: &Matrix<T>) {
        *self += rhs.view();
    }
}

impl<T: LinalgScalar> SubAssign<MatrixView<'_, T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: MatrixView<'_, T>) {
        check_same_shape(self, rhs, "-=");
        self.apply_indexed(|value, i, j| *value = *value - rhs.get(i, j));
    }
}

impl<T: LinalgScalar> SubAssign<&Matrix<T>> for Matrix<T> {
    fn sub_assign(&mut self, rhs: &Matrix<T>) {
        *self -= rhs.view();
    }
}

impl<T: LinalgScalar> MulAssign<&Matrix<T>> for Matrix<T> {
    fn mul_assign(&mut self, rhs: &Matrix<T>) {
        *self = mul_views(self.view(), rhs.view());
    }
}

// ── Addition / subtraction ──────────────────────────────────────────

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $kernel:ident) => {
        impl<'b, T: LinalgScalar> $trait<MatrixView<'b, T>> for MatrixView<'_, T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: MatrixView<'b, T>) -> Matrix<T> {
                $kernel(self, rhs)
            }
        }

        impl<T: LinalgScalar> $trait<MatrixView<'_, T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: MatrixView<'_, T>) -> Matrix<T> {
                $kernel(self.view(), rhs)
            }
        }

        impl<T: LinalgScalar> $trait<&Matrix<T>> for MatrixView<'_, T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                $kernel(self, rhs.view())
            }
        }

        impl<T: LinalgScalar> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                $kernel(self.view(), rhs.view())
            }
        }

        impl<T: LinalgScalar> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                $kernel(self.view(), rhs.view())
            }
        }

        impl<T: LinalgScalar> $trait<Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                $kernel(self.view(), rhs.view())
            }
        }

        impl<T: LinalgScalar> $trait<Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                $kernel(self.view(), rhs.view())
            }
        }
    };
}

impl_binary_op!(Add, add, add_views);
impl_binary_op!(Sub, sub, sub_views);
impl_binary_op!(Mul, mul, mul_views);

// ── Scalar operations ───────────────────────────────────────────────

impl<T: LinalgScalar> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, scalar: T) {
        self.apply(|value| *value = *value * scalar);
    }
}

impl<T: LinalgScalar> DivAssign<T> for Matrix<T> {
    fn div_assign(&mut self, scalar: T) {
        self.apply(|value| *value = *value / scalar);
    }
}

impl<T: LinalgScalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, scalar: T) -> Matrix<T> {
        let mut res = self.clone();
        res *= scalar;
        res
    }
}

impl<T: LinalgScalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;
    fn mul(mut self, scalar: T) -> Matrix<T> {
        self *= scalar;
        self
    }
}

impl<T: LinalgScalar> Mul<T> for MatrixView<'_, T> {
    type Output = Matrix<T>;
    fn mul(self, scalar: T) -> Matrix<T> {
        Matrix::from(self) * scalar
    }
}

impl<T: LinalgScalar> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;
    fn div(self, scalar: T) -> Matrix<T> {
        let mut res = self.clone();
        res /= scalar;
        res
    }
}

impl<T: LinalgScalar> Div<T> for Matrix<T> {
    type Output = Matrix<T>;
    fn div(mut self, scalar: T) -> Matrix<T> {
        self /= scalar;
        self
    }
}

impl<T: LinalgScalar> Div<T> for MatrixView<'_, T> {
    type Output = Matrix<T>;
    fn div(self, scalar: T) -> Matrix<T> {
        Matrix::from(self) / scalar
    }
}
