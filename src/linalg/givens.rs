//! Givens plane rotations applied in place through mutable views.

use crate::matrix::MatrixViewMut;
use crate::predicates;
use crate::traits::LinalgScalar;

/// Rotation parameters `(c, s)` zeroing the second entry of the pair
/// `(a, b)`.
///
/// Computed with the ratio form so neither `a²` nor `b²` is formed
/// directly; the larger modulus divides the smaller. Applying the
/// rotation to the pair maps it to `(r, 0)` with `r² = a² + b²`.
///
/// ```
/// use lamina::linalg::rotation;
///
/// let (c, s) = rotation(3.0_f64, 4.0);
/// assert!((c - 0.6).abs() < 1e-12);
/// assert!((s - 0.8).abs() < 1e-12);
/// // The pair rotates onto its norm.
/// assert!((c * 3.0 + s * 4.0 - 5.0).abs() < 1e-12);
/// assert!((c * 4.0 - s * 3.0).abs() < 1e-12);
/// ```
pub fn rotation<T: LinalgScalar>(a: T, b: T) -> (T, T) {
    if predicates::is_zero(b) {
        (T::one(), T::zero())
    } else if b.modulus() > a.modulus() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).lsqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).lsqrt();
        (c, c * t)
    }
}

/// Left-multiply by the rotation: mix rows `i` and `j` of the view in
/// place.
///
/// `row_i ← c·row_i + s·row_j`, `row_j ← c·row_j − s·row_i`. With
/// parameters from [`rotation`]`(m[i][k], m[j][k])` this zeroes the
/// `(j, k)` entry while preserving every column norm — the sub-diagonal
/// elimination step of the bidiagonal sweep, mirrored into `U` with
/// [`apply_right`].
pub fn apply_left<T: LinalgScalar>(view: &mut MatrixViewMut<'_, T>, i: usize, j: usize, c: T, s: T) {
    assert!(
        i < view.nrows() && j < view.nrows(),
        "rotation rows ({}, {}) out of bounds for {}x{} view",
        i,
        j,
        view.nrows(),
        view.ncols(),
    );
    assert!(i != j, "rotation rows must be distinct");
    for k in 0..view.ncols() {
        let vi = view.get(i, k);
        let vj = view.get(j, k);
        view.set(i, k, c * vi + s * vj);
        view.set(j, k, c * vj - s * vi);
    }
}

/// Right-multiply by the rotation: mix columns `i` and `j` of the view in
/// place.
///
/// `col_i ← c·col_i + s·col_j`, `col_j ← c·col_j − s·col_i`. The inverse
/// of [`apply_left`] with the same parameters, so a left/right pair
/// leaves a matrix product unchanged while reshaping one factor.
pub fn apply_right<T: LinalgScalar>(
    view: &mut MatrixViewMut<'_, T>,
    i: usize,
    j: usize,
    c: T,
    s: T,
) {
    assert!(
        i < view.ncols() && j < view.ncols(),
        "rotation columns ({}, {}) out of bounds for {}x{} view",
        i,
        j,
        view.nrows(),
        view.ncols(),
    );
    assert!(i != j, "rotation columns must be distinct");
    for k in 0..view.nrows() {
        let vi = view.get(k, i);
        let vj = view.get(k, j);
        view.set(k, i, c * vi + s * vj);
        view.set(k, j, c * vj - s * vi);
    }
}
