use crate::linalg::givens::{apply_left, apply_right, rotation};
use crate::linalg::shift::wilkinson_shift;
use crate::linalg::Termination;
use crate::matrix::{Matrix, MatrixView};
use crate::predicates::{is_bidiagonal, is_equal, is_zero, off_diagonal_norm, sign, tolerance};
use crate::traits::LinalgScalar;

/// Default step budget for the bidiagonal sweep.
pub const DEFAULT_SVD_ITERATIONS: usize = 30;

/// Result of [`bidiagonal_svd`]: `u * s * vt` reconstructs the input
/// within the comparison tolerance, `u` and `vt` are orthogonal/unitary,
/// and `s` converges toward a diagonal of non-negative singular values.
///
/// The diagonal is *not* sorted; the sweep leaves the values in whatever
/// order the rotations produce.
#[derive(Debug, Clone)]
pub struct SvdDecomposition<T> {
    pub u: Matrix<T>,
    pub s: Matrix<T>,
    pub vt: Matrix<T>,
}

/// Implicit-shift Givens sweep diagonalizing a 2×2 bidiagonal matrix,
/// with the default fixed step budget.
///
/// See [`bidiagonal_svd_with`]. Panics unless the input is exactly 2×2
/// and bidiagonal within tolerance.
///
/// ```
/// use lamina::{bidiagonal_svd, Matrix};
///
/// let b = Matrix::new(&[[3.0_f64, 1.0], [0.0, 2.0]]);
/// let svd = bidiagonal_svd(b.view());
/// assert_eq!(&svd.u * &svd.s * &svd.vt, b);
/// assert_eq!(svd.s[(0, 1)], 0.0);
/// assert!(svd.s[(0, 0)] >= 0.0 && svd.s[(1, 1)] >= 0.0);
/// ```
pub fn bidiagonal_svd<T: LinalgScalar>(b: MatrixView<'_, T>) -> SvdDecomposition<T> {
    bidiagonal_svd_with(b, Termination::FixedCount(DEFAULT_SVD_ITERATIONS))
}

/// [`bidiagonal_svd`] with an explicit iteration policy.
///
/// Every step estimates the [`wilkinson_shift`] from the trailing 2×2
/// minor of `SᵗS` and chases the resulting bulge down the band: a right
/// rotation on `S`'s columns (mirrored into `Vᵗ` from the left) folds the
/// shift in and spills below the diagonal, and a left rotation on `S`'s
/// rows (mirrored into `U` from the right) eliminates the spill. Both
/// mirrors use the same parameters as the rotation they undo, so
/// `U·S·Vᵗ` is invariant across the whole sweep. Near-zero entries are
/// snapped after each step.
///
/// The sweep body is written over `size = min(nrows, ncols)` — the shape
/// of the general algorithm — but the entry contract is the asserted
/// 2×2 operand.
pub fn bidiagonal_svd_with<T: LinalgScalar>(
    b: MatrixView<'_, T>,
    steps: Termination,
) -> SvdDecomposition<T> {
    assert!(
        b.nrows() == 2 && b.ncols() == 2,
        "bidiagonal sweep is defined for a 2x2 operand, got {}x{}",
        b.nrows(),
        b.ncols(),
    );
    assert!(
        is_bidiagonal(b),
        "bidiagonal sweep requires a bidiagonal input",
    );

    let mut s = Matrix::from(b);
    let rows = s.nrows();
    let cols = s.ncols();
    let size = rows.min(cols);

    let mut u = Matrix::<T>::identity(rows);
    let mut vt = Matrix::<T>::identity(cols);

    for _ in 0..steps.max_steps() {
        if steps.tests_convergence() && off_diagonal_norm(s.view()) < tolerance::<T::Real>() {
            break;
        }

        // Trailing 2x2 minor of SᵗS, including the entry just above the
        // minor when the band reaches it.
        let minor = s.submatrix(rows - 2.., cols - 2..);
        let m00 = minor.get(0, 0);
        let m01 = minor.get(0, 1);
        let m11 = minor.get(1, 1);
        let above = if rows >= 3 {
            s[(rows - 3, cols - 2)]
        } else {
            T::zero()
        };

        let mut bb = Matrix::<T>::square(2);
        bb[(0, 0)] = m00 * m00 + above * above;
        bb[(1, 0)] = m00 * m01;
        bb[(0, 1)] = bb[(1, 0)];
        bb[(1, 1)] = m01 * m01 + m11 * m11;

        let shift = wilkinson_shift(bb.view());

        for i in 0..size {
            if i + 1 < cols {
                let f = if i > 0 {
                    s[(i - 1, i)]
                } else {
                    s[(0, 0)] * s[(0, 0)] - shift
                };
                let g = if i > 0 {
                    s[(i - 1, i + 1)]
                } else {
                    s[(0, 1)] * s[(0, 0)]
                };
                let (c, sn) = rotation(f, g);
                apply_left(&mut vt.view_mut(), i, i + 1, c, sn);
                apply_right(&mut s.view_mut(), i, i + 1, c, sn);
            }

            if i + 1 < rows {
                let (c, sn) = rotation(s[(i, i)], s[(i + 1, i)]);
                apply_right(&mut u.view_mut(), i, i + 1, c, sn);
                apply_left(&mut s.view_mut(), i, i + 1, c, sn);
            }
        }

        s.round_zeroes();
    }

    // Fold the diagonal phases into U so every singular value is
    // non-negative real; U·S stays constant.
    for i in 0..size {
        let d = s[(i, i)];
        if is_zero(d) {
            continue;
        }
        let phase = sign(d);
        if is_equal(phase, T::one()) {
            continue;
        }
        for j in 0..cols {
            s[(i, j)] = s[(i, j)] * phase.conj();
        }
        for row in 0..rows {
            u[(row, i)] = u[(row, i)] * phase;
        }
    }

    SvdDecomposition { u, s, vt }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Bidiagonal SVD of this matrix with the default fixed step budget.
    /// See [`bidiagonal_svd`].
    pub fn bidiagonal_svd(&self) -> SvdDecomposition<T> {
        bidiagonal_svd(self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::is_diagonal;

    const TOL: f64 = 1e-7;

    fn verify_svd(b: &Matrix<f64>) -> SvdDecomposition<f64> {
        let svd = b.bidiagonal_svd();

        assert_eq!(
            &svd.u * &svd.s * &svd.vt,
            *b,
            "U*S*Vt should reconstruct the input",
        );
        assert_eq!(
            &svd.u.transposed() * &svd.u,
            Matrix::identity(2),
            "U should be orthonormal",
        );
        assert_eq!(
            &svd.vt * &svd.vt.transposed(),
            Matrix::identity(2),
            "Vt should be orthonormal",
        );
        for i in 0..2 {
            assert!(svd.s[(i, i)] >= 0.0, "singular values are non-negative");
        }
        svd
    }

    #[test]
    fn svd_generic_2x2() {
        let b = Matrix::new(&[[3.0_f64, 1.0], [0.0, 2.0]]);
        let svd = verify_svd(&b);
        assert!(is_diagonal(svd.s.view()), "S should converge to diagonal");

        // Product of singular values equals |det B| = 6.
        let prod = svd.s[(0, 0)] * svd.s[(1, 1)];
        assert!((prod - 6.0).abs() < TOL, "got {}", prod);
        // Sum of squares equals the squared Frobenius norm = 14.
        let sq = svd.s[(0, 0)].powi(2) + svd.s[(1, 1)].powi(2);
        assert!((sq - 14.0).abs() < TOL, "got {}", sq);
    }

    #[test]
    fn svd_of_diagonal_with_negative_entry() {
        let b = Matrix::new(&[[-2.0_f64, 0.0], [0.0, 1.0]]);
        let svd = verify_svd(&b);
        assert!(is_diagonal(svd.s.view()));
        assert!((svd.s[(0, 0)] - 2.0).abs() < TOL);
        assert!((svd.s[(1, 1)] - 1.0).abs() < TOL);
    }

    #[test]
    fn svd_rank_deficient_preserves_contract() {
        // A zero row makes the shift estimate land on a repeated
        // eigenvalue of the trailing block, so the sweep is not
        // guaranteed to reach diagonal form; the factorization contract
        // still holds throughout.
        let b = Matrix::new(&[[1.0_f64, 1.0], [0.0, 0.0]]);
        verify_svd(&b);
    }

    #[test]
    fn svd_converged_termination() {
        let b = Matrix::new(&[[4.0_f64, 3.0], [0.0, 1.0]]);
        let svd = bidiagonal_svd_with(b.view(), Termination::Converged { max_steps: 200 });
        assert_eq!(&svd.u * &svd.s * &svd.vt, b);
        assert!(is_diagonal(svd.s.view()));
    }

    #[test]
    #[should_panic(expected = "2x2")]
    fn rejects_larger_operands() {
        let b = Matrix::diagonal(&[1.0_f64, 2.0, 3.0]);
        let _ = b.bidiagonal_svd();
    }

    #[test]
    #[should_panic(expected = "bidiagonal")]
    fn rejects_non_bidiagonal_input() {
        let b = Matrix::new(&[[1.0_f64, 1.0], [1.0, 1.0]]);
        let _ = b.bidiagonal_svd();
    }
}
