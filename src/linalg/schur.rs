use crate::linalg::qr::householder_qr;
use crate::linalg::shift::wilkinson_shift;
use crate::linalg::Termination;
use crate::matrix::{Matrix, MatrixView};
use crate::predicates::{is_hermitian, off_diagonal_norm, tolerance};
use crate::traits::LinalgScalar;

/// Default step budget for the Schur iteration.
pub const DEFAULT_SCHUR_ITERATIONS: usize = 50;

/// QR iteration driving a Hermitian matrix toward (block-)diagonal Schur
/// form, with the default fixed step budget.
///
/// Each step factors the current matrix with [`householder_qr`],
/// reassembles it as `R·Q` (a unitary similarity, so the spectrum is
/// preserved), and snaps near-zero entries. No shift is applied inside
/// the loop and no convergence test is made: after
/// [`DEFAULT_SCHUR_ITERATIONS`] steps the result is returned as-is,
/// converged or not.
///
/// Panics unless the input is Hermitian within tolerance.
///
/// ```
/// use lamina::{schur_form, Matrix};
///
/// let a = Matrix::new(&[[4.0_f64, 1.0], [1.0, 4.0]]);
/// let s = schur_form(a.view());
/// // Off-diagonal decayed; the diagonal holds the eigenvalues {3, 5}.
/// assert_eq!(s[(1, 0)], 0.0);
/// let (lo, hi) = if s[(0, 0)] < s[(1, 1)] {
///     (s[(0, 0)], s[(1, 1)])
/// } else {
///     (s[(1, 1)], s[(0, 0)])
/// };
/// assert!((lo - 3.0).abs() < 1e-7 && (hi - 5.0).abs() < 1e-7);
/// ```
pub fn schur_form<T: LinalgScalar>(a: MatrixView<'_, T>) -> Matrix<T> {
    schur_form_with(a, Termination::FixedCount(DEFAULT_SCHUR_ITERATIONS))
}

/// [`schur_form`] with an explicit iteration policy.
///
/// `Termination::Converged` stops as soon as the off-diagonal mass drops
/// inside the comparison tolerance.
pub fn schur_form_with<T: LinalgScalar>(a: MatrixView<'_, T>, steps: Termination) -> Matrix<T> {
    assert!(
        is_hermitian(a),
        "Schur form is defined for Hermitian matrices",
    );

    let mut current = Matrix::from(a);
    for _ in 0..steps.max_steps() {
        if steps.tests_convergence() && off_diagonal_norm(current.view()) < tolerance::<T::Real>()
        {
            break;
        }
        let qr = householder_qr(current.view());
        current = &qr.r * &qr.q;
        current.round_zeroes();
    }
    current
}

/// Shifted variant of the Schur iteration.
///
/// Re-derives the [`wilkinson_shift`] from the trailing 2×2 block of the
/// current iterate every step and runs `(Q, R) = qr(current − shift·I)`,
/// `current = R·Q + shift·I`. This accelerates convergence toward the
/// trailing eigenvalue, at a price: when the trailing block's diagonal
/// entries coincide the shift lands exactly between the two eigenvalues
/// and the iteration can stall there, which is why the unshifted loop
/// remains the default. Inputs smaller than 2×2 are returned unchanged.
pub fn wilkinson_schur_form<T: LinalgScalar>(
    a: MatrixView<'_, T>,
    steps: Termination,
) -> Matrix<T> {
    assert!(
        is_hermitian(a),
        "Schur form is defined for Hermitian matrices",
    );

    let mut current = Matrix::from(a);
    let n = current.nrows();
    if n < 2 {
        return current;
    }

    for _ in 0..steps.max_steps() {
        if steps.tests_convergence() && off_diagonal_norm(current.view()) < tolerance::<T::Real>()
        {
            break;
        }
        let shift = wilkinson_shift(current.submatrix(n - 2.., n - 2..));
        let shift_i = Matrix::scalar(n, shift);
        let shifted = &current - &shift_i;
        let qr = householder_qr(shifted.view());
        current = &qr.r * &qr.q + &shift_i;
        current.round_zeroes();
    }
    current
}

impl<T: LinalgScalar> Matrix<T> {
    /// Schur form of this matrix with the default fixed step budget.
    /// See [`schur_form`].
    pub fn schur_form(&self) -> Matrix<T> {
        schur_form(self.view())
    }
}
