use alloc::vec::Vec;

use crate::matrix::{Matrix, MatrixView};
use crate::predicates;
use crate::traits::LinalgScalar;
use num_traits::Zero;

/// Result of [`householder_qr`]: `q * r` reconstructs the input within
/// the comparison tolerance, `q` is orthogonal/unitary, `r` is
/// upper-triangular.
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    pub q: Matrix<T>,
    pub r: Matrix<T>,
}

/// QR factorization of an arbitrary view via Householder reflections.
///
/// Column by column, a reflector `H = I − 2·v·vᴴ` built from the current
/// sub-column zeroes everything below the diagonal of `R` while `Q`
/// accumulates the product of reflectors. The reflector offset `σ`
/// carries the phase of the pivot entry (`σ = (x₀/|x₀|)·‖x‖`) so the
/// update never cancels; sub-columns that are already zero within
/// tolerance are skipped. Works for any shape — rectangular inputs give
/// a square `q` of size `nrows` and an upper-trapezoidal `r`.
///
/// ```
/// use lamina::{householder_qr, predicates, Matrix};
///
/// let a = Matrix::new(&[[2.0_f64, 1.0], [1.0, 3.0]]);
/// let qr = householder_qr(a.view());
/// assert_eq!(&qr.q * &qr.r, a);
/// assert!(predicates::is_upper_triangular(qr.r.view()));
/// ```
pub fn householder_qr<T: LinalgScalar>(a: MatrixView<'_, T>) -> QrDecomposition<T> {
    let nrows = a.nrows();
    let ncols = a.ncols();
    let mut r = Matrix::from(a);
    let mut q = Matrix::identity(nrows);
    let two = T::one() + T::one();

    for k in 0..nrows.min(ncols) {
        let norm = r.submatrix(k.., k..k + 1).euclidean_norm();
        if predicates::is_zero(norm) {
            continue;
        }

        let pivot = r[(k, k)];
        let alpha = pivot.modulus();
        let sigma = if predicates::is_zero(alpha) {
            T::from_real(norm)
        } else {
            T::from_real(norm) * (pivot / T::from_real(alpha))
        };

        // Unit reflector for the sub-column, offset along the pivot phase.
        let mut v: Vec<T> = Vec::with_capacity(nrows - k);
        v.push(pivot + sigma);
        for i in (k + 1)..nrows {
            v.push(r[(i, k)]);
        }
        let mut v_norm_sq = <T::Real as Zero>::zero();
        for &x in &v {
            let m = x.modulus();
            v_norm_sq = v_norm_sq + m * m;
        }
        let v_norm = v_norm_sq.lsqrt();
        for x in &mut v {
            *x = *x / T::from_real(v_norm);
        }

        // R[k.., k+1..] ← H · R[k.., k+1..]
        for j in (k + 1)..ncols {
            let mut dot = T::zero();
            for (idx, &vi) in v.iter().enumerate() {
                dot = dot + vi.conj() * r[(k + idx, j)];
            }
            let scale = two * dot;
            for (idx, &vi) in v.iter().enumerate() {
                r[(k + idx, j)] = r[(k + idx, j)] - scale * vi;
            }
        }

        // Q ← Q · H over the trailing columns.
        for row in 0..nrows {
            let mut dot = T::zero();
            for (idx, &vi) in v.iter().enumerate() {
                dot = dot + q[(row, k + idx)] * vi;
            }
            let scale = two * dot;
            for (idx, &vi) in v.iter().enumerate() {
                q[(row, k + idx)] = q[(row, k + idx)] - scale * vi.conj();
            }
        }

        // The eliminated column is known exactly.
        r[(k, k)] = T::zero() - sigma;
        for i in (k + 1)..nrows {
            r[(i, k)] = T::zero();
        }
    }

    r.round_zeroes();
    QrDecomposition { q, r }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Householder QR of this matrix. See [`householder_qr`].
    pub fn qr(&self) -> QrDecomposition<T> {
        householder_qr(self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{is_upper_triangular, is_zero};

    fn verify_qr(a: &Matrix<f64>) {
        let qr = a.qr();
        assert_eq!(&qr.q * &qr.r, *a, "Q*R should reconstruct the input");
        assert_eq!(
            &qr.q.transposed() * &qr.q,
            Matrix::identity(a.nrows()),
            "Q should be orthonormal",
        );
        assert!(is_upper_triangular(qr.r.view()), "R should be triangular");
    }

    #[test]
    fn qr_square_3x3() {
        verify_qr(&Matrix::new(&[
            [12.0_f64, -51.0, 4.0],
            [6.0, 167.0, -68.0],
            [-4.0, 24.0, -41.0],
        ]));
    }

    #[test]
    fn qr_tall_4x3() {
        verify_qr(&Matrix::new(&[
            [1.0_f64, -1.0, 4.0],
            [1.0, 4.0, -2.0],
            [1.0, 4.0, 2.0],
            [1.0, -1.0, 0.0],
        ]));
    }

    #[test]
    fn qr_wide_2x3() {
        verify_qr(&Matrix::new(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]));
    }

    #[test]
    fn qr_identity() {
        let id = Matrix::<f64>::identity(3);
        let qr = id.qr();
        assert_eq!(&qr.q * &qr.r, id);
    }

    #[test]
    fn qr_zero_column_is_skipped() {
        let a = Matrix::new(&[[0.0_f64, 1.0], [0.0, 2.0]]);
        let qr = a.qr();
        assert_eq!(&qr.q * &qr.r, a);
        assert!(is_upper_triangular(qr.r.view()));
    }

    #[test]
    fn qr_of_view_without_copy_semantics() {
        let a = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        // Factor the transposed view directly.
        let qr = householder_qr(a.view().transposed());
        assert_eq!(&qr.q * &qr.r, a.transposed());
    }

    #[test]
    fn qr_r_diagonal_carries_column_norms() {
        // First R diagonal entry magnitude is the first column norm.
        let a = Matrix::new(&[[3.0_f64, 1.0], [4.0, 1.0]]);
        let qr = a.qr();
        assert!((qr.r[(0, 0)].abs() - 5.0).abs() < 1e-12);
        assert!(is_zero(qr.r[(1, 0)]));
    }
}
