use crate::matrix::MatrixView;
use crate::predicates::{is_equal, sign};
use crate::traits::LinalgScalar;

/// Wilkinson shift of a symmetric 2×2 block `[[a, b], [b, d]]`.
///
/// `δ = (a − d)/2`, `shift = d − sign(δ)·b² / (|δ| + sqrt(δ² + b²))` —
/// the eigenvalue of the block closest to `d`. Feeding it back into a
/// shifted QR step steers the iteration toward that eigenvalue, which is
/// what keeps the bidiagonal sweep from crawling when the two trailing
/// eigenvalues are close. With `sign(0) == 0`, a block with `δ = 0`
/// yields `d` itself.
///
/// Panics unless the view is 2×2 and symmetric within tolerance.
///
/// ```
/// use lamina::{wilkinson_shift, Matrix};
///
/// let block = Matrix::new(&[[4.0_f64, 1.0], [1.0, 4.0]]);
/// let shift = wilkinson_shift(block.view());
/// // δ = 0, so the shift is exactly d; the eigenvalues are 3 and 5 and
/// // the shift sits strictly between them.
/// assert_eq!(shift, 4.0);
/// ```
pub fn wilkinson_shift<T: LinalgScalar>(block: MatrixView<'_, T>) -> T {
    assert!(
        block.nrows() == 2 && block.ncols() == 2,
        "Wilkinson shift is defined for a 2x2 block, got {}x{}",
        block.nrows(),
        block.ncols(),
    );
    assert!(
        is_equal(block.get(0, 1), block.get(1, 0)),
        "Wilkinson shift requires a symmetric block",
    );

    let a = block.get(0, 0);
    let b = block.get(0, 1);
    let d = block.get(1, 1);
    let two = T::one() + T::one();

    let delta = (a - d) / two;
    let coefficient = T::from_real(delta.modulus()) + (delta * delta + b * b).lsqrt();

    d - sign(delta) * b * b / coefficient
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    #[test]
    fn zero_delta_returns_trailing_entry() {
        let block = Matrix::new(&[[4.0_f64, 1.0], [1.0, 4.0]]);
        let shift = wilkinson_shift(block.view());
        assert_eq!(shift, 4.0);
        // Strictly between the eigenvalues 3 and 5.
        assert!(shift > 3.0 && shift < 5.0);
    }

    #[test]
    fn shift_approaches_closest_eigenvalue() {
        // [[5, 1], [1, 1]]: eigenvalues 2 ± sqrt(5) ≈ {5.236, 0.764}.
        let block = Matrix::new(&[[5.0_f64, 1.0], [1.0, 1.0]]);
        let shift = wilkinson_shift(block.view());
        let lo = 3.0 - 5.0_f64.sqrt();
        assert!(
            (shift - lo).abs() < 1e-12,
            "shift {} should equal the eigenvalue nearest d",
            shift,
        );
    }

    #[test]
    fn diagonal_block_with_gap_returns_d() {
        let block = Matrix::new(&[[7.0_f64, 0.0], [0.0, 2.0]]);
        assert_eq!(wilkinson_shift(block.view()), 2.0);
    }

    #[test]
    #[should_panic(expected = "symmetric")]
    fn rejects_asymmetric_block() {
        let block = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        let _ = wilkinson_shift(block.view());
    }

    #[test]
    #[should_panic(expected = "2x2")]
    fn rejects_wrong_shape() {
        let block = Matrix::<f64>::identity(3);
        let _ = wilkinson_shift(block.view());
    }
}
