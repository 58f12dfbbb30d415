pub(crate) mod givens;
pub(crate) mod qr;
pub(crate) mod schur;
pub(crate) mod shift;
pub(crate) mod svd;

pub use givens::{apply_left, apply_right, rotation};
pub use qr::{householder_qr, QrDecomposition};
pub use schur::{
    schur_form, schur_form_with, wilkinson_schur_form, DEFAULT_SCHUR_ITERATIONS,
};
pub use shift::wilkinson_shift;
pub use svd::{bidiagonal_svd, bidiagonal_svd_with, SvdDecomposition, DEFAULT_SVD_ITERATIONS};

/// Iteration policy for the iterative factorizations.
///
/// The compatible default everywhere is a fixed step count with no
/// convergence test — the loop runs its budget and returns whatever
/// matrix results. `Converged` additionally stops as soon as the
/// algorithm's off-diagonal mass drops inside the comparison tolerance,
/// still never exceeding the budget.
///
/// ```
/// use lamina::{schur_form_with, Matrix, Termination};
///
/// let a = Matrix::new(&[[4.0_f64, 1.0], [1.0, 4.0]]);
/// let s = schur_form_with(a.view(), Termination::Converged { max_steps: 200 });
/// assert!((s[(1, 0)]).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Run exactly this many steps.
    FixedCount(usize),
    /// Stop once converged, but never run more than `max_steps` steps.
    Converged { max_steps: usize },
}

impl Termination {
    /// The iteration budget.
    #[inline]
    pub fn max_steps(self) -> usize {
        match self {
            Termination::FixedCount(steps) => steps,
            Termination::Converged { max_steps } => max_steps,
        }
    }

    /// Whether the convergence test is consulted between steps.
    #[inline]
    pub fn tests_convergence(self) -> bool {
        matches!(self, Termination::Converged { .. })
    }
}
