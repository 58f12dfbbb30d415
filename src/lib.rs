//! # lamina
//!
//! Dense linear algebra built around zero-copy views: an owning row-major
//! [`Matrix`], lazily transposed/conjugated windows over it, and a small
//! family of iterative factorizations driven through those windows.
//!
//! ## Quick start
//!
//! ```
//! use lamina::Matrix;
//!
//! let a = Matrix::new(&[
//!     [12.0_f64, -51.0, 4.0],
//!     [6.0, 167.0, -68.0],
//!     [-4.0, 24.0, -41.0],
//! ]);
//! let qr = a.qr();
//!
//! // Q is orthonormal and Q * R reconstructs A (comparisons are
//! // tolerance-based throughout the crate).
//! assert_eq!(&qr.q * &qr.r, a);
//! assert_eq!(&qr.q.transposed() * &qr.q, Matrix::identity(3));
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — Heap-allocated `Matrix<T>` with runtime dimensions and
//!   row-major `Vec<T>` storage, plus [`MatrixView`] / [`MatrixViewMut`]:
//!   non-owning windows carrying a row segment, a column segment, and a
//!   transpose/conjugate state that remaps indexing instead of moving
//!   data. Arithmetic between views materializes a fresh `Matrix`.
//!
//! - [`linalg`] — Givens rotations, Householder QR, the Wilkinson shift
//!   estimator, a fixed-count QR iteration to Schur form, and an
//!   implicit-shift Givens sweep for a bidiagonal SVD. The iterative
//!   loops run a fixed step budget by default; [`Termination`] opts into
//!   an off-diagonal convergence test.
//!
//! - [`predicates`] — The crate-wide comparison tolerance and the pure
//!   predicates built on it: approximate equality and zero tests, `sign`,
//!   and structural checks (Hermitian, bidiagonal, triangular, diagonal).
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`)
//!   - [`LinalgScalar`] — real floats and complex numbers, used by the
//!     views and every factorization
//!
//! ## Complex matrices
//!
//! Enable the `complex` feature to run everything over `Complex<f32>` /
//! `Complex<f64>`. Conjugation is a no-op for real scalars, so view
//! state composition and the factorizations share one code path.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm |
//! | `libm`    | no       | Pure-Rust software float fallback for no_std |
//! | `complex` | no       | `Complex<f32>` / `Complex<f64>` support via `num-complex` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod linalg;
pub mod matrix;
pub mod predicates;
pub mod traits;

pub use linalg::{
    bidiagonal_svd, bidiagonal_svd_with, householder_qr, schur_form, schur_form_with,
    wilkinson_schur_form, wilkinson_shift, QrDecomposition, SvdDecomposition, Termination,
    DEFAULT_SCHUR_ITERATIONS, DEFAULT_SVD_ITERATIONS,
};
pub use matrix::{Matrix, MatrixView, MatrixViewMut, Segment};
pub use traits::{FloatScalar, LinalgScalar, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
