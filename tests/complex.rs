#![cfg(feature = "complex")]

use lamina::{householder_qr, predicates, schur_form, Complex, Matrix};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-10;

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

// ── View state composition ──────────────────────────────────────────

#[test]
fn conjugated_view_negates_imaginary_parts() {
    let m = Matrix::new(&[[c(1.0, 2.0), c(3.0, -4.0)], [c(0.0, 1.0), c(5.0, 0.0)]]);
    let v = m.view().conjugated();
    assert_complex_near(v.get(0, 0), c(1.0, -2.0), TOL, "(0,0)");
    assert_complex_near(v.get(0, 1), c(3.0, 4.0), TOL, "(0,1)");
    assert_complex_near(v.get(1, 1), c(5.0, 0.0), TOL, "(1,1)");
}

#[test]
fn conjugate_transpose_view_matches_in_place_conjugate() {
    let m = Matrix::new(&[[c(1.0, 1.0), c(2.0, -1.0)], [c(0.0, 3.0), c(4.0, 0.0)]]);
    let lazy = Matrix::from(m.view().transposed().conjugated());
    assert_eq!(lazy, m.conjugated());
}

#[test]
fn double_conjugate_is_identity() {
    let m = Matrix::new(&[[c(1.0, 1.0), c(2.0, -1.0)], [c(0.0, 3.0), c(4.0, 0.0)]]);
    assert_eq!(m.conjugated().conjugated(), m);
    assert_eq!(Matrix::from(m.view().conjugated().conjugated()), m);
}

#[test]
fn conjugated_write_reads_back_unchanged() {
    let mut m = Matrix::<C>::zeros(2, 2);
    {
        let mut v = m.view_mut().conjugated();
        v.set(0, 1, c(2.0, 5.0));
        assert_complex_near(v.get(0, 1), c(2.0, 5.0), TOL, "through the view");
    }
    // The buffer holds the conjugate.
    assert_complex_near(m[(0, 1)], c(2.0, -5.0), TOL, "in storage");
}

#[test]
fn hermitian_predicate_uses_conjugate_symmetry() {
    let h = Matrix::new(&[[c(2.0, 0.0), c(0.0, 1.0)], [c(0.0, -1.0), c(2.0, 0.0)]]);
    assert!(predicates::is_hermitian(h.view()));

    let not_h = Matrix::new(&[[c(2.0, 0.0), c(0.0, 1.0)], [c(0.0, 1.0), c(2.0, 0.0)]]);
    assert!(!predicates::is_hermitian(not_h.view()));
}

// ── Factorizations over complex scalars ─────────────────────────────

#[test]
fn complex_qr_reconstructs_and_is_unitary() {
    let a = Matrix::new(&[
        [c(2.0, 1.0), c(1.0, -1.0)],
        [c(1.0, 0.0), c(3.0, 2.0)],
    ]);
    let qr = householder_qr(a.view());

    assert_eq!(&qr.q * &qr.r, a, "Q*R should reconstruct A");
    assert_eq!(
        &qr.q.conjugated() * &qr.q,
        Matrix::identity(2),
        "Q^H * Q should be the identity",
    );
    assert!(predicates::is_upper_triangular(qr.r.view()));
}

#[test]
fn complex_schur_form_of_hermitian_matrix() {
    // Eigenvalues of [[2, i], [-i, 2]] are 1 and 3.
    let a = Matrix::new(&[[c(2.0, 0.0), c(0.0, 1.0)], [c(0.0, -1.0), c(2.0, 0.0)]]);
    let s = schur_form(a.view());

    assert_complex_near(s[(1, 0)], c(0.0, 0.0), TOL, "sub-diagonal");
    let mut eigs = [s[(0, 0)].re, s[(1, 1)].re];
    eigs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((eigs[0] - 1.0).abs() < 1e-7, "got {}", eigs[0]);
    assert!((eigs[1] - 3.0).abs() < 1e-7, "got {}", eigs[1]);
    assert!(s[(0, 0)].im.abs() < 1e-7);
    assert!(s[(1, 1)].im.abs() < 1e-7);
}
