mod ops;
mod view;
mod view_mut;

pub use view::{MatrixView, Segment};
pub use view_mut::MatrixViewMut;

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

use crate::predicates;
use crate::traits::{LinalgScalar, Scalar};

/// Dense heap-allocated matrix with runtime dimensions.
///
/// Row-major `Vec<T>` storage plus a column count; the row count is
/// derived as `data.len() / cols`. The empty matrix has zero rows and
/// zero columns. Storage is owned exclusively — aliased access goes
/// through [`MatrixView`] / [`MatrixViewMut`], which borrow the matrix
/// and remap indices instead of copying.
///
/// # Examples
///
/// ```
/// use lamina::Matrix;
///
/// let a = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let id = Matrix::<f64>::identity(3);
/// assert_eq!(id[(0, 0)], 1.0);
/// assert_eq!(id[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    data: Vec<T>,
    cols: usize,
}

impl<T> Default for Matrix<T> {
    /// The empty matrix (`nrows == ncols == 0`).
    fn default() -> Self {
        Self {
            data: Vec::new(),
            cols: 0,
        }
    }
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `n x n` zero matrix.
    pub fn square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    /// Create an `nrows x ncols` zero matrix.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::zero())
    }

    /// Create a matrix filled with a given value.
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            cols: if nrows == 0 { 0 } else { ncols },
        }
    }

    /// Create a square matrix with `diag` on the main diagonal.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let d = Matrix::diagonal(&[1.0_f64, 2.0, 3.0]);
    /// assert_eq!(d[(1, 1)], 2.0);
    /// assert_eq!(d[(1, 0)], 0.0);
    /// ```
    pub fn diagonal(diag: &[T]) -> Self {
        let mut m = Self::square(diag.len());
        for (i, &value) in diag.iter().enumerate() {
            m[(i, i)] = value;
        }
        m
    }

    /// Create the scalar matrix `value * I` of size `n`.
    pub fn scalar(n: usize, value: T) -> Self {
        let mut m = Self::square(n);
        for i in 0..n {
            m[(i, i)] = value;
        }
        m
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::scalar(n, T::one())
    }

    /// Create a matrix from nested literal rows.
    ///
    /// Row lengths are enforced at compile time by the array type.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let m = Matrix::new(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn new<const N: usize>(rows: &[[T; N]]) -> Self {
        assert!(!rows.is_empty(), "matrix must have at least one row");
        let mut data = Vec::with_capacity(rows.len() * N);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self { data, cols: N }
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: row_major.to_vec(),
            cols: if nrows == 0 { 0 } else { ncols },
        }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0_f64 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            cols: if nrows == 0 { 0 } else { ncols },
        }
    }
}

impl<T: LinalgScalar> From<MatrixView<'_, T>> for Matrix<T> {
    /// Materialize a view into an owned matrix, applying its
    /// transpose/conjugate state.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
    /// let t = Matrix::from(m.view().transposed());
    /// assert_eq!(t[(0, 1)], 3.0);
    /// ```
    fn from(view: MatrixView<'_, T>) -> Self {
        Matrix::from_fn(view.nrows(), view.ncols(), |i, j| view.get(i, j))
    }
}

// ── Dimensions and element access ───────────────────────────────────

impl<T> Matrix<T> {
    /// Number of rows (derived from the buffer length).
    #[inline]
    pub fn nrows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.data.len() / self.cols
        }
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.cols
    }

    /// Visit every element in row-major order with its `(row, col)` index.
    pub fn for_each_indexed(&self, mut f: impl FnMut(&T, usize, usize)) {
        if self.cols == 0 {
            return;
        }
        for (idx, value) in self.data.iter().enumerate() {
            f(value, idx / self.cols, idx % self.cols);
        }
    }

    /// Mutate every element in place.
    pub fn apply(&mut self, mut f: impl FnMut(&mut T)) {
        for value in &mut self.data {
            f(value);
        }
    }

    /// Mutate every element in place with its `(row, col)` index.
    pub fn apply_indexed(&mut self, mut f: impl FnMut(&mut T, usize, usize)) {
        let cols = self.cols;
        if cols == 0 {
            return;
        }
        for (idx, value) in self.data.iter_mut().enumerate() {
            f(value, idx / cols, idx % cols);
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows(),
            self.ncols(),
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows(),
            self.ncols(),
        );
        &mut self.data[row * self.cols + col]
    }
}

// ── Views ───────────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Read-only view over the whole matrix.
    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView::over(self, Segment::full(), Segment::full(), false, false)
    }

    /// Mutable view over the whole matrix.
    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T> {
        MatrixViewMut::over(self, Segment::full(), Segment::full(), false, false)
    }

    /// Zero-copy view of row `index`.
    pub fn row(&self, index: usize) -> MatrixView<'_, T> {
        assert!(
            index < self.nrows(),
            "row index {} out of bounds for {}x{} matrix",
            index,
            self.nrows(),
            self.ncols(),
        );
        MatrixView::over(
            self,
            Segment::new(index, index + 1),
            Segment::full(),
            false,
            false,
        )
    }

    /// Zero-copy view of column `index`.
    pub fn column(&self, index: usize) -> MatrixView<'_, T> {
        assert!(
            index < self.ncols(),
            "column index {} out of bounds for {}x{} matrix",
            index,
            self.nrows(),
            self.ncols(),
        );
        MatrixView::over(
            self,
            Segment::full(),
            Segment::new(index, index + 1),
            false,
            false,
        )
    }

    /// Zero-copy rectangular sub-view.
    ///
    /// Segments are normalized per [`Segment::normalized`]: an `end` of 0
    /// (or past the extent) clamps to the extent, an out-of-range `begin`
    /// resets to 0.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let sub = m.submatrix(1.., 1..);
    /// assert_eq!(sub.nrows(), 2);
    /// assert_eq!(sub.get(0, 0), 4.0);
    /// ```
    pub fn submatrix(
        &self,
        rows: impl Into<Segment>,
        cols: impl Into<Segment>,
    ) -> MatrixView<'_, T> {
        MatrixView::over(self, rows.into(), cols.into(), false, false)
    }

    /// Mutable view of row `index`.
    pub fn row_mut(&mut self, index: usize) -> MatrixViewMut<'_, T> {
        assert!(
            index < self.nrows(),
            "row index {} out of bounds for {}x{} matrix",
            index,
            self.nrows(),
            self.ncols(),
        );
        MatrixViewMut::over(
            self,
            Segment::new(index, index + 1),
            Segment::full(),
            false,
            false,
        )
    }

    /// Mutable view of column `index`.
    pub fn column_mut(&mut self, index: usize) -> MatrixViewMut<'_, T> {
        assert!(
            index < self.ncols(),
            "column index {} out of bounds for {}x{} matrix",
            index,
            self.nrows(),
            self.ncols(),
        );
        MatrixViewMut::over(
            self,
            Segment::full(),
            Segment::new(index, index + 1),
            false,
            false,
        )
    }

    /// Mutable rectangular sub-view, with the same segment normalization
    /// as [`Matrix::submatrix`].
    pub fn submatrix_mut(
        &mut self,
        rows: impl Into<Segment>,
        cols: impl Into<Segment>,
    ) -> MatrixViewMut<'_, T> {
        MatrixViewMut::over(self, rows.into(), cols.into(), false, false)
    }
}

// ── Block and diagonal helpers ──────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Extract the main diagonal as a column matrix of length
    /// `min(nrows, ncols)`.
    pub fn diag(&self) -> Matrix<T> {
        let size = self.nrows().min(self.ncols());
        Matrix::from_fn(size, 1, |i, _| self[(i, i)])
    }

    /// Copy a view into this matrix starting at `(row, col)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    pub fn set_submatrix(&mut self, row: usize, col: usize, src: MatrixView<'_, T>) {
        assert!(
            row + src.nrows() <= self.nrows() && col + src.ncols() <= self.ncols(),
            "block at ({}, {}) of size {}x{} out of bounds for {}x{} matrix",
            row,
            col,
            src.nrows(),
            src.ncols(),
            self.nrows(),
            self.ncols(),
        );
        for i in 0..src.nrows() {
            for j in 0..src.ncols() {
                self[(row + i, col + j)] = src.get(i, j);
            }
        }
    }
}

// ── In-place transforms ─────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Transpose in place.
    ///
    /// Follows the permutation cycles of the flat buffer under
    /// `idx -> (nrows * idx) % (len - 1)`, marking visited positions in a
    /// bit array; no second buffer is allocated and the walk is
    /// iterative, so it holds for rectangular shapes and large buffers
    /// alike.
    ///
    /// ```
    /// use lamina::Matrix;
    /// let mut m = Matrix::new(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    /// m.transpose();
    /// assert_eq!(m.nrows(), 3);
    /// assert_eq!(m[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&mut self) {
        let rows = self.nrows();
        let len = self.data.len();
        if len > 1 {
            let last = len - 1;
            let mut visited = vec![false; len];
            for i in 1..len {
                if visited[i] {
                    continue;
                }
                let mut target = i;
                loop {
                    target = if target == last {
                        last
                    } else {
                        (rows * target) % last
                    };
                    self.data.swap(target, i);
                    visited[target] = true;
                    if target == i {
                        break;
                    }
                }
            }
        }
        self.cols = rows;
    }
}

impl<T: LinalgScalar> Matrix<T> {
    /// Conjugate transpose in place: transpose, then conjugate each
    /// element (a no-op for real scalars).
    pub fn conjugate(&mut self) {
        self.transpose();
        self.apply(|value| *value = value.conj());
    }

    /// Divide a single-row or single-column matrix by its Euclidean norm.
    ///
    /// A norm inside the zero tolerance leaves the matrix unchanged, so
    /// normalizing a zero vector is a no-op rather than a fault.
    pub fn normalize(&mut self) {
        assert!(
            self.nrows() == 1 || self.ncols() == 1,
            "normalize is defined for single-row or single-column matrices",
        );
        let norm = self.euclidean_norm();
        if !predicates::is_zero(norm) {
            self.apply(|value| *value = *value / T::from_real(norm));
        }
    }

    /// Snap every element inside the zero tolerance to exact zero.
    ///
    /// The iterative factorizations call this after each step so rounding
    /// noise cannot accumulate into spurious off-diagonal structure.
    pub fn round_zeroes(&mut self) {
        self.apply(|value| {
            if predicates::is_zero(*value) {
                *value = T::zero();
            }
        });
    }

    /// Euclidean norm of a single-row or single-column matrix.
    pub fn euclidean_norm(&self) -> T::Real {
        self.view().euclidean_norm()
    }

    /// Transposed copy.
    pub fn transposed(&self) -> Matrix<T> {
        let mut res = self.clone();
        res.transpose();
        res
    }

    /// Conjugate-transposed copy.
    pub fn conjugated(&self) -> Matrix<T> {
        let mut res = self.clone();
        res.conjugate();
        res
    }

    /// Normalized copy (vectors only).
    pub fn normalized(&self) -> Matrix<T> {
        let mut res = self.clone();
        res.normalize();
        res
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    /// Renders as `[[a b][c d]]`: one bracketed, space-separated row per
    /// line, rows separated by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.nrows() {
            write!(f, "[")?;
            for j in 0..self.ncols() {
                write!(f, "{}", self[(i, j)])?;
                if j + 1 < self.ncols() {
                    write!(f, " ")?;
                }
            }
            write!(f, "]")?;
            if i + 1 < self.nrows() {
                writeln!(f)?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn zeros_and_fill() {
        let z = Matrix::<f64>::zeros(2, 3);
        assert_eq!(z.nrows(), 2);
        assert_eq!(z.ncols(), 3);
        let f = Matrix::fill(2, 2, 7.0_f64);
        assert_eq!(f[(1, 1)], 7.0);
    }

    #[test]
    fn empty_matrix() {
        let e = Matrix::<f64>::default();
        assert_eq!(e.nrows(), 0);
        assert_eq!(e.ncols(), 0);
    }

    #[test]
    fn diagonal_and_scalar() {
        let d = Matrix::diagonal(&[1.0_f64, 2.0]);
        assert_eq!(d[(0, 0)], 1.0);
        assert_eq!(d[(1, 1)], 2.0);
        assert_eq!(d[(0, 1)], 0.0);

        let s = Matrix::scalar(2, 4.0_f64);
        assert_eq!(s[(0, 0)], 4.0);
        assert_eq!(s[(1, 0)], 0.0);
    }

    #[test]
    fn from_rows_literal() {
        let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 2);
        assert_eq!(m[(2, 0)], 5.0);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds() {
        let m = Matrix::<f64>::zeros(2, 2);
        let _ = m[(2, 0)];
    }

    #[test]
    fn transpose_square_involution() {
        let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        let mut t = m.clone();
        t.transpose();
        assert_eq!(t[(0, 1)], 3.0);
        t.transpose();
        assert_eq!(t, m);
    }

    #[test]
    fn transpose_rectangular() {
        let mut m = Matrix::new(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        m.transpose();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 2);
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(m[(i, j)], (j * 3 + i + 1) as f64);
            }
        }
        m.transpose();
        assert_eq!(m, Matrix::new(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]));
    }

    #[test]
    fn conjugate_real_is_transpose() {
        let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        assert_eq!(m.conjugated(), m.transposed());
    }

    #[test]
    fn normalize_column() {
        let mut v = Matrix::new(&[[3.0_f64], [4.0]]);
        v.normalize();
        assert!((v[(0, 0)] - 0.6).abs() < 1e-12);
        assert!((v[(1, 0)] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_vector_is_noop() {
        let mut v = Matrix::<f64>::zeros(1, 4);
        v.normalize();
        assert_eq!(v, Matrix::<f64>::zeros(1, 4));
    }

    #[test]
    #[should_panic(expected = "single-row or single-column")]
    fn normalize_rejects_rectangles() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        m.normalize();
    }

    #[test]
    fn round_zeroes_snaps_noise() {
        let mut m = Matrix::new(&[[1.0_f64, 1e-12], [-1e-12, 2.0]]);
        m.round_zeroes();
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(1, 0)], 0.0);
        assert_eq!(m[(0, 0)], 1.0);
    }

    #[test]
    fn diag_extraction() {
        let m = Matrix::new(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let d = m.diag();
        assert_eq!(d.nrows(), 2);
        assert_eq!(d.ncols(), 1);
        assert_eq!(d[(0, 0)], 1.0);
        assert_eq!(d[(1, 0)], 5.0);
    }

    #[test]
    fn set_submatrix_block() {
        let mut m = Matrix::<f64>::zeros(3, 3);
        let patch = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        m.set_submatrix(1, 1, patch.view());
        assert_eq!(m[(1, 1)], 1.0);
        assert_eq!(m[(2, 2)], 4.0);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn display_format() {
        let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        assert_eq!(format!("{}", m), "[[1 2]\n[3 4]]");
        let row = Matrix::new(&[[1.0_f64, 2.0, 3.0]]);
        assert_eq!(format!("{}", row), "[[1 2 3]]");
    }

    #[test]
    fn materialize_view_round_trip() {
        let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
        assert_eq!(Matrix::from(m.view()), m);
    }
}
