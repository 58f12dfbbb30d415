use core::fmt;
use core::ops::{Range, RangeFrom, RangeFull, RangeTo};

use num_traits::Zero;

use super::Matrix;
use crate::traits::LinalgScalar;

/// Half-open index range `[begin, end)` along one axis of a view.
///
/// Segments are normalized against the extent they address: an `end` of
/// zero, or one past the extent, clamps to the extent; after that, a
/// `begin` that is out of range or not below `end` resets to zero. The
/// silent clamp is part of the contract — `Segment::full()` is just
/// `{0, 0}` relying on it, and range sugar like `2..` leaves `end` at
/// the zero sentinel for the same reason.
///
/// ```
/// use lamina::Segment;
///
/// // end == 0 clamps to the whole extent
/// assert_eq!(Segment::new(1, 0).normalized(4), Segment::new(1, 4));
/// // out-of-range begin resets to 0
/// assert_eq!(Segment::new(9, 3).normalized(4), Segment::new(0, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub begin: usize,
    pub end: usize,
}

impl Segment {
    /// Segment from explicit bounds (normalized lazily, on use).
    #[inline]
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// The segment selecting a whole extent once normalized.
    #[inline]
    pub fn full() -> Self {
        Self { begin: 0, end: 0 }
    }

    /// Number of indices covered.
    #[inline]
    pub fn len(self) -> usize {
        self.end - self.begin
    }

    /// Whether the segment covers no indices.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Apply the clamp rules against `extent`.
    pub fn normalized(self, extent: usize) -> Self {
        let mut end = self.end;
        if end == 0 || end > extent {
            end = extent;
        }
        let mut begin = self.begin;
        if begin >= end || begin >= extent {
            begin = 0;
        }
        Self { begin, end }
    }

    /// Shift both bounds by `origin` (sub-view composition).
    #[inline]
    pub(crate) fn offset(self, origin: usize) -> Self {
        Self {
            begin: self.begin + origin,
            end: self.end + origin,
        }
    }
}

impl From<Range<usize>> for Segment {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<RangeFrom<usize>> for Segment {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(range.start, 0)
    }
}

impl From<RangeTo<usize>> for Segment {
    fn from(range: RangeTo<usize>) -> Self {
        Self::new(0, range.end)
    }
}

impl From<RangeFull> for Segment {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

/// Read-only zero-copy window over a [`Matrix`].
///
/// Carries a row segment, a column segment, and a transpose/conjugate
/// state. Both segments live in the view's own coordinate space; a
/// transposed view resolves `(i, j)` to storage `(col.begin + j,
/// row.begin + i)`, so nested sub-views of transposed rectangles stay
/// consistent. Conjugation is applied to the value on read. The borrow
/// ties the view's lifetime to the matrix; no element is ever copied
/// until the view is materialized with [`Matrix::from`].
///
/// ```
/// use lamina::Matrix;
///
/// let m = Matrix::new(&[[1.0_f64, 2.0], [3.0, 4.0]]);
/// let t = m.view().transposed();
/// assert_eq!(t.get(0, 1), 3.0);
/// assert_eq!(t.get(1, 0), 2.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    matrix: &'a Matrix<T>,
    row: Segment,
    col: Segment,
    transposed: bool,
    conjugated: bool,
}

impl<'a, T> MatrixView<'a, T> {
    pub(crate) fn over(
        matrix: &'a Matrix<T>,
        row: Segment,
        col: Segment,
        transposed: bool,
        conjugated: bool,
    ) -> Self {
        let (row_extent, col_extent) = if transposed {
            (matrix.ncols(), matrix.nrows())
        } else {
            (matrix.nrows(), matrix.ncols())
        };
        Self {
            matrix,
            row: row.normalized(row_extent),
            col: col.normalized(col_extent),
            transposed,
            conjugated,
        }
    }

    /// Number of rows the view exposes.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.row.len()
    }

    /// Number of columns the view exposes.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.col.len()
    }

    /// Lazily transposed view: state flip and segment swap, no data
    /// movement.
    pub fn transposed(self) -> Self {
        Self {
            matrix: self.matrix,
            row: self.col,
            col: self.row,
            transposed: !self.transposed,
            conjugated: self.conjugated,
        }
    }

    /// Sub-view of row `index`, in the view's own coordinates.
    pub fn row(&self, index: usize) -> MatrixView<'a, T> {
        assert!(
            index < self.nrows(),
            "row index {} out of bounds for {}x{} view",
            index,
            self.nrows(),
            self.ncols(),
        );
        MatrixView {
            matrix: self.matrix,
            row: Segment::new(index, index + 1).offset(self.row.begin),
            col: self.col,
            transposed: self.transposed,
            conjugated: self.conjugated,
        }
    }

    /// Sub-view of column `index`, in the view's own coordinates.
    pub fn column(&self, index: usize) -> MatrixView<'a, T> {
        assert!(
            index < self.ncols(),
            "column index {} out of bounds for {}x{} view",
            index,
            self.nrows(),
            self.ncols(),
        );
        MatrixView {
            matrix: self.matrix,
            row: self.row,
            col: Segment::new(index, index + 1).offset(self.col.begin),
            transposed: self.transposed,
            conjugated: self.conjugated,
        }
    }

    /// Rectangular sub-view. Incoming segments are normalized against the
    /// *current* view's extents and then offset inside its segments, so
    /// composition respects any transpose already applied.
    pub fn submatrix(
        &self,
        rows: impl Into<Segment>,
        cols: impl Into<Segment>,
    ) -> MatrixView<'a, T> {
        let r = rows.into().normalized(self.nrows());
        let c = cols.into().normalized(self.ncols());
        MatrixView {
            matrix: self.matrix,
            row: r.offset(self.row.begin),
            col: c.offset(self.col.begin),
            transposed: self.transposed,
            conjugated: self.conjugated,
        }
    }
}

impl<'a, T: LinalgScalar> MatrixView<'a, T> {
    /// Lazily conjugated view (a no-op for real scalars).
    pub fn conjugated(self) -> Self {
        Self {
            conjugated: !self.conjugated,
            ..self
        }
    }

    /// Bounds-checked element read with the view's state applied.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of bounds for {}x{} view",
            row,
            col,
            self.nrows(),
            self.ncols(),
        );
        let value = if self.transposed {
            self.matrix[(self.col.begin + col, self.row.begin + row)]
        } else {
            self.matrix[(self.row.begin + row, self.col.begin + col)]
        };
        if self.conjugated {
            value.conj()
        } else {
            value
        }
    }

    /// Visit every element in row-major order.
    pub fn for_each(&self, mut f: impl FnMut(T)) {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                f(self.get(i, j));
            }
        }
    }

    /// Visit every element with its `(row, col)` index.
    pub fn for_each_indexed(&self, mut f: impl FnMut(T, usize, usize)) {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                f(self.get(i, j), i, j);
            }
        }
    }

    /// Euclidean norm of a single-row or single-column view.
    pub fn euclidean_norm(&self) -> T::Real {
        assert!(
            self.nrows() == 1 || self.ncols() == 1,
            "Euclidean norm is defined for single-row or single-column views",
        );
        let mut sum = <T::Real as Zero>::zero();
        self.for_each(|value| {
            let m = value.modulus();
            sum = sum + m * m;
        });
        sum.lsqrt()
    }

    /// Materialize the view into an owned [`Matrix`].
    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::from(*self)
    }
}

impl<T: LinalgScalar + fmt::Display> fmt::Display for MatrixView<'_, T> {
    /// Renders as `((a b)(c d))` — the [`Matrix`] layout with parentheses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for i in 0..self.nrows() {
            write!(f, "(")?;
            for j in 0..self.ncols() {
                write!(f, "{}", self.get(i, j))?;
                if j + 1 < self.ncols() {
                    write!(f, " ")?;
                }
            }
            write!(f, ")")?;
            if i + 1 < self.nrows() {
                writeln!(f)?;
            }
        }
        write!(f, ")")
    }
}
