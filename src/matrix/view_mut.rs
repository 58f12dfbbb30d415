use core::fmt;

use super::view::{MatrixView, Segment};
use super::Matrix;
use crate::traits::LinalgScalar;

/// Mutable zero-copy window over a [`Matrix`].
///
/// Same index remapping as [`MatrixView`], plus assignment. The write
/// path applies the view state in reverse: a value stored through a
/// conjugated view is conjugated before it lands in the buffer, so
/// `set(i, j, x)` followed by `get(i, j)` returns `x` regardless of the
/// state bits. The exclusive borrow keeps the in-place algorithms
/// (rotations, reflections) race-free by construction; writes are
/// visible through any view built afterwards.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    matrix: &'a mut Matrix<T>,
    row: Segment,
    col: Segment,
    transposed: bool,
    conjugated: bool,
}

impl<'a, T> MatrixViewMut<'a, T> {
    pub(crate) fn over(
        matrix: &'a mut Matrix<T>,
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

    /// Lazily transposed view: state flip and segment swap.
    pub fn transposed(self) -> Self {
        Self {
            matrix: self.matrix,
            row: self.col,
            col: self.row,
            transposed: !self.transposed,
            conjugated: self.conjugated,
        }
    }

    /// Mutable rectangular sub-view, offset within the current segments.
    pub fn submatrix_mut(
        &mut self,
        rows: impl Into<Segment>,
        cols: impl Into<Segment>,
    ) -> MatrixViewMut<'_, T> {
        let r = rows.into().normalized(self.nrows());
        let c = cols.into().normalized(self.ncols());
        MatrixViewMut {
            matrix: &mut *self.matrix,
            row: r.offset(self.row.begin),
            col: c.offset(self.col.begin),
            transposed: self.transposed,
            conjugated: self.conjugated,
        }
    }

    /// Mutable sub-view of row `index`.
    pub fn row_mut(&mut self, index: usize) -> MatrixViewMut<'_, T> {
        assert!(
            index < self.nrows(),
            "row index {} out of bounds for {}x{} view",
            index,
            self.nrows(),
            self.ncols(),
        );
        self.submatrix_mut(index..index + 1, ..)
    }

    /// Mutable sub-view of column `index`.
    pub fn column_mut(&mut self, index: usize) -> MatrixViewMut<'_, T> {
        assert!(
            index < self.ncols(),
            "column index {} out of bounds for {}x{} view",
            index,
            self.nrows(),
            self.ncols(),
        );
        self.submatrix_mut(.., index..index + 1)
    }
}

impl<'a, T: LinalgScalar> MatrixViewMut<'a, T> {
    /// Lazily conjugated view (a no-op for real scalars).
    pub fn conjugated(self) -> Self {
        Self {
            conjugated: !self.conjugated,
            ..self
        }
    }

    /// Read-only view sharing this view's window and state.
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView::over(
            self.matrix,
            self.row,
            self.col,
            self.transposed,
            self.conjugated,
        )
    }

    /// Bounds-checked element read with the view's state applied.
    pub fn get(&self, row: usize, col: usize) -> T {
        self.as_view().get(row, col)
    }

    /// Bounds-checked element write.
    ///
    /// The stored value is conjugated when the view is conjugated, so the
    /// written value reads back unchanged through this view.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(
            row < self.nrows() && col < self.ncols(),
            "index ({}, {}) out of bounds for {}x{} view",
            row,
            col,
            self.nrows(),
            self.ncols(),
        );
        let stored = if self.conjugated { value.conj() } else { value };
        if self.transposed {
            self.matrix[(self.col.begin + col, self.row.begin + row)] = stored;
        } else {
            self.matrix[(self.row.begin + row, self.col.begin + col)] = stored;
        }
    }

    /// Read-modify-write every element through the view's state.
    pub fn apply(&mut self, mut f: impl FnMut(T) -> T) {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                let value = self.get(i, j);
                self.set(i, j, f(value));
            }
        }
    }

    /// Read-modify-write every element with its `(row, col)` index.
    pub fn apply_indexed(&mut self, mut f: impl FnMut(T, usize, usize) -> T) {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                let value = self.get(i, j);
                self.set(i, j, f(value, i, j));
            }
        }
    }
}

impl<T: LinalgScalar + fmt::Display> fmt::Display for MatrixViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_view().fmt(f)
    }
}
