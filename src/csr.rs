//! # Compressed Sparse Row (CSR) representation
//!
//! This module contains [`CsrMatrix`], which stores only the non-zero entries
//! of a [`DenseMatrix`] using three arrays:
//!
//! - the values of the non-zero entries, in row-major order,
//! - the column of each of these values,
//! - the position in the two previous arrays where rows start.
//!
//! Column indices and row pointers follow the [`INDEX_BASE`] convention, so
//! the first column and the first stored value are both numbered 1.
//!
//! Two layouts are supported for the row pointers (see [`RowPointerLayout`]).
//! The default layout only records rows that contain some non-zero entry, so
//! the `i`-th row pointer does not necessarily refer to the `i`-th row. The
//! standard layout has one pointer per row plus a final end marker.

use crate::dense::DenseMatrix;
use clap::ValueEnum;
use num_traits::Zero;
use std::fmt::{Display, Write};
use tracing::debug;

/// Index of the first column and of the first stored value.
///
/// Column indices and row pointers are both expressed relative to this base.
pub const INDEX_BASE: usize = 1;

const SEPARATOR_WIDTH: usize = 49;

/// Row pointer layout.
///
/// This enum selects how the row pointers of a [`CsrMatrix`] are laid out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, ValueEnum)]
pub enum RowPointerLayout {
    /// One pointer for each row that contains a non-zero entry, giving the
    /// position of its first stored value. Rows without non-zero entries do
    /// not appear.
    #[default]
    FirstNonZero,
    /// One pointer for each row giving the position where the row starts,
    /// followed by a final pointer one past the last stored value. Rows
    /// without non-zero entries repeat the start of the next row.
    Standard,
}

impl std::str::FromStr for RowPointerLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<RowPointerLayout, String> {
        Ok(match s {
            "first-non-zero" => RowPointerLayout::FirstNonZero,
            "standard" => RowPointerLayout::Standard,
            _ => Err(format!("invalid row pointer layout {s}"))?,
        })
    }
}

impl std::fmt::Display for RowPointerLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{}",
            match self {
                RowPointerLayout::FirstNonZero => "first-non-zero",
                RowPointerLayout::Standard => "standard",
            }
        )
    }
}

/// A matrix in Compressed Sparse Row form
///
/// The matrix owns its three arrays and is immutable once constructed.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CsrMatrix<T> {
    values: Vec<T>,
    column_indices: Vec<usize>,
    row_pointers: Vec<usize>,
    nrows: usize,
    ncols: usize,
    layout: RowPointerLayout,
}

impl<T: Zero + Clone> CsrMatrix<T> {
    /// Compresses a dense matrix using the [`RowPointerLayout::FirstNonZero`]
    /// layout
    ///
    /// # Examples
    /// ```
    /// # use csr_toolbox::{csr::CsrMatrix, dense::DenseMatrix};
    /// let m = DenseMatrix::from_rows(vec![vec![0, 1], vec![2, 0]]).unwrap();
    /// let csr = CsrMatrix::from_dense(&m);
    /// assert_eq!(csr.values(), &[1, 2]);
    /// assert_eq!(csr.column_indices(), &[2, 1]);
    /// assert_eq!(csr.row_pointers(), &[1, 2]);
    /// assert_eq!(csr.nnz(), 2);
    /// ```
    pub fn from_dense(dense: &DenseMatrix<T>) -> CsrMatrix<T> {
        Self::from_dense_with_layout(dense, RowPointerLayout::FirstNonZero)
    }

    /// Compresses a dense matrix using a particular row pointer layout
    ///
    /// The matrix is scanned in row-major order. Every non-zero entry is
    /// appended to the values together with its column. The position of the
    /// entries is counted across the whole matrix, not per row.
    ///
    /// # Panics
    /// With [`RowPointerLayout::Standard`], panics if the `nrows + 1` row
    /// pointers cannot be allocated. Matrices loaded with
    /// [`DenseMatrix::from_text`] never have that many rows.
    pub fn from_dense_with_layout(
        dense: &DenseMatrix<T>,
        layout: RowPointerLayout,
    ) -> CsrMatrix<T> {
        let nnz = dense.count_nonzero();
        let nrows = dense.num_rows();
        let mut values = Vec::with_capacity(nnz);
        let mut column_indices = Vec::with_capacity(nnz);
        // rows without non-zero entries get no pointer in the first layout
        let mut row_pointers = Vec::with_capacity(match layout {
            RowPointerLayout::FirstNonZero => nrows.min(nnz),
            RowPointerLayout::Standard => nrows.saturating_add(1),
        });

        // number of values stored so far (never reset between rows)
        let mut position = 0;
        for row in dense.rows() {
            if layout == RowPointerLayout::FirstNonZero && position == nnz {
                // remaining rows are all zero
                break;
            }
            if layout == RowPointerLayout::Standard {
                row_pointers.push(position + INDEX_BASE);
            }
            let mut row_started = false;
            for (col, x) in row.iter().enumerate() {
                if x.is_zero() {
                    continue;
                }
                if layout == RowPointerLayout::FirstNonZero && !row_started {
                    row_pointers.push(position + INDEX_BASE);
                    row_started = true;
                }
                values.push(x.clone());
                column_indices.push(col + INDEX_BASE);
                position += 1;
            }
        }
        if layout == RowPointerLayout::Standard {
            row_pointers.push(position + INDEX_BASE);
        }
        debug_assert_eq!(values.len(), nnz);

        debug!(
            rows = nrows,
            cols = dense.num_cols(),
            nnz,
            %layout,
            "compressed dense matrix"
        );
        CsrMatrix {
            values,
            column_indices,
            row_pointers,
            nrows,
            ncols: dense.num_cols(),
            layout,
        }
    }
}

impl<T> CsrMatrix<T> {
    /// Returns the non-zero values in row-major order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns the column of each stored value, starting by [`INDEX_BASE`]
    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    /// Returns the row pointers, starting by [`INDEX_BASE`]
    ///
    /// The meaning of the entries depends on the [`layout`](Self::layout).
    pub fn row_pointers(&self) -> &[usize] {
        &self.row_pointers
    }

    /// Returns the number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of rows of the source matrix
    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the source matrix
    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Returns the layout of the row pointers
    pub fn layout(&self) -> RowPointerLayout {
        self.layout
    }

    /// Returns an [Iterator] over the stored values together with their
    /// column index, in storage order
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.values.iter().zip(self.column_indices.iter().copied())
    }
}

impl<T: Display> CsrMatrix<T> {
    /// Writes a human readable dump of the three arrays to a writer
    ///
    /// Each array is printed on its own line after a separator and a title.
    /// Only the row pointers actually stored are printed.
    ///
    /// # Errors
    /// If a call to `write!()` returns an error, this function returns
    /// such an error.
    pub fn write_dump<W: Write>(&self, w: &mut W) -> std::fmt::Result {
        let separator = "+".repeat(SEPARATOR_WIDTH);
        writeln!(w, "{separator}")?;
        writeln!(w, "Values:")?;
        for x in &self.values {
            write!(w, " {x} ")?;
        }
        writeln!(w)?;
        writeln!(w, "{separator}")?;
        writeln!(w, "Column Indexes:")?;
        for x in &self.column_indices {
            write!(w, " {x} ")?;
        }
        writeln!(w)?;
        writeln!(w, "{separator}")?;
        writeln!(w, "Row Numbers:")?;
        for x in &self.row_pointers {
            write!(w, " {x} ")?;
        }
        writeln!(w)
    }

    /// Returns a [`String`] with the human readable dump of the matrix
    pub fn dump(&self) -> String {
        let mut s = String::new();
        self.write_dump(&mut s).unwrap();
        s
    }
}
