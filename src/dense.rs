//! # Dense matrix representation and loading
//!
//! This module implements [`DenseMatrix`], a rectangular grid of numbers
//! stored contiguously in row-major order, together with the loader for the
//! plain text format consumed by the `csr-toolbox` CLI.
//!
//! The text format starts with the number of rows and the number of columns,
//! followed by all the entries in row-major order. Tokens are separated by
//! arbitrary whitespace, so rows do not need to be on separate lines.
//!
//! ```text
//! 3 3
//! 1 2 3
//! 4 5 6
//! 7 8 9
//! ```

use ndarray::{Array2, ArrayView1};
use num_traits::Zero;
use std::fmt::{Display, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Dense matrix construction and loading error.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The text does not contain the row and column counts.
    #[error("the matrix header with the number of rows and columns is missing")]
    MissingHeader,
    /// A row or column count is not a non-negative integer.
    #[error("invalid {dimension} count {token:?}")]
    InvalidHeader {
        /// Which dimension failed to parse (`"row"` or `"column"`).
        dimension: &'static str,
        /// The offending token.
        token: String,
    },
    /// The declared dimensions overflow the number of addressable entries.
    #[error("a {rows} x {cols} matrix is too large")]
    TooLarge {
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
    },
    /// An entry of the matrix could not be parsed.
    #[error("invalid entry {token:?} at row {row}, column {col}")]
    InvalidEntry {
        /// Row of the entry (starting by zero).
        row: usize,
        /// Column of the entry (starting by zero).
        col: usize,
        /// The offending token.
        token: String,
    },
    /// The text ends before all the declared entries have been read.
    #[error("expected {expected} matrix entries but found only {found}")]
    NotEnoughEntries {
        /// Number of entries declared by the header.
        expected: usize,
        /// Number of entries actually present.
        found: usize,
    },
    /// The text contains more tokens than the declared entries.
    #[error("found more than the {expected} matrix entries declared by the header")]
    TooManyEntries {
        /// Number of entries declared by the header.
        expected: usize,
    },
    /// The number of cells does not match the requested shape.
    #[error("{len} cells cannot fill a {rows} x {cols} matrix")]
    ShapeMismatch {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
        /// Number of cells supplied.
        len: usize,
    },
    /// A row does not have the same length as the first row.
    #[error("row {row} has {len} entries but {expected} were expected")]
    RaggedRow {
        /// Index of the offending row (starting by zero).
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
}

/// Largest number of rows, columns or entries accepted by the loader.
///
/// This is the largest length of a `Vec<usize>`, so any CSR array derived
/// from a loaded matrix (including one row pointer per row) can be allocated.
pub const MAX_ENTRIES: usize = isize::MAX as usize / std::mem::size_of::<usize>();

/// A [`Result`](std::result::Result) type for dense matrix errors.
pub type Result<T> = std::result::Result<T, Error>;

/// A dense matrix
///
/// All the entries, including zeros, are stored in a single row-major
/// [`Array2`]. The shape is fixed at construction.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct DenseMatrix<T> {
    cells: Array2<T>,
}

impl<T> DenseMatrix<T> {
    /// Creates a matrix from its entries in row-major order
    ///
    /// # Errors
    /// Returns [`Error::ShapeMismatch`] if `cells` does not contain exactly
    /// `nrows * ncols` entries.
    ///
    /// # Examples
    /// ```
    /// # use csr_toolbox::dense::DenseMatrix;
    /// let m = DenseMatrix::from_shape_vec(2, 3, vec![0, 1, 0, 2, 0, 3]).unwrap();
    /// assert_eq!(m.num_rows(), 2);
    /// assert_eq!(m.num_cols(), 3);
    /// assert_eq!(m.get(1, 2), Some(&3));
    /// ```
    pub fn from_shape_vec(nrows: usize, ncols: usize, cells: Vec<T>) -> Result<DenseMatrix<T>> {
        let len = cells.len();
        let cells = Array2::from_shape_vec((nrows, ncols), cells).map_err(|_| {
            Error::ShapeMismatch {
                rows: nrows,
                cols: ncols,
                len,
            }
        })?;
        Ok(DenseMatrix { cells })
    }

    /// Creates a matrix from a list of rows
    ///
    /// The number of columns is taken from the first row. An empty list
    /// gives a 0 x 0 matrix.
    ///
    /// # Errors
    /// Returns [`Error::RaggedRow`] for the first row whose length differs
    /// from the length of the first row.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<DenseMatrix<T>> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(Error::RaggedRow {
                row,
                len: r.len(),
                expected: ncols,
            });
        }
        Self::from_shape_vec(nrows, ncols, rows.into_iter().flatten().collect())
    }

    /// Returns the number of rows of the matrix
    pub fn num_rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Returns the number of columns of the matrix
    pub fn num_cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Returns the entry at a particular row and column, or `None` if the
    /// position is outside the matrix. Rows and columns are indexed starting
    /// by zero.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.cells.get((row, col))
    }

    /// Returns an [Iterator] over the rows of the matrix, in order
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, T>> + '_ {
        self.cells.rows().into_iter()
    }

    /// Returns a view of the underlying row-major array
    pub fn as_array(&self) -> &Array2<T> {
        &self.cells
    }
}

impl<T: Clone + Zero> DenseMatrix<T> {
    /// Creates a matrix of a given size with all its entries equal to zero
    pub fn zeros(nrows: usize, ncols: usize) -> DenseMatrix<T> {
        DenseMatrix {
            cells: Array2::zeros((nrows, ncols)),
        }
    }
}

impl<T: Zero> DenseMatrix<T> {
    /// Returns the number of entries that are different from zero
    ///
    /// # Examples
    /// ```
    /// # use csr_toolbox::dense::DenseMatrix;
    /// let m = DenseMatrix::from_rows(vec![vec![0, 1], vec![2, 0]]).unwrap();
    /// assert_eq!(m.count_nonzero(), 2);
    /// ```
    pub fn count_nonzero(&self) -> usize {
        self.cells.iter().filter(|x| !x.is_zero()).count()
    }
}

impl<T: FromStr> DenseMatrix<T> {
    /// Constructs and returns a dense matrix from its text representation
    ///
    /// # Errors
    /// If the header is missing or invalid, an entry cannot be parsed, or the
    /// number of entries does not match the header, the corresponding
    /// [`Error`] is returned.
    ///
    /// # Examples
    /// ```
    /// # use csr_toolbox::dense::DenseMatrix;
    /// let m = DenseMatrix::<i64>::from_text("2 2\n0 1\n2 0\n").unwrap();
    /// assert_eq!(m.get(1, 0), Some(&2));
    /// ```
    pub fn from_text(text: &str) -> Result<DenseMatrix<T>> {
        let mut tokens = text.split_whitespace();
        let nrows = parse_dimension(tokens.next(), "row")?;
        let ncols = parse_dimension(tokens.next(), "column")?;
        debug!(rows = nrows, cols = ncols, "parsed matrix header");
        let too_large = Error::TooLarge {
            rows: nrows,
            cols: ncols,
        };
        // empty rows and columns still count, they get row pointers
        match nrows.max(1).checked_mul(ncols.max(1)) {
            Some(n) if n <= MAX_ENTRIES => (),
            _ => return Err(too_large),
        }
        let expected = nrows * ncols;
        let mut cells = Vec::new();
        for (n, token) in tokens.by_ref().take(expected).enumerate() {
            let value = token.parse().map_err(|_| Error::InvalidEntry {
                row: n / ncols,
                col: n % ncols,
                token: token.to_string(),
            })?;
            cells.push(value);
        }
        if cells.len() < expected {
            return Err(Error::NotEnoughEntries {
                expected,
                found: cells.len(),
            });
        }
        if tokens.next().is_some() {
            return Err(Error::TooManyEntries { expected });
        }
        let cells = Array2::from_shape_vec((nrows, ncols), cells).map_err(|_| too_large)?;
        Ok(DenseMatrix { cells })
    }
}

fn parse_dimension(token: Option<&str>, dimension: &'static str) -> Result<usize> {
    let token = token.ok_or(Error::MissingHeader)?;
    token.parse().map_err(|_| Error::InvalidHeader {
        dimension,
        token: token.to_string(),
    })
}

impl<T: Display> DenseMatrix<T> {
    /// Writes a human readable dump of the matrix to a writer
    ///
    /// Each row is enclosed in braces, with every entry surrounded by
    /// single spaces.
    ///
    /// # Errors
    /// If a call to `write!()` returns an error, this function returns
    /// such an error.
    pub fn write_dump<W: Write>(&self, w: &mut W) -> std::fmt::Result {
        for row in self.rows() {
            write!(w, "{{")?;
            for x in row.iter() {
                write!(w, " {x} ")?;
            }
            writeln!(w, "}}")?;
        }
        Ok(())
    }

    /// Returns a [`String`] with the human readable dump of the matrix
    pub fn dump(&self) -> String {
        let mut s = String::new();
        self.write_dump(&mut s).unwrap();
        s
    }
}

impl<T: Clone> From<Array2<T>> for DenseMatrix<T> {
    fn from(cells: Array2<T>) -> DenseMatrix<T> {
        DenseMatrix {
            cells: cells.as_standard_layout().into_owned(),
        }
    }
}
