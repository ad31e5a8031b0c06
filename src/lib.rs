//! # CSR toolbox
//!
//! `csr_toolbox` converts dense matrices into the Compressed Sparse Row (CSR)
//! representation, which stores only the non-zero entries of the matrix.
//!
//! It can be used as a Rust library or as a CLI tool that reads a dense
//! matrix from a text file and prints its CSR arrays. See [`cli`] for
//! documentation about the usage of the CLI tool.
//!
//! # Examples
//! ```
//! # use csr_toolbox::{csr::CsrMatrix, dense::DenseMatrix};
//! let m = DenseMatrix::<i64>::from_text("3 3\n1 2 3\n4 5 6\n7 8 9\n").unwrap();
//! let csr = CsrMatrix::from_dense(&m);
//! assert_eq!(csr.row_pointers(), &[1, 4, 7]);
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod csr;
pub mod dense;
