//! `csr-toolbox` CLI application
//!
//! The CLI application reads a dense matrix from a text file (see
//! [`dense`](crate::dense) for the format), prints it, compresses it to CSR
//! form and prints the three CSR arrays.
//!
//! # Examples
//!
//! ```shell
//! $ csr-toolbox matrix.txt
//! { 1  2  3 }
//! { 4  5  6 }
//! { 7  8  9 }
//! +++++++++++++++++++++++++++++++++++++++++++++++++
//! Values:
//!  1  2  3  4  5  6  7  8  9
//! +++++++++++++++++++++++++++++++++++++++++++++++++
//! Column Indexes:
//!  1  2  3  1  2  3  1  2  3
//! +++++++++++++++++++++++++++++++++++++++++++++++++
//! Row Numbers:
//!  1  4  7
//! ```
//!
//! The conventional layout with one row pointer per row and a final end
//! marker can be selected with `--layout standard`. Diagnostics are logged to
//! stderr; use `-v` (repeatable) or `RUST_LOG` to see them.

use crate::{
    csr::{CsrMatrix, RowPointerLayout},
    dense::DenseMatrix,
};
use clap::{ArgAction, CommandFactory, Parser};
use std::{
    error::Error as StdError,
    fmt::{Display, Write},
    path::PathBuf,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Trait to run a CLI command
pub trait Run {
    /// Run the CLI command
    fn run(&self) -> Result<(), Box<dyn StdError>>;
}

/// CLI error.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Read {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    name = "csr-toolbox",
    about = "Converts a dense matrix into Compressed Sparse Row form"
)]
pub struct Args {
    /// Text file with the dense matrix
    pub input: Option<PathBuf>,
    /// Row pointer layout
    #[arg(long, value_enum, default_value_t = RowPointerLayout::FirstNonZero)]
    pub layout: RowPointerLayout,
    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Sets up logging to stderr according to the verbosity level
    ///
    /// The `RUST_LOG` environment variable takes precedence over the
    /// verbosity flags.
    pub fn init_logging(&self) {
        let filter = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

impl Run for Args {
    fn run(&self) -> Result<(), Box<dyn StdError>> {
        let Some(input) = self.input.as_ref() else {
            println!("{}", usage());
            return Ok(());
        };
        let text = std::fs::read_to_string(input).map_err(|source| Error::Read {
            path: input.clone(),
            source,
        })?;
        let dense = DenseMatrix::<i64>::from_text(&text)?;
        info!(
            path = %input.display(),
            rows = dense.num_rows(),
            cols = dense.num_cols(),
            "loaded dense matrix"
        );
        let csr = CsrMatrix::from_dense_with_layout(&dense, self.layout);
        info!(nnz = csr.nnz(), layout = %csr.layout(), "converted to CSR");
        print!("{}", report(&dense, &csr));
        Ok(())
    }
}

/// Returns the usage message printed when no input file is given
pub fn usage() -> String {
    Args::command().render_usage().to_string()
}

/// Returns the dump of a dense matrix followed by the dump of its CSR form
pub fn report<T: Display>(dense: &DenseMatrix<T>, csr: &CsrMatrix<T>) -> String {
    let mut s = String::new();
    dense.write_dump(&mut s).unwrap();
    csr.write_dump(&mut s).unwrap();
    s
}
