//! Property-based tests using proptest.
//!
//! These tests check the invariants of the CSR conversion on random sparse
//! matrices, including matrices with empty rows and degenerate shapes.

use proptest::prelude::*;

use csr_toolbox::csr::{CsrMatrix, RowPointerLayout, INDEX_BASE};
use csr_toolbox::dense::DenseMatrix;

/// Random matrices of up to 8 x 8 where most of the entries are zero.
fn sparse_matrix() -> impl Strategy<Value = DenseMatrix<i64>> {
    (0usize..8, 0usize..8).prop_flat_map(|(nrows, ncols)| {
        prop::collection::vec(
            prop_oneof![3 => Just(0i64), 1 => -100i64..100],
            nrows * ncols,
        )
        .prop_map(move |cells| DenseMatrix::from_shape_vec(nrows, ncols, cells).unwrap())
    })
}

fn nonempty_rows(m: &DenseMatrix<i64>) -> usize {
    m.rows().filter(|r| r.iter().any(|&x| x != 0)).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_lengths_match_nnz(m in sparse_matrix()) {
        let csr = CsrMatrix::from_dense(&m);
        prop_assert_eq!(csr.nnz(), m.count_nonzero());
        prop_assert_eq!(csr.values().len(), csr.nnz());
        prop_assert_eq!(csr.column_indices().len(), csr.nnz());
        prop_assert_eq!(csr.num_rows(), m.num_rows());
    }

    #[test]
    fn prop_only_nonzero_values(m in sparse_matrix()) {
        let csr = CsrMatrix::from_dense(&m);
        prop_assert!(csr.values().iter().all(|&x| x != 0));
    }

    #[test]
    fn prop_column_indices_in_range(m in sparse_matrix()) {
        let csr = CsrMatrix::from_dense(&m);
        for &c in csr.column_indices() {
            prop_assert!(c >= INDEX_BASE && c < m.num_cols() + INDEX_BASE);
        }
    }

    #[test]
    fn prop_row_pointers_one_per_nonempty_row(m in sparse_matrix()) {
        let csr = CsrMatrix::from_dense(&m);
        let p = csr.row_pointers();
        prop_assert_eq!(p.len(), nonempty_rows(&m));
        prop_assert!(p.windows(2).all(|w| w[0] <= w[1]));
        for &x in p {
            prop_assert!(x >= 1 && x <= csr.nnz());
        }
    }

    #[test]
    fn prop_row_pointers_mark_row_starts(m in sparse_matrix()) {
        // each pointer refers to the first value of a non-empty row
        let csr = CsrMatrix::from_dense(&m);
        let mut expected = Vec::new();
        let mut position = 0;
        for row in m.rows() {
            let count = row.iter().filter(|&&x| x != 0).count();
            if count > 0 {
                expected.push(position + INDEX_BASE);
            }
            position += count;
        }
        prop_assert_eq!(csr.row_pointers(), &expected[..]);
    }

    #[test]
    fn prop_conversion_is_repeatable(m in sparse_matrix()) {
        prop_assert_eq!(CsrMatrix::from_dense(&m), CsrMatrix::from_dense(&m));
    }

    #[test]
    fn prop_standard_layout_rebuilds_matrix(m in sparse_matrix()) {
        let csr = CsrMatrix::from_dense_with_layout(&m, RowPointerLayout::Standard);
        let p = csr.row_pointers();
        prop_assert_eq!(p.len(), m.num_rows() + 1);
        prop_assert_eq!(p[m.num_rows()], csr.nnz() + INDEX_BASE);
        prop_assert!(p.windows(2).all(|w| w[0] <= w[1]));

        let mut cells = vec![0i64; m.num_rows() * m.num_cols()];
        for row in 0..m.num_rows() {
            for k in p[row] - INDEX_BASE..p[row + 1] - INDEX_BASE {
                let col = csr.column_indices()[k] - INDEX_BASE;
                cells[row * m.num_cols() + col] = csr.values()[k];
            }
        }
        let rebuilt = DenseMatrix::from_shape_vec(m.num_rows(), m.num_cols(), cells).unwrap();
        prop_assert_eq!(rebuilt, m);
    }

    #[test]
    fn prop_full_matrix_pointers(nrows in 0usize..8, ncols in 1usize..8) {
        let cells: Vec<i64> = (1..=(nrows * ncols) as i64).collect();
        let m = DenseMatrix::from_shape_vec(nrows, ncols, cells).unwrap();
        let csr = CsrMatrix::from_dense(&m);
        let expected: Vec<usize> = (0..nrows).map(|i| i * ncols + 1).collect();
        prop_assert_eq!(csr.row_pointers(), &expected[..]);
    }

    #[test]
    fn prop_text_loader_matches_cells(m in sparse_matrix()) {
        let mut text = format!("{} {}\n", m.num_rows(), m.num_cols());
        for row in m.rows() {
            let line: Vec<String> = row.iter().map(|x| x.to_string()).collect();
            text.push_str(&line.join(" "));
            text.push('\n');
        }
        prop_assert_eq!(DenseMatrix::<i64>::from_text(&text).unwrap(), m);
    }
}

#[test]
fn all_zero_matrix() {
    let m = DenseMatrix::<i64>::zeros(3, 4);
    let csr = CsrMatrix::from_dense(&m);
    assert_eq!(csr.nnz(), 0);
    assert!(csr.values().is_empty());
    assert!(csr.column_indices().is_empty());
    assert!(csr.row_pointers().is_empty());
}
