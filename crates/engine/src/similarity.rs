//! Item-item cosine similarity
//!
//! Treats each product's per-client revenue column as its feature
//! vector and computes pairwise cosine similarity across all products.
//! A product with no recorded revenue anywhere has a zero-norm vector
//! and similarity 0 to everything, including itself — the zero-norm
//! case is handled explicitly so no division by zero can occur.

use crate::interaction::InteractionMatrix;
use ndarray::Array2;

/// Square product × product cosine-similarity matrix
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    /// `values[[i, j]]` = cosine similarity between product columns i and j
    pub values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Compute pairwise cosine similarity between the product columns of `M`
    ///
    /// O(P² · C); each unordered pair is computed once and mirrored, so
    /// the result is symmetric by construction. The diagonal is exactly
    /// 1 for any product with a nonzero revenue vector.
    pub fn from_interactions(matrix: &InteractionMatrix) -> Self {
        let num_products = matrix.num_products();
        let mut values = Array2::<f64>::zeros((num_products, num_products));

        let norms: Vec<f64> = (0..num_products)
            .map(|i| {
                let column = matrix.revenue.column(i);
                column.dot(&column).sqrt()
            })
            .collect();

        for i in 0..num_products {
            if norms[i] == 0.0 {
                continue;
            }
            values[[i, i]] = 1.0;

            for j in (i + 1)..num_products {
                if norms[j] == 0.0 {
                    continue;
                }
                let dot = matrix.revenue.column(i).dot(&matrix.revenue.column(j));
                let similarity = (dot / (norms[i] * norms[j])).clamp(-1.0, 1.0);
                values[[i, j]] = similarity;
                values[[j, i]] = similarity;
            }
        }

        Self { values }
    }

    /// Similarity between products `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// Number of products on each axis
    pub fn num_products(&self) -> usize {
        self.values.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::LabelIndex;
    use ndarray::{array, Array2};

    fn matrix_from(revenue: Array2<f64>, products: &[&str]) -> InteractionMatrix {
        let clients: Vec<String> = (0..revenue.nrows()).map(|i| format!("C{}", i)).collect();
        InteractionMatrix {
            clients: LabelIndex::from_labels(clients),
            products: LabelIndex::from_labels(products.to_vec()),
            revenue,
        }
    }

    #[test]
    fn test_identical_columns_have_similarity_one() {
        let m = matrix_from(array![[1.0, 1.0], [2.0, 2.0]], &["A", "B"]);
        let s = SimilarityMatrix::from_interactions(&m);

        assert!((s.get(0, 1) - 1.0).abs() < 1e-9);
        assert_eq!(s.get(0, 0), 1.0);
    }

    #[test]
    fn test_orthogonal_columns_have_similarity_zero() {
        let m = matrix_from(array![[1.0, 0.0], [0.0, 1.0]], &["A", "B"]);
        let s = SimilarityMatrix::from_interactions(&m);

        assert!((s.get(0, 1)).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let m = matrix_from(
            array![[100.0, 0.0, 50.0], [0.0, 100.0, 50.0]],
            &["A", "B", "C"],
        );
        let s = SimilarityMatrix::from_interactions(&m);

        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(s.get(i, j), s.get(j, i));
            }
        }
    }

    #[test]
    fn test_values_are_bounded() {
        let m = matrix_from(
            array![[100.0, 3.0, 50.0], [2.0, 100.0, 50.0], [9.0, 1.0, 0.5]],
            &["A", "B", "C"],
        );
        let s = SimilarityMatrix::from_interactions(&m);

        for i in 0..3 {
            for j in 0..3 {
                let v = s.get(i, j);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_zero_norm_column_is_zero_everywhere_including_self() {
        let m = matrix_from(array![[100.0, 0.0], [50.0, 0.0]], &["A", "B"]);
        let s = SimilarityMatrix::from_interactions(&m);

        assert_eq!(s.get(1, 0), 0.0);
        assert_eq!(s.get(0, 1), 0.0);
        assert_eq!(s.get(1, 1), 0.0);
        assert_eq!(s.get(0, 0), 1.0);
    }

    #[test]
    fn test_co_occurrence_beats_no_co_occurrence() {
        // A and C co-occur via the first client; A and B never do
        let m = matrix_from(
            array![[100.0, 0.0, 50.0], [0.0, 100.0, 50.0]],
            &["A", "B", "C"],
        );
        let s = SimilarityMatrix::from_interactions(&m);

        let a = 0;
        let b = 1;
        let c = 2;
        assert!(s.get(a, c) > s.get(a, b));
        assert_eq!(s.get(a, b), 0.0);
    }
}
