//! Recommendation scorer
//!
//! Item-based collaborative filtering over one snapshot: every product
//! the client already bought votes for each unpurchased candidate,
//! weighted by item-item similarity and by the revenue the client
//! generated on the purchased product. No training step, no cross-call
//! state; the whole ranking is recomputed per call.

use crate::interaction::InteractionMatrix;
use crate::similarity::SimilarityMatrix;
use std::cmp::Ordering;

/// Rank unpurchased products for one client
///
/// `client_idx` must be a valid row of `matrix` — the label-level entry
/// point in [`crate::snapshot::Snapshot`] resolves and checks it.
///
/// Candidates are the products with zero recorded revenue for the
/// client; each is scored as `Σ over purchased p of S[q, p] · M[client, p]`.
/// The result is ordered by score descending, ties by ascending product
/// index (a fixed policy so identical inputs always rank identically),
/// and truncated to `top_n`. A client who bought every product gets an
/// empty ranking.
pub fn score_client(
    matrix: &InteractionMatrix,
    similarity: &SimilarityMatrix,
    client_idx: usize,
    top_n: usize,
) -> Vec<(usize, f64)> {
    let revenue_row = matrix.revenue.row(client_idx);

    let purchased: Vec<usize> = revenue_row
        .iter()
        .enumerate()
        .filter(|(_, &amount)| amount > 0.0)
        .map(|(product, _)| product)
        .collect();

    let mut scores: Vec<(usize, f64)> = Vec::new();
    for candidate in 0..matrix.num_products() {
        if revenue_row[candidate] > 0.0 {
            continue;
        }
        let score: f64 = purchased
            .iter()
            .map(|&product| similarity.get(candidate, product) * revenue_row[product])
            .sum();
        scores.push((candidate, score));
    }

    scores.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scores.truncate(top_n);
    scores
}
