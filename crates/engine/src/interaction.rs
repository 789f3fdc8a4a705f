//! Client × product interaction matrix
//!
//! Pivots the transaction table into a dense matrix of summed revenue.
//! Every (client, product) cell is present — pairs with no transactions
//! hold 0 — and the matrix is recomputed whole on each snapshot, never
//! patched.

use crate::encoding::LabelIndex;
use ndarray::Array2;
use salesdash_core::{DashboardError, Transaction};

/// Dense client × product matrix of summed revenue
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    /// Row labels (clients)
    pub clients: LabelIndex,
    /// Column labels (products)
    pub products: LabelIndex,
    /// Summed revenue, `revenue[[client, product]]`
    pub revenue: Array2<f64>,
}

impl InteractionMatrix {
    /// Build the matrix from the transaction table
    ///
    /// Multiple transactions for the same (client, product) pair sum.
    /// Rows whose revenue cell is empty are excluded from the sum —
    /// absence of a recorded amount is not zero revenue.
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` when the table has zero rows.
    pub fn build(transactions: &[Transaction]) -> Result<Self, DashboardError> {
        if transactions.is_empty() {
            return Err(DashboardError::empty_dataset(
                "no transactions to build the interaction matrix from",
            ));
        }

        let clients = LabelIndex::from_labels(transactions.iter().map(|t| t.client.as_str()));
        let products = LabelIndex::from_labels(transactions.iter().map(|t| t.product.as_str()));

        let mut revenue = Array2::<f64>::zeros((clients.len(), products.len()));

        for transaction in transactions {
            let Some(amount) = transaction.revenue else {
                continue;
            };
            let (Some(client_idx), Some(product_idx)) = (
                clients.encode(&transaction.client),
                products.encode(&transaction.product),
            ) else {
                continue;
            };
            revenue[[client_idx, product_idx]] += amount;
        }

        Ok(Self {
            clients,
            products,
            revenue,
        })
    }

    /// Number of distinct clients (matrix rows)
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// Number of distinct products (matrix columns)
    pub fn num_products(&self) -> usize {
        self.products.len()
    }
}
