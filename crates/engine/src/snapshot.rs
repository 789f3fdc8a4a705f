//! Versioned ledger snapshots
//!
//! One `Snapshot` is an immutable capture of the transaction table and
//! everything derived from it: the identifier mappings, the interaction
//! matrix and the similarity matrix. Queries always read one consistent
//! capture; a refresh builds a whole new snapshot and swaps it in, so a
//! query never sees `M` from one refresh paired with `S` from another.

use crate::interaction::InteractionMatrix;
use crate::scoring::score_client;
use crate::similarity::SimilarityMatrix;
use crate::source::DataSource;
use chrono::{DateTime, Utc};
use salesdash_core::{DashboardError, Transaction};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One recommended product with its score
///
/// `product` is the original human-readable label; internal dense
/// indices never leave the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Product label
    pub product: String,
    /// Similarity-weighted purchase signal
    pub score: f64,
}

/// Immutable capture of the ledger and its derived matrices
#[derive(Debug)]
pub struct Snapshot {
    /// Identifier of this capture, unique per rebuild
    pub version: Uuid,
    /// When this capture was built
    pub built_at: DateTime<Utc>,
    /// The transaction table the matrices were derived from
    pub transactions: Vec<Transaction>,
    /// Client × product summed revenue
    pub matrix: InteractionMatrix,
    /// Product × product cosine similarity
    pub similarity: SimilarityMatrix,
}

impl Snapshot {
    /// Build a snapshot from a freshly read transaction table
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` when the table has zero rows.
    pub fn build(transactions: Vec<Transaction>) -> Result<Self, DashboardError> {
        let matrix = InteractionMatrix::build(&transactions)?;
        let similarity = SimilarityMatrix::from_interactions(&matrix);

        let snapshot = Self {
            version: Uuid::new_v4(),
            built_at: Utc::now(),
            transactions,
            matrix,
            similarity,
        };

        tracing::info!(
            version = %snapshot.version,
            rows = snapshot.transactions.len(),
            clients = snapshot.matrix.num_clients(),
            products = snapshot.matrix.num_products(),
            "built ledger snapshot"
        );

        Ok(snapshot)
    }

    /// Rank unpurchased products for `client`, best first
    ///
    /// # Errors
    ///
    /// Returns `UnknownClient` when the label is not present in this
    /// snapshot's mapping.
    pub fn recommendations(
        &self,
        client: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, DashboardError> {
        let client_idx = self
            .matrix
            .clients
            .encode(client)
            .ok_or_else(|| DashboardError::unknown_client(client))?;

        let ranked = score_client(&self.matrix, &self.similarity, client_idx, top_n);

        Ok(ranked
            .into_iter()
            .filter_map(|(product_idx, score)| {
                self.matrix
                    .products
                    .decode(product_idx)
                    .map(|product| Recommendation {
                        product: product.to_string(),
                        score,
                    })
            })
            .collect())
    }
}

struct CachedSnapshot {
    snapshot: Arc<Snapshot>,
    fetched_at: Instant,
}

/// TTL-cached snapshot store over a ledger source
///
/// Readers clone the current `Arc<Snapshot>`; a stale store re-reads
/// the source and builds a replacement inside the write lock. With a
/// TTL of zero every read rebuilds.
pub struct SnapshotStore {
    source: Arc<dyn DataSource>,
    ttl: Duration,
    inner: RwLock<Option<CachedSnapshot>>,
}

impl SnapshotStore {
    /// Create a store over `source` with the given cache TTL
    pub fn new(source: Arc<dyn DataSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            inner: RwLock::new(None),
        }
    }

    /// Current snapshot, rebuilding first when stale or absent
    pub async fn current(&self) -> Result<Arc<Snapshot>, DashboardError> {
        {
            let guard = self.inner.read().await;
            if let Some(cached) = guard.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&cached.snapshot));
                }
            }
        }

        let mut guard = self.inner.write().await;

        // Another task may have rebuilt while we waited for the lock
        if let Some(cached) = guard.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.snapshot));
            }
        }

        let transactions = self.source.read().await?;
        let snapshot = Arc::new(Snapshot::build(transactions)?);
        *guard = Some(CachedSnapshot {
            snapshot: Arc::clone(&snapshot),
            fetched_at: Instant::now(),
        });

        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next read rebuilds
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
    }
}
