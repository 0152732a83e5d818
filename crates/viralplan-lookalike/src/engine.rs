use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::encoder::TextEncoder;
use crate::error::LookalikeError;
use crate::table::EmbeddingTable;
use crate::vector::dot;

/// Result count used when a request does not specify `top_k`.
pub const DEFAULT_TOP_K: usize = 10;

/// One search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub influencer_id: i64,
    /// Dot product with the query; cosine similarity for unit vectors.
    pub score: f32,
}

/// Nearest-neighbor search over an [`EmbeddingTable`].
///
/// The table is read-only, so one engine can be shared behind an `Arc` by any
/// number of concurrent callers.
pub struct LookalikeEngine {
    table: EmbeddingTable,
    encoder: Arc<dyn TextEncoder>,
}

impl LookalikeEngine {
    #[must_use]
    pub fn new(table: EmbeddingTable, encoder: Arc<dyn TextEncoder>) -> Self {
        Self { table, encoder }
    }

    /// Load the table from the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::NotFound`] if the artifact is missing; the
    /// caller must run the offline build first. Other read and validation
    /// failures are returned as-is.
    pub fn load(path: &Path, encoder: Arc<dyn TextEncoder>) -> Result<Self, LookalikeError> {
        let table = EmbeddingTable::load(path)?;
        Ok(Self::new(table, encoder))
    }

    #[must_use]
    pub fn table(&self) -> &EmbeddingTable {
        &self.table
    }

    /// Influencers most similar to `influencer_id`, best first, excluding itself.
    ///
    /// An id with no embedding yields an empty list.
    #[must_use]
    pub fn by_influencer(&self, influencer_id: i64, top_k: usize) -> Vec<Neighbor> {
        let Some(query) = self.table.vector(influencer_id) else {
            tracing::debug!(influencer_id, "no embedding for influencer");
            return Vec::new();
        };
        self.rank(query, Some(influencer_id), top_k)
    }

    /// Influencers most similar to free text, best first.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::Encoder`] if encoding fails and
    /// [`LookalikeError::InvalidDimension`] if the encoder's output does not
    /// match the table.
    pub async fn by_text(&self, text: &str, top_k: usize) -> Result<Vec<Neighbor>, LookalikeError> {
        let query = self.encoder.encode(text).await?;
        self.by_vector(&query, None, top_k)
    }

    /// Rank the table against a caller-supplied unit vector.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::InvalidDimension`] if `query` does not match
    /// the table dimension.
    pub fn by_vector(
        &self,
        query: &[f32],
        exclude: Option<i64>,
        top_k: usize,
    ) -> Result<Vec<Neighbor>, LookalikeError> {
        if query.len() != self.table.dimension() {
            return Err(LookalikeError::InvalidDimension {
                expected: self.table.dimension(),
                actual: query.len(),
            });
        }
        Ok(self.rank(query, exclude, top_k))
    }

    fn rank(&self, query: &[f32], exclude: Option<i64>, top_k: usize) -> Vec<Neighbor> {
        let mut scored: Vec<Neighbor> = self
            .table
            .rows()
            .map(|(influencer_id, vector)| Neighbor {
                influencer_id,
                score: dot(vector, query),
            })
            .collect();

        // Stable: equal scores keep table order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        scored
            .into_iter()
            .filter(|n| Some(n.influencer_id) != exclude)
            .take(top_k)
            .collect()
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
