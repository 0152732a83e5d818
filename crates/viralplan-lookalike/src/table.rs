use std::collections::HashMap;
use std::path::Path;

use crate::artifact::EmbeddingArtifact;
use crate::error::LookalikeError;

/// Immutable in-memory embedding table.
///
/// Rows are stored contiguously (row-major) in artifact order. That order is
/// the tie-break for equal similarity scores.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    ids: Vec<i64>,
    data: Vec<f32>,
    dimension: usize,
    positions: HashMap<i64, usize>,
}

impl EmbeddingTable {
    /// Build a table from parallel ids and vectors.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::InvalidArtifact`] if the lists differ in
    /// length, an id repeats, `dimension` is zero, or any vector's length is
    /// not `dimension`.
    pub fn from_parts(
        ids: Vec<i64>,
        vectors: Vec<Vec<f32>>,
        dimension: usize,
    ) -> Result<Self, LookalikeError> {
        if ids.len() != vectors.len() {
            return Err(LookalikeError::InvalidArtifact(format!(
                "{} ids but {} vectors",
                ids.len(),
                vectors.len()
            )));
        }
        if dimension == 0 {
            return Err(LookalikeError::InvalidArtifact(
                "dimension must be positive".to_string(),
            ));
        }

        let mut positions = HashMap::with_capacity(ids.len());
        let mut data = Vec::with_capacity(ids.len() * dimension);

        for (pos, (id, vector)) in ids.iter().zip(vectors).enumerate() {
            if vector.len() != dimension {
                return Err(LookalikeError::InvalidArtifact(format!(
                    "vector for influencer {id} has {} values, expected {dimension}",
                    vector.len()
                )));
            }
            if positions.insert(*id, pos).is_some() {
                return Err(LookalikeError::InvalidArtifact(format!(
                    "duplicate influencer id {id}"
                )));
            }
            data.extend(vector);
        }

        Ok(Self {
            ids,
            data,
            dimension,
            positions,
        })
    }

    /// Load and validate the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::NotFound`] if no artifact exists there, or
    /// any read/validation error from [`EmbeddingArtifact::read`] and
    /// [`EmbeddingTable::from_parts`].
    pub fn load(path: &Path) -> Result<Self, LookalikeError> {
        let artifact = EmbeddingArtifact::read(path)?;
        let table = Self::try_from(artifact)?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            dimension = table.dimension(),
            "loaded embeddings table"
        );
        Ok(table)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, influencer_id: i64) -> bool {
        self.positions.contains_key(&influencer_id)
    }

    /// The stored vector for `influencer_id`, if present.
    #[must_use]
    pub fn vector(&self, influencer_id: i64) -> Option<&[f32]> {
        self.positions
            .get(&influencer_id)
            .map(|&pos| self.row(pos))
    }

    /// `(influencer_id, vector)` pairs in table order.
    pub fn rows(&self) -> impl Iterator<Item = (i64, &[f32])> + '_ {
        self.ids
            .iter()
            .copied()
            .zip(self.data.chunks_exact(self.dimension))
    }

    fn row(&self, pos: usize) -> &[f32] {
        let start = pos * self.dimension;
        &self.data[start..start + self.dimension]
    }
}

impl TryFrom<EmbeddingArtifact> for EmbeddingTable {
    type Error = LookalikeError;

    fn try_from(artifact: EmbeddingArtifact) -> Result<Self, Self::Error> {
        Self::from_parts(artifact.ids, artifact.vectors, artifact.dimension)
    }
}
