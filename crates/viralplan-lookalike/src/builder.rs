//! Offline construction of the embedding artifact.

use chrono::Utc;

use crate::artifact::EmbeddingArtifact;
use crate::encoder::TextEncoder;
use crate::error::LookalikeError;
use crate::table::EmbeddingTable;
use crate::vector::l2_normalize;

/// Embed one document per influencer and assemble an artifact.
///
/// `documents` pairs each influencer id with the text to embed. Vectors are
/// normalized to unit length before they are stored, and the result is
/// validated with the same rules the loader applies.
///
/// # Errors
///
/// Returns [`LookalikeError::Encoder`] if encoding fails or yields the wrong
/// number of vectors or a zero vector, and [`LookalikeError::InvalidArtifact`]
/// if ids repeat, the input is empty, or vector dimensions disagree.
pub async fn build_artifact(
    encoder: &dyn TextEncoder,
    documents: &[(i64, String)],
) -> Result<EmbeddingArtifact, LookalikeError> {
    if documents.is_empty() {
        return Err(LookalikeError::InvalidArtifact(
            "no influencer documents to embed".to_string(),
        ));
    }

    let texts: Vec<&str> = documents.iter().map(|(_, text)| text.as_str()).collect();
    let mut vectors = encoder.encode_batch(&texts).await?;

    if vectors.len() != documents.len() {
        return Err(LookalikeError::Encoder(format!(
            "encoder returned {} vectors for {} documents",
            vectors.len(),
            documents.len()
        )));
    }

    for (vector, (id, _)) in vectors.iter_mut().zip(documents) {
        if !l2_normalize(vector) {
            return Err(LookalikeError::Encoder(format!(
                "encoder returned a zero vector for influencer {id}"
            )));
        }
    }

    let dimension = vectors.first().map_or(0, Vec::len);
    let ids: Vec<i64> = documents.iter().map(|(id, _)| *id).collect();

    // Same validation the loader runs, so a built artifact always loads.
    EmbeddingTable::from_parts(ids.clone(), vectors.clone(), dimension)?;

    tracing::info!(
        influencers = ids.len(),
        dimension,
        model = encoder.model(),
        "built embeddings artifact"
    );

    Ok(EmbeddingArtifact {
        model: encoder.model().to_string(),
        dimension,
        built_at: Utc::now(),
        ids,
        vectors,
    })
}
