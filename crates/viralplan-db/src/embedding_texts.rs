//! Source text for the offline embedding build.

use sqlx::PgPool;

use crate::DbError;

/// Per-influencer text fed to the text encoder.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmbeddingTextRow {
    pub influencer_id: i64,
    pub content_style: Option<String>,
    /// All of the influencer's captions joined with single spaces, `""` if none.
    pub sample_captions: String,
}

impl EmbeddingTextRow {
    /// The document to embed: `"{content_style}. {sample_captions}"`.
    ///
    /// A missing style leaves the prefix empty rather than writing a placeholder.
    #[must_use]
    pub fn document(&self) -> String {
        format!(
            "{}. {}",
            self.content_style.as_deref().unwrap_or_default(),
            self.sample_captions
        )
    }
}

/// Returns embedding source text for every raw influencer, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_embedding_texts(pool: &PgPool) -> Result<Vec<EmbeddingTextRow>, DbError> {
    let rows = sqlx::query_as::<_, EmbeddingTextRow>(
        "SELECT \
             i.influencer_id, \
             i.content_style, \
             COALESCE( \
                 (SELECT string_agg(p.caption, ' ' ORDER BY p.post_id) \
                  FROM raw_posts p \
                  WHERE p.influencer_id = i.influencer_id), \
                 '' \
             ) AS sample_captions \
         FROM raw_influencers i \
         ORDER BY i.influencer_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
