//! Read queries against the `mart_influencer_recommendations` view.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use viralplan_core::{Candidate, CandidateFilters};

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `mart_influencer_recommendations` view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InfluencerRow {
    pub influencer_id: i64,
    pub handle: String,
    pub platform: String,
    pub follower_count: Option<i64>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub content_style: Option<String>,
    pub cost_per_post: Option<Decimal>,
    pub age_bracket: Option<String>,
    pub recent_avg_views: Option<f64>,
    pub recent_engagement_rate: Option<f64>,
    pub post_count_last_90d: i64,
    pub virality_score: Option<f64>,
}

impl From<InfluencerRow> for Candidate {
    fn from(row: InfluencerRow) -> Self {
        Candidate {
            influencer_id: row.influencer_id,
            handle: row.handle,
            platform: row.platform,
            country: row.country,
            language: row.language,
            category: row.category,
            content_style: row.content_style,
            cost_per_post: row.cost_per_post.and_then(|d| d.to_f64()),
            follower_count: row.follower_count,
            recent_avg_views: row.recent_avg_views,
            virality_score: row.virality_score,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT influencer_id, handle, platform, follower_count, country, \
     language, category, content_style, cost_per_post, age_bracket, recent_avg_views, \
     recent_engagement_rate, post_count_last_90d, virality_score \
     FROM mart_influencer_recommendations";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns planner candidates matching `filters`, best virality score first.
///
/// Each `Some` filter is an exact-match predicate. A missing virality score
/// sorts as `0`; ties are broken by `influencer_id` so the order is stable.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_candidates(
    pool: &PgPool,
    filters: &CandidateFilters,
) -> Result<Vec<Candidate>, DbError> {
    let sql = format!(
        "{SELECT_COLUMNS} \
         WHERE ($1::TEXT IS NULL OR country = $1) \
           AND ($2::TEXT IS NULL OR language = $2) \
           AND ($3::TEXT IS NULL OR category = $3) \
           AND ($4::TEXT IS NULL OR platform = $4) \
         ORDER BY COALESCE(virality_score, 0) DESC, influencer_id"
    );

    let rows = sqlx::query_as::<_, InfluencerRow>(&sql)
        .bind(filters.country.as_deref())
        .bind(filters.language.as_deref())
        .bind(filters.category.as_deref())
        .bind(filters.platform.as_deref())
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Candidate::from).collect())
}

/// Returns one influencer by id, or `None` if the view has no such row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_influencer(
    pool: &PgPool,
    influencer_id: i64,
) -> Result<Option<InfluencerRow>, DbError> {
    let sql = format!("{SELECT_COLUMNS} WHERE influencer_id = $1");
    let row = sqlx::query_as::<_, InfluencerRow>(&sql)
        .bind(influencer_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns `true` if the view knows `influencer_id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn influencer_exists(pool: &PgPool, influencer_id: i64) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM mart_influencer_recommendations WHERE influencer_id = $1)",
    )
    .bind(influencer_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Maps each known id in `ids` to its handle. Unknown ids are absent from the map.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_handles(pool: &PgPool, ids: &[i64]) -> Result<HashMap<i64, String>, DbError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT influencer_id, handle \
         FROM mart_influencer_recommendations \
         WHERE influencer_id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> InfluencerRow {
        InfluencerRow {
            influencer_id: 11,
            handle: "@beauty0011".to_string(),
            platform: "instagram".to_string(),
            follower_count: Some(120_000),
            country: Some("BR".to_string()),
            language: Some("pt".to_string()),
            category: Some("beauty".to_string()),
            content_style: Some("tutorials and how to".to_string()),
            cost_per_post: Some(Decimal::new(123_456, 2)),
            age_bracket: Some("18-24".to_string()),
            recent_avg_views: Some(30_500.0),
            recent_engagement_rate: Some(0.07),
            post_count_last_90d: 21,
            virality_score: Some(14.2),
        }
    }

    #[test]
    fn row_converts_to_candidate() {
        let candidate = Candidate::from(row());
        assert_eq!(candidate.influencer_id, 11);
        assert_eq!(candidate.platform, "instagram");
        assert_eq!(candidate.country.as_deref(), Some("BR"));
        assert!((candidate.cost() - 1_234.56).abs() < 1e-9);
        assert!((candidate.expected_views() - 30_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_cost_stays_missing() {
        let candidate = Candidate::from(InfluencerRow {
            cost_per_post: None,
            ..row()
        });
        assert!(candidate.cost_per_post.is_none());
    }
}
