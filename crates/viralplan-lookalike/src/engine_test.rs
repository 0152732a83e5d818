use std::collections::HashMap;

use async_trait::async_trait;

use super::*;

/// Encoder backed by a fixed text -> vector map.
struct MapEncoder {
    vectors: HashMap<&'static str, Vec<f32>>,
}

#[async_trait]
impl TextEncoder for MapEncoder {
    fn model(&self) -> &str {
        "map-encoder"
    }

    async fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, LookalikeError> {
        texts
            .iter()
            .map(|t| {
                self.vectors
                    .get(t)
                    .cloned()
                    .ok_or_else(|| LookalikeError::Encoder(format!("unknown text '{t}'")))
            })
            .collect()
    }
}

fn encoder() -> Arc<dyn TextEncoder> {
    let mut vectors = HashMap::new();
    vectors.insert("dance", vec![1.0, 0.0, 0.0]);
    vectors.insert("tutorials", vec![0.0, 0.0, 1.0]);
    vectors.insert("wrong dimension", vec![1.0, 0.0]);
    Arc::new(MapEncoder { vectors })
}

/// Five unit vectors in 3-D. Rows 2 and 5 are identical.
fn engine() -> LookalikeEngine {
    let table = EmbeddingTable::from_parts(
        vec![1, 2, 3, 4, 5],
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.8, 0.6, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.8, 0.6, 0.0],
        ],
        3,
    )
    .expect("valid table");
    LookalikeEngine::new(table, encoder())
}

fn ids(neighbors: &[Neighbor]) -> Vec<i64> {
    neighbors.iter().map(|n| n.influencer_id).collect()
}

#[test]
fn by_influencer_ranks_by_similarity_and_excludes_self() {
    let result = engine().by_influencer(1, 10);

    assert_eq!(ids(&result), vec![2, 5, 3, 4]);
    assert!((result[0].score - 0.8).abs() < 1e-6);
    assert!(result.iter().all(|n| n.influencer_id != 1));
}

#[test]
fn by_influencer_ties_keep_table_order() {
    // Row 5 equals row 2, so querying 2 puts 5 first (score 1.0), then 1.
    let result = engine().by_influencer(2, 2);
    assert_eq!(ids(&result), vec![5, 1]);

    // Rows 2 and 5 tie against row 1; 2 precedes 5 in the table.
    let result = engine().by_influencer(1, 2);
    assert_eq!(ids(&result), vec![2, 5]);
}

#[test]
fn by_influencer_never_returns_query_id() {
    let engine = engine();
    for &id in engine.table().ids() {
        for k in 1..=6 {
            let result = engine.by_influencer(id, k);
            assert!(result.iter().all(|n| n.influencer_id != id));
            assert!(result.len() <= k);
            assert!(result.len() < engine.table().len());
        }
    }
}

#[test]
fn by_influencer_unknown_id_is_empty() {
    assert!(engine().by_influencer(999, 10).is_empty());
}

#[test]
fn by_influencer_truncates_to_top_k() {
    assert_eq!(engine().by_influencer(3, 1).len(), 1);
    assert!(engine().by_influencer(3, 0).is_empty());
}

#[test]
fn single_row_table_has_no_lookalikes() {
    let table = EmbeddingTable::from_parts(vec![7], vec![vec![1.0]], 1).expect("table");
    let engine = LookalikeEngine::new(table, encoder());
    assert!(engine.by_influencer(7, 10).is_empty());
}

#[tokio::test]
async fn by_text_ranks_whole_table_without_exclusion() {
    let result = engine().by_text("dance", 10).await.expect("search");

    assert_eq!(result.len(), 5);
    assert_eq!(result[0].influencer_id, 1);
    assert!((result[0].score - 1.0).abs() < 1e-6);
    assert_eq!(ids(&result[..3]), vec![1, 2, 5]);
}

#[tokio::test]
async fn by_text_respects_top_k() {
    let result = engine().by_text("tutorials", 2).await.expect("search");
    assert_eq!(ids(&result), vec![4, 1]);
}

#[tokio::test]
async fn by_text_is_deterministic() {
    let engine = engine();
    let first = engine.by_text("dance", 4).await.expect("first");
    let second = engine.by_text("dance", 4).await.expect("second");
    assert_eq!(first, second);
}

#[tokio::test]
async fn by_text_propagates_encoder_failure() {
    let err = engine().by_text("unknown", 3).await.unwrap_err();
    assert!(matches!(err, LookalikeError::Encoder(_)));
}

#[tokio::test]
async fn by_text_rejects_dimension_mismatch() {
    let err = engine().by_text("wrong dimension", 3).await.unwrap_err();
    assert!(matches!(
        err,
        LookalikeError::InvalidDimension {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn by_vector_can_exclude_an_id() {
    let result = engine()
        .by_vector(&[0.0, 1.0, 0.0], Some(3), 2)
        .expect("search");
    assert_eq!(ids(&result), vec![2, 5]);
}

#[test]
fn load_reports_missing_artifact() {
    let path = std::env::temp_dir().join(format!(
        "viralplan-engine-missing-{}.json",
        std::process::id()
    ));
    let err = LookalikeEngine::load(&path, encoder()).err().expect("load fails");
    assert!(matches!(err, LookalikeError::NotFound { .. }));
}
