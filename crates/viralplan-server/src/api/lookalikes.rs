use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use viralplan_lookalike::{LookalikeEngine, LookalikeError, Neighbor, DEFAULT_TOP_K};

use crate::lookalike::LookalikeService;
use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct LookalikeRequest {
    pub influencer_id: i64,
    pub top_k: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LookalikeSearchRequest {
    pub text: String,
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub(super) struct LookalikeItem {
    influencer_id: i64,
    handle: String,
    similarity: f32,
}

/// Defaults a missing `top_k` and rejects values below 1. Larger values are
/// honored as given; the engine returns at most one row per influencer.
pub(super) fn normalize_top_k(top_k: Option<i64>) -> Result<usize, String> {
    match top_k {
        None => Ok(DEFAULT_TOP_K),
        Some(k) if k < 1 => Err(format!("top_k must be at least 1, got {k}")),
        Some(k) => Ok(usize::try_from(k).unwrap_or(usize::MAX)),
    }
}

fn ready_engine(state: &AppState, request_id: &str) -> Result<Arc<LookalikeEngine>, ApiError> {
    match &state.lookalike {
        LookalikeService::Ready(engine) => Ok(Arc::clone(engine)),
        LookalikeService::Unavailable(reason) => {
            tracing::debug!(reason = %reason, "lookalike request while embeddings unavailable");
            Err(ApiError::new(
                request_id,
                "service_unavailable",
                "lookalike search is unavailable: embeddings are not loaded",
            ))
        }
    }
}

fn map_lookalike_error(request_id: String, error: &LookalikeError) -> ApiError {
    match error {
        LookalikeError::Encoder(_) => {
            tracing::error!(error = %error, "embedding service request failed");
            ApiError::new(request_id, "upstream_error", "embedding service request failed")
        }
        _ => {
            tracing::error!(error = %error, "lookalike search failed");
            ApiError::new(request_id, "internal_error", "lookalike search failed")
        }
    }
}

async fn with_handles(
    state: &AppState,
    request_id: &str,
    neighbors: Vec<Neighbor>,
) -> Result<Vec<LookalikeItem>, ApiError> {
    let ids: Vec<i64> = neighbors.iter().map(|n| n.influencer_id).collect();
    let mut handles = viralplan_db::list_handles(&state.pool, &ids)
        .await
        .map_err(|e| map_db_error(request_id.to_owned(), &e))?;

    Ok(neighbors
        .into_iter()
        .map(|n| LookalikeItem {
            influencer_id: n.influencer_id,
            handle: handles.remove(&n.influencer_id).unwrap_or_default(),
            similarity: n.score,
        })
        .collect())
}

pub(super) async fn by_influencer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LookalikeRequest>,
) -> Result<Json<ApiResponse<Vec<LookalikeItem>>>, ApiError> {
    let top_k = normalize_top_k(body.top_k)
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;
    let engine = ready_engine(&state, &req_id.0)?;

    let known = viralplan_db::influencer_exists(&state.pool, body.influencer_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    if !known {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("influencer {} not found", body.influencer_id),
        ));
    }

    let neighbors = engine.by_influencer(body.influencer_id, top_k);
    let data = with_handles(&state, &req_id.0, neighbors).await?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn by_text(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<LookalikeSearchRequest>,
) -> Result<Json<ApiResponse<Vec<LookalikeItem>>>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "text must not be empty",
        ));
    }
    let top_k = normalize_top_k(body.top_k)
        .map_err(|msg| ApiError::new(req_id.0.clone(), "validation_error", msg))?;
    let engine = ready_engine(&state, &req_id.0)?;

    let neighbors = engine
        .by_text(&body.text, top_k)
        .await
        .map_err(|e| map_lookalike_error(req_id.0.clone(), &e))?;
    let data = with_handles(&state, &req_id.0, neighbors).await?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
