use axum::{extract::State, Extension, Json};
use viralplan_core::{plan_campaign, CampaignBrief, CampaignPlan};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn plan(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(brief): Json<CampaignBrief>,
) -> Result<Json<ApiResponse<CampaignPlan>>, ApiError> {
    brief
        .validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let candidates = viralplan_db::list_candidates(&state.pool, &brief.filters())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let candidate_count = candidates.len();

    let plan = plan_campaign(&brief, candidates);

    tracing::info!(
        objective = %brief.objective,
        candidates = candidate_count,
        selected = plan.influencers.len(),
        total_cost = plan.total_cost,
        budget = brief.budget,
        "campaign planned"
    );

    Ok(Json(ApiResponse {
        data: plan,
        meta: ResponseMeta::new(req_id.0),
    }))
}
