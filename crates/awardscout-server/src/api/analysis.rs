use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;

use awardscout_core::{AwardLookup, ChanceAnalysis, StudentProfile};
use awardscout_insight::{request_chance_analysis, InsightError};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeChanceRequest {
    student_data: StudentProfile,
    award_id: String,
}

/// `POST /api/analyze-chance`
///
/// Stateless: every request reaches the AI service. Session caching lives
/// with the caller.
pub(super) async fn analyze_chance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AnalyzeChanceRequest>, JsonRejection>,
) -> Result<Json<ChanceAnalysis>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.body_text()))?;

    request
        .student_data
        .validate()
        .map_err(|e| ApiError::new(req_id.0.clone(), "invalid_profile", e.to_string()))?;

    let Some(award) = state.catalog.find_award(&request.award_id) else {
        return Err(ApiError::from_insight(
            req_id.0,
            &InsightError::AwardNotFound(request.award_id),
        ));
    };

    match request_chance_analysis(state.model.as_ref(), &request.student_data, award).await {
        Ok(analysis) => {
            tracing::info!(
                request_id = %req_id.0,
                award_id = %award.id,
                chance_level = %analysis.chance_level,
                "chance analysis served"
            );
            Ok(Json(analysis))
        }
        Err(e) => Err(ApiError::from_insight(req_id.0, &e)),
    }
}
