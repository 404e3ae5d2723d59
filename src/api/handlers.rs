use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{QuizAnswers, RecommendationResponse, TasteProfile, UserId},
    services::{
        derive_profile,
        quiz::{self, ProfileStatus},
        recommendations,
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    pub user_id: UserId,
    pub answers: QuizAnswers,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub message: String,
    pub profile: TasteProfile,
}

#[derive(Debug, Deserialize)]
pub struct DeriveRequest {
    pub answers: QuizAnswers,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: UserId,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Derive a profile from answers without storing it
pub async fn derive(Json(request): Json<DeriveRequest>) -> Json<TasteProfile> {
    Json(derive_profile(&request.answers))
}

/// Submit quiz answers for a user
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<QuizSubmission>,
) -> AppResult<Json<QuizResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        "Processing quiz submission"
    );

    let profile = quiz::submit_quiz(state.store.as_ref(), &request.user_id, &request.answers).await?;

    Ok(Json(QuizResponse {
        message: "Quiz completed".to_string(),
        profile,
    }))
}

/// Get a user's stored profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ProfileStatus>> {
    let status = quiz::profile_status(state.store.as_ref(), &UserId::new(user_id)).await?;
    Ok(Json(status))
}

/// Recommend records for a user
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        "Processing recommendation request"
    );

    let mut rng = state.request_rng();
    let response = recommendations::recommend_for_user(
        state.store.as_ref(),
        &state.engine,
        &request.user_id,
        state.described_recommendations,
        &mut rng,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        returned = response.recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(response))
}
