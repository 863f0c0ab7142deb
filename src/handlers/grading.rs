// src/handlers/grading.rs
//
// Thin transport over the grading oracle. These handlers never fail on
// oracle trouble: the oracle's internal fallback is the only resilience
// behavior, so the envelope here is always ok = true.

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{error::AppError, oracle::GradingOracle, response::ApiResponse};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GradeEssayRequest {
    #[validate(length(min = 1, max = 4000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 20000))]
    pub essay_text: String,
    #[serde(default)]
    pub rubric: String,
    #[validate(range(min = 1))]
    pub max_points: u32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProctorReviewRequest {
    #[validate(length(min = 1, max = 4000))]
    pub event_description: String,
}

pub async fn grade_essay(
    State(oracle): State<Arc<dyn GradingOracle>>,
    Json(payload): Json<GradeEssayRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let grade = oracle
        .grade(
            &payload.question_text,
            &payload.essay_text,
            &payload.rubric,
            payload.max_points,
        )
        .await;
    Ok(Json(ApiResponse::ok(grade)))
}

pub async fn proctor_review(
    State(oracle): State<Arc<dyn GradingOracle>>,
    Json(payload): Json<ProctorReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let review = oracle.review(&payload.event_description).await;
    Ok(Json(ApiResponse::ok(review)))
}
