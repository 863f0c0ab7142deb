// src/handlers/records.rs
//
// Assessments, results and attendance. All three POST endpoints are upserts.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        assessment::UpsertAssessmentRequest, attendance::MarkAttendanceRequest,
        result::UpsertResultRequest,
    },
    response::ApiResponse,
    store::SharedStore,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAssessmentsQuery {
    pub subject_id: Option<String>,
    pub term: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResultsQuery {
    pub student_id: Option<String>,
    pub subject_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttendanceQuery {
    pub date: Option<String>,
    pub student_id: Option<String>,
}

pub async fn upsert_assessment(
    State(store): State<SharedStore>,
    Json(payload): Json<UpsertAssessmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let assessment = store.write().await.upsert_assessment(payload);
    Ok(Json(ApiResponse::ok(assessment)))
}

pub async fn list_assessments(
    State(store): State<SharedStore>,
    Query(query): Query<ListAssessmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let assessments = store
        .read()
        .await
        .list_assessments(query.subject_id.as_deref(), query.term.as_deref());
    Ok(Json(ApiResponse::ok(assessments)))
}

pub async fn delete_assessment(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.write().await.delete_assessment(&id) {
        return Err(AppError::NotFound("Assessment not found".to_string()));
    }
    Ok(Json(ApiResponse::ok(true)))
}

pub async fn upsert_result(
    State(store): State<SharedStore>,
    Json(payload): Json<UpsertResultRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut store = store.write().await;
    if store.get_student(&payload.student_id).is_none() {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    let result = store.upsert_result(payload);
    Ok(Json(ApiResponse::ok(result)))
}

pub async fn list_results(
    State(store): State<SharedStore>,
    Query(query): Query<ListResultsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let results = store
        .read()
        .await
        .list_results(query.student_id.as_deref(), query.subject_name.as_deref());
    Ok(Json(ApiResponse::ok(results)))
}

/// Marks (or re-marks) a student for a date. An Absent mark also decrements
/// the student's attendance counter; see the store for the exact rule.
pub async fn mark_attendance(
    State(store): State<SharedStore>,
    Json(payload): Json<MarkAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let record = store
        .write()
        .await
        .mark_attendance(payload)
        .ok_or(AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(ApiResponse::ok(record)))
}

pub async fn list_attendance(
    State(store): State<SharedStore>,
    Query(query): Query<ListAttendanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let records = store
        .read()
        .await
        .list_attendance(query.date.as_deref(), query.student_id.as_deref());
    Ok(Json(ApiResponse::ok(records)))
}
