// src/handlers/exams.rs
//
// Transport surface of the exam lifecycle. Handlers validate, call into the
// store, and wrap the result in the `{ok, data, message}` envelope; the
// state-machine rules themselves live in store/exams.rs.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::exam::{CreateExamRequest, ExamStatus},
    response::ApiResponse,
    store::SharedStore,
};

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ExamStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub exam_id: String,
    pub student_id: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub exam_id: String,
    pub student_id: String,
    #[validate(range(max = 100))]
    pub progress: u8,
    /// When supplied, replaces the stored answers map wholesale.
    pub answers: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExamRequest {
    pub student_id: String,
    pub answers: HashMap<String, String>,
    /// Final score, tallied upstream (client-side for objective questions,
    /// grading oracle for essays). Accepted as given.
    pub score: f64,
    /// Absent means "the currently active exam".
    pub exam_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSessionRequest {
    pub exam_id: String,
    pub student_id: String,
}

/// Creates an exam, or replaces the questions and title of an existing one
/// when `examId` resolves. An unknown id falls through to creation.
pub async fn create_or_update_exam(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let creating = payload.exam_id.is_none();
    let exam = store.write().await.create_or_update_exam(payload);
    let status = if creating {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::ok(exam))))
}

pub async fn list_exams(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let exams = store.read().await.list_exams();
    Ok(Json(ApiResponse::ok(exams)))
}

pub async fn get_exam(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let exam = store
        .read()
        .await
        .get_exam(&id)
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;
    Ok(Json(ApiResponse::ok(exam)))
}

/// Exams students may take right now (status = active).
pub async fn list_available(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, AppError> {
    let exams = store.read().await.list_available_exams();
    Ok(Json(ApiResponse::ok(exams)))
}

pub async fn set_status(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    store.write().await.set_exam_status(&id, payload.status)?;
    Ok(Json(ApiResponse::ok(true)))
}

pub async fn start_session(
    State(store): State<SharedStore>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = store
        .write()
        .await
        .start_session(&payload.exam_id, &payload.student_id);
    Ok(Json(ApiResponse::ok(session)))
}

pub async fn update_progress(
    State(store): State<SharedStore>,
    Json(payload): Json<UpdateProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    store.write().await.update_progress(
        &payload.exam_id,
        &payload.student_id,
        payload.progress,
        payload.answers,
    )?;
    Ok(Json(ApiResponse::ok(true)))
}

pub async fn submit_exam(
    State(store): State<SharedStore>,
    Json(payload): Json<SubmitExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = store.write().await.submit_exam(
        &payload.student_id,
        payload.answers,
        payload.score,
        payload.exam_id.as_deref(),
    )?;
    Ok(Json(ApiResponse::ok_with_message(
        session,
        "Exam submitted successfully",
    )))
}

pub async fn reset_session(
    State(store): State<SharedStore>,
    Json(payload): Json<ResetSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    store
        .write()
        .await
        .reset_session(&payload.exam_id, &payload.student_id)?;
    Ok(Json(ApiResponse::ok(true)))
}

pub async fn list_sessions(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = store.read().await.list_sessions(&id);
    Ok(Json(ApiResponse::ok(sessions)))
}
