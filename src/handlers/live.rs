// src/handlers/live.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::live_class::{CreateLiveClassRequest, ParticipantRequest, PostMessageRequest},
    response::ApiResponse,
    store::SharedStore,
};

pub async fn create_live_class(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateLiveClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let class = store.write().await.create_live_class(payload);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(class))))
}

pub async fn list_live_classes(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, AppError> {
    let classes = store.read().await.list_live_classes();
    Ok(Json(ApiResponse::ok(classes)))
}

pub async fn join_live_class(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<ParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let class = store
        .write()
        .await
        .join_live_class(&id, &payload.student_id)
        .ok_or(AppError::NotFound("Live class not found".to_string()))?;
    Ok(Json(ApiResponse::ok(class)))
}

pub async fn leave_live_class(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<ParticipantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let class = store
        .write()
        .await
        .leave_live_class(&id, &payload.student_id)
        .ok_or(AppError::NotFound("Live class not found".to_string()))?;
    Ok(Json(ApiResponse::ok(class)))
}

pub async fn post_message(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let message = store
        .write()
        .await
        .post_live_message(&id, payload)
        .ok_or(AppError::NotFound("Live class not found".to_string()))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

pub async fn list_messages(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let messages = store
        .read()
        .await
        .live_messages(&id)
        .ok_or(AppError::NotFound("Live class not found".to_string()))?;
    Ok(Json(ApiResponse::ok(messages)))
}

pub async fn end_live_class(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let class = store
        .write()
        .await
        .end_live_class(&id)
        .ok_or(AppError::NotFound("Live class not found".to_string()))?;
    Ok(Json(ApiResponse::ok(class)))
}
