// src/handlers/subjects.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::subject::{CreateSubjectRequest, UpdateSubjectRequest},
    response::ApiResponse,
    store::SharedStore,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubjectsQuery {
    pub school_id: Option<String>,
    pub class_name: Option<String>,
}

pub async fn create_subject(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let subject = store.write().await.create_subject(payload);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(subject))))
}

pub async fn list_subjects(
    State(store): State<SharedStore>,
    Query(query): Query<ListSubjectsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = store
        .read()
        .await
        .list_subjects(query.school_id.as_deref(), query.class_name.as_deref());
    Ok(Json(ApiResponse::ok(subjects)))
}

pub async fn get_subject(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = store
        .read()
        .await
        .get_subject(&id)
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;
    Ok(Json(ApiResponse::ok(subject)))
}

pub async fn update_subject(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let subject = store
        .write()
        .await
        .update_subject(&id, payload)
        .ok_or(AppError::NotFound("Subject not found".to_string()))?;
    Ok(Json(ApiResponse::ok(subject)))
}

pub async fn delete_subject(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.write().await.delete_subject(&id) {
        return Err(AppError::NotFound("Subject not found".to_string()));
    }
    Ok(Json(ApiResponse::ok(true)))
}
