// src/handlers/schools.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::school::{CreateSchoolRequest, UpdateSchoolRequest},
    response::ApiResponse,
    store::SharedStore,
};

pub async fn create_school(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateSchoolRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let school = store.write().await.create_school(payload);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(school))))
}

pub async fn list_schools(
    State(store): State<SharedStore>,
) -> Result<impl IntoResponse, AppError> {
    let schools = store.read().await.list_schools();
    Ok(Json(ApiResponse::ok(schools)))
}

pub async fn get_school(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let school = store
        .read()
        .await
        .get_school(&id)
        .ok_or(AppError::NotFound("School not found".to_string()))?;
    Ok(Json(ApiResponse::ok(school)))
}

pub async fn update_school(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSchoolRequest>,
) -> Result<impl IntoResponse, AppError> {
    let school = store
        .write()
        .await
        .update_school(&id, payload)
        .ok_or(AppError::NotFound("School not found".to_string()))?;
    Ok(Json(ApiResponse::ok(school)))
}

pub async fn delete_school(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.write().await.delete_school(&id) {
        return Err(AppError::NotFound("School not found".to_string()));
    }
    Ok(Json(ApiResponse::ok(true)))
}
