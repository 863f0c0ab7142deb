// src/handlers/users.rs

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
    models::user::{CreateUserRequest, UpdateUserRequest},
    response::ApiResponse,
    store::SharedStore,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub school_id: Option<String>,
}

pub async fn create_user(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = store.write().await.create_user(payload);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

pub async fn list_users(
    State(store): State<SharedStore>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = store.read().await.list_users(query.school_id.as_deref());
    Ok(Json(ApiResponse::ok(users)))
}

pub async fn get_user(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = store
        .read()
        .await
        .get_user(&id)
        .ok_or(AppError::NotFound("User not found".to_string()))?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn update_user(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = store
        .write()
        .await
        .update_user(&id, payload)
        .ok_or(AppError::NotFound("User not found".to_string()))?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn delete_user(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.write().await.delete_user(&id) {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(Json(ApiResponse::ok(true)))
}
