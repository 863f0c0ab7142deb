// src/handlers/students.rs

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
    models::student::{CreateStudentRequest, StudentAccessRequest, UpdateStudentRequest},
    response::ApiResponse,
    store::SharedStore,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsQuery {
    pub school_id: Option<String>,
    pub class_name: Option<String>,
}

pub async fn create_student(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut store = store.write().await;
    if store.get_school(&payload.school_id).is_none() {
        return Err(AppError::NotFound("School not found".to_string()));
    }
    let student = store.create_student(payload);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(student))))
}

pub async fn list_students(
    State(store): State<SharedStore>,
    Query(query): Query<ListStudentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let students = store
        .read()
        .await
        .list_students(query.school_id.as_deref(), query.class_name.as_deref());
    Ok(Json(ApiResponse::ok(students)))
}

pub async fn get_student(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = store
        .read()
        .await
        .get_student(&id)
        .ok_or(AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(ApiResponse::ok(student)))
}

pub async fn update_student(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student = store
        .write()
        .await
        .update_student(&id, payload)
        .ok_or(AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(ApiResponse::ok(student)))
}

pub async fn delete_student(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.write().await.delete_student(&id) {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    Ok(Json(ApiResponse::ok(true)))
}

/// Resolves a student from a school code plus access code. This is the
/// student portal's entry point; it carries no session or token semantics.
pub async fn resolve_access(
    State(store): State<SharedStore>,
    Json(payload): Json<StudentAccessRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let student = store
        .read()
        .await
        .resolve_student_access(&payload.school_code, &payload.access_code)
        .ok_or(AppError::NotFound(
            "No student matches that school and access code".to_string(),
        ))?;
    Ok(Json(ApiResponse::ok(student)))
}
