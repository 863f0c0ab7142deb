// src/models/result.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A student's recorded mark in one subject for a term.
/// Upserted by the (student_id, subject_name) pair: recording a second mark
/// for the same student and subject replaces the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: String,
    pub student_id: String,
    pub subject_name: String,
    pub term: String,
    pub score: f64,
    pub max_score: Option<f64>,
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResultRequest {
    pub student_id: String,
    #[validate(length(min = 1, max = 100))]
    pub subject_name: String,
    #[validate(length(min = 1, max = 50))]
    pub term: String,
    #[validate(range(min = 0.0))]
    pub score: f64,
    pub max_score: Option<f64>,
    #[validate(length(max = 1000))]
    pub remark: Option<String>,
}
