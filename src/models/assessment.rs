// src/models/assessment.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A graded piece of work attached to a subject (test, quiz, project).
/// Upserted by id: posting an existing id merges the supplied fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub school_id: String,
    pub subject_id: String,
    pub title: String,
    pub term: String,
    /// ISO date (YYYY-MM-DD) the assessment was held, if scheduled.
    pub date: Option<String>,
    pub max_score: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAssessmentRequest {
    /// Existing id to merge into; absent means create.
    pub id: Option<String>,
    pub school_id: String,
    pub subject_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 50))]
    pub term: String,
    pub date: Option<String>,
    #[validate(range(min = 1.0))]
    pub max_score: f64,
}
