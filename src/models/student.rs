// src/models/student.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A student enrolled in a school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub school_id: String,
    pub name: String,
    pub class_name: String,
    /// Code the student types (with the school code) to enter the portal.
    pub access_code: String,
    /// Running attendance counter. Decremented by 1 for every Absent mark,
    /// floored at 0. Present/Late/Excused marks never change it.
    pub attendance: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub school_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub class_name: String,
    #[validate(length(min = 4, max = 20))]
    pub access_code: String,
    /// Initial attendance counter; defaults to 0.
    #[serde(default)]
    pub attendance: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub access_code: Option<String>,
    pub attendance: Option<u32>,
}

/// DTO for resolving a student from a school code plus access code.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentAccessRequest {
    #[validate(length(min = 2, max = 20))]
    pub school_code: String,
    #[validate(length(min = 4, max = 20))]
    pub access_code: String,
}
