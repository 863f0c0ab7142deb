// src/models/attendance.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

/// One attendance mark for one student on one date.
/// Upserted by the (date, student_id) pair; re-marking a day replaces the
/// earlier record. Every Absent mark also decrements the student's
/// attendance counter by 1, floored at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub student_id: String,
    #[validate(length(min = 8, max = 10))]
    pub date: String,
    pub status: AttendanceStatus,
}
