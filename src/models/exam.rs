// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Lifecycle status of a teacher-authored exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Scheduled,
    Active,
    Ended,
}

/// Status of one student's attempt record against one exam.
/// Serialized with the kebab-case spellings the frontend expects
/// ("not-started", "in-progress", "submitted").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
}

/// A single question owned by its parent exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    /// Present (and non-empty) for multiple-choice questions.
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub points: u32,
    pub is_auto_grade: bool,
    pub rubric: Option<String>,
}

/// A teacher-authored assessment definition with a lifecycle status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveExam {
    pub id: String,
    pub title: String,
    pub status: ExamStatus,
    /// Allotted time in minutes. Defaults to 60 on creation.
    pub duration: u32,
    pub questions: Vec<ExamQuestion>,
    pub teacher_id: Option<String>,
}

/// One student's attempt against one exam. At most one session exists per
/// (exam_id, student_id) pair; the store keys sessions by that pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    pub status: SessionStatus,
    /// Caller-supplied completion percentage, 0 to 100. Not required to be
    /// monotonic; clients may move it backward.
    pub progress: u8,
    pub score: Option<f64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub answers: HashMap<String, String>,
}

/// DTO for authoring a question inside a create-or-update exam request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_question_payload))]
pub struct QuestionPayload {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    #[validate(range(min = 1))]
    pub points: u32,
    #[serde(default)]
    pub is_auto_grade: bool,
    #[validate(length(max = 4000))]
    pub rubric: Option<String>,
}

fn validate_question_payload(q: &QuestionPayload) -> Result<(), validator::ValidationError> {
    if q.question_type == QuestionType::MultipleChoice {
        match &q.options {
            Some(opts) if !opts.is_empty() => {}
            _ => return Err(validator::ValidationError::new("options_required_for_multiple_choice")),
        }
    }
    Ok(())
}

/// DTO for the create-or-update exam call. Supplying an `examId` that exists
/// replaces that exam's questions and title; a missing or unknown id falls
/// through to creation (deliberate upsert policy).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamRequest {
    pub exam_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(nested, length(min = 1, message = "An exam needs at least one question."))]
    pub questions: Vec<QuestionPayload>,
    pub teacher_id: Option<String>,
}

impl QuestionPayload {
    pub fn into_question(self, id: String) -> ExamQuestion {
        ExamQuestion {
            id,
            question_type: self.question_type,
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            points: self.points,
            is_auto_grade: self.is_auto_grade,
            rubric: self.rubric,
        }
    }
}
