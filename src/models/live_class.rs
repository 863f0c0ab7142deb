// src/models/live_class.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveClassStatus {
    Live,
    Ended,
}

/// A chat message in a live class. The message list is an append-only
/// in-memory log, not a pub/sub channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveClass {
    pub id: String,
    pub subject: String,
    pub teacher_id: String,
    pub status: LiveClassStatus,
    /// Student ids currently joined. Join is idempotent per student.
    pub participants: Vec<String>,
    pub messages: Vec<LiveMessage>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLiveClassRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    pub teacher_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRequest {
    pub student_id: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    pub sender_id: String,
    #[validate(length(min = 1, max = 100))]
    pub sender_name: String,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}
