// src/oracle.rs
//
// Grading Oracle: scores free-text (essay) answers and reviews proctoring
// events through a generative model. Both calls are single-shot
// prompt-and-parse wrappers; on ANY failure (HTTP error, timeout, malformed
// reply) they return a deterministic fallback instead of an error. Partial
// credit on grading failure is policy, not an accident.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Feedback string returned whenever automated grading fails.
pub const FALLBACK_FEEDBACK: &str =
    "Automated grading was unavailable for this answer. Partial credit has been applied and a teacher will review it.";

/// Reason string returned whenever automated proctor review fails.
pub const FALLBACK_PROCTOR_REASON: &str =
    "Automated review was unavailable; no violation recorded.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EssayGrade {
    pub score: f64,
    pub feedback: String,
}

impl EssayGrade {
    /// The deterministic failure path: floor(max_points / 2) plus the fixed
    /// feedback string.
    pub fn fallback(max_points: u32) -> Self {
        Self {
            score: (max_points / 2) as f64,
            feedback: FALLBACK_FEEDBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProctorReview {
    pub flagged: bool,
    pub reason: String,
}

impl ProctorReview {
    pub fn fallback() -> Self {
        Self {
            flagged: false,
            reason: FALLBACK_PROCTOR_REASON.to_string(),
        }
    }
}

/// External scoring collaborator. Implementations must never surface a
/// failure to the caller; the fallback values above are the only failure
/// behavior.
#[async_trait]
pub trait GradingOracle: Send + Sync {
    async fn grade(
        &self,
        question_text: &str,
        essay_text: &str,
        rubric_text: &str,
        max_points: u32,
    ) -> EssayGrade;

    async fn review(&self, event_description: &str) -> ProctorReview;
}

/// Oracle used when no API key is configured, and in tests: always takes
/// the fallback path.
#[derive(Debug, Default)]
pub struct FallbackOracle;

#[async_trait]
impl GradingOracle for FallbackOracle {
    async fn grade(&self, _q: &str, _e: &str, _r: &str, max_points: u32) -> EssayGrade {
        EssayGrade::fallback(max_points)
    }

    async fn review(&self, _event: &str) -> ProctorReview {
        ProctorReview::fallback()
    }
}

/// Oracle backed by an OpenAI-compatible chat-completions endpoint.
pub struct HttpGradingOracle {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpGradingOracle {
    pub fn new(config: &Config, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.oracle_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: config.oracle_api_url.clone(),
            api_key,
            model: config.oracle_model.clone(),
        }
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, reqwest::Error> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response: ChatResponse = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl GradingOracle for HttpGradingOracle {
    async fn grade(
        &self,
        question_text: &str,
        essay_text: &str,
        rubric_text: &str,
        max_points: u32,
    ) -> EssayGrade {
        let user = format!(
            "Question:\n{question_text}\n\nRubric:\n{rubric_text}\n\nStudent essay:\n{essay_text}\n\nMaximum points: {max_points}",
        );
        match self.complete(GRADING_SYSTEM_PROMPT, &user).await {
            Ok(raw) => parse_grade(&raw, max_points).unwrap_or_else(|| {
                tracing::warn!("Grading oracle returned an unparseable reply");
                EssayGrade::fallback(max_points)
            }),
            Err(e) => {
                tracing::warn!("Grading oracle call failed: {}", e);
                EssayGrade::fallback(max_points)
            }
        }
    }

    async fn review(&self, event_description: &str) -> ProctorReview {
        match self.complete(PROCTOR_SYSTEM_PROMPT, event_description).await {
            Ok(raw) => parse_review(&raw).unwrap_or_else(|| {
                tracing::warn!("Proctor oracle returned an unparseable reply");
                ProctorReview::fallback()
            }),
            Err(e) => {
                tracing::warn!("Proctor oracle call failed: {}", e);
                ProctorReview::fallback()
            }
        }
    }
}

const GRADING_SYSTEM_PROMPT: &str = r#"You are an essay grader. Score the student's essay against the question and rubric.
Respond with ONLY a JSON object, no markdown and no extra text:
{"score": <number between 0 and the maximum points>, "feedback": "<two or three sentences for the student>"}"#;

const PROCTOR_SYSTEM_PROMPT: &str = r#"You are an exam proctor reviewing a single monitoring event.
Respond with ONLY a JSON object, no markdown and no extra text:
{"flagged": <true or false>, "reason": "<one sentence>"}"#;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Deserialize)]
struct GradePayload {
    score: f64,
    feedback: String,
}

#[derive(Deserialize)]
struct ReviewPayload {
    flagged: bool,
    reason: String,
}

/// Models often wrap JSON in a ```json fence despite instructions.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn parse_grade(raw: &str, max_points: u32) -> Option<EssayGrade> {
    let payload: GradePayload = serde_json::from_str(strip_code_fence(raw)).ok()?;
    if !payload.score.is_finite() {
        return None;
    }
    Some(EssayGrade {
        score: payload.score.clamp(0.0, max_points as f64),
        feedback: payload.feedback,
    })
}

fn parse_review(raw: &str) -> Option<ProctorReview> {
    let payload: ReviewPayload = serde_json::from_str(strip_code_fence(raw)).ok()?;
    Some(ProctorReview {
        flagged: payload.flagged,
        reason: payload.reason,
    })
}
