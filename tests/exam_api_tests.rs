// tests/exam_api_tests.rs

use std::sync::Arc;

use campus_backend::config::Config;
use campus_backend::oracle::{FallbackOracle, FALLBACK_FEEDBACK, FALLBACK_PROCTOR_REASON};
use campus_backend::routes;
use campus_backend::state::AppState;
use campus_backend::store::Store;

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let state = AppState {
        store: Store::shared(),
        config: Config::default(),
        oracle: Arc::new(FallbackOracle),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn create_exam(client: &reqwest::Client, address: &str, title: &str) -> serde_json::Value {
    let response = client
        .post(format!("{}/api/exams", address))
        .json(&serde_json::json!({
            "title": title,
            "teacherId": "t1",
            "questions": [
                {"type": "multiple_choice", "text": "2 + 2?", "options": ["3", "4"], "correctAnswer": "4", "points": 2, "isAutoGrade": true},
                {"type": "essay", "text": "Explain photosynthesis.", "points": 10, "rubric": "Mention light and chlorophyll."}
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    response.json().await.unwrap()
}

#[tokio::test]
async fn health_check_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn created_exams_start_scheduled_with_default_duration() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body = create_exam(&client, &address, "Biology Midterm").await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["status"], "scheduled");
    assert_eq!(body["data"]["duration"], 60);
    assert_eq!(body["data"]["questions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn multiple_choice_without_options_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/exams", address))
        .json(&serde_json::json!({
            "title": "Broken",
            "questions": [
                {"type": "multiple_choice", "text": "Pick one", "points": 1}
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn full_exam_attempt_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let exam = create_exam(&client, &address, "E1").await;
    let exam_id = exam["data"]["id"].as_str().unwrap().to_string();

    // scheduled exams are not available yet
    let available: serde_json::Value = client
        .get(format!("{}/api/exams/available", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available["data"].as_array().unwrap().len(), 0);

    // activate, then it shows up
    let response = client
        .put(format!("{}/api/exams/{}/status", address, exam_id))
        .json(&serde_json::json!({"status": "active"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let available: serde_json::Value = client
        .get(format!("{}/api/exams/available", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available["data"].as_array().unwrap().len(), 1);

    // start: lazily created, already in progress
    let session: serde_json::Value = client
        .post(format!("{}/api/exams/sessions/start", address))
        .json(&serde_json::json!({"examId": exam_id, "studentId": "s1"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session["data"]["status"], "in-progress");
    assert_eq!(session["data"]["progress"], 0);
    assert_eq!(session["data"]["answers"], serde_json::json!({}));

    // progress update
    let response = client
        .put(format!("{}/api/exams/sessions/progress", address))
        .json(&serde_json::json!({
            "examId": exam_id,
            "studentId": "s1",
            "progress": 40,
            "answers": {"q1": "B"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // submit with an upstream-tallied score
    let submitted: serde_json::Value = client
        .post(format!("{}/api/exams/sessions/submit", address))
        .json(&serde_json::json!({
            "examId": exam_id,
            "studentId": "s1",
            "answers": {"q1": "B", "q2": "A"},
            "score": 8
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(submitted["ok"], true);
    assert_eq!(submitted["data"]["status"], "submitted");
    assert_eq!(submitted["data"]["progress"], 100);
    assert_eq!(submitted["data"]["score"], 8.0);

    // submitted sessions are immutable
    let response = client
        .put(format!("{}/api/exams/sessions/progress", address))
        .json(&serde_json::json!({
            "examId": exam_id,
            "studentId": "s1",
            "progress": 50
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["data"], serde_json::Value::Null);

    // still exactly one session for the pair
    let sessions: serde_json::Value = client
        .get(format!("{}/api/exams/{}/sessions", address, exam_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sessions["data"].as_array().unwrap().len(), 1);

    // reset deletes the attempt entirely
    let response = client
        .post(format!("{}/api/exams/sessions/reset", address))
        .json(&serde_json::json!({"examId": exam_id, "studentId": "s1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let fresh: serde_json::Value = client
        .post(format!("{}/api/exams/sessions/start", address))
        .json(&serde_json::json!({"examId": exam_id, "studentId": "s1"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fresh["data"]["status"], "in-progress");
    assert_eq!(fresh["data"]["progress"], 0);
    assert_eq!(fresh["data"]["score"], serde_json::Value::Null);
}

#[tokio::test]
async fn submit_without_exam_id_falls_back_to_the_active_exam() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let exam = create_exam(&client, &address, "Active one").await;
    let exam_id = exam["data"]["id"].as_str().unwrap().to_string();
    client
        .put(format!("{}/api/exams/{}/status", address, exam_id))
        .json(&serde_json::json!({"status": "active"}))
        .send()
        .await
        .unwrap();

    let submitted: serde_json::Value = client
        .post(format!("{}/api/exams/sessions/submit", address))
        .json(&serde_json::json!({
            "studentId": "s9",
            "answers": {},
            "score": 3
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(submitted["data"]["examId"], exam_id.as_str());
}

#[tokio::test]
async fn submit_with_no_active_exam_fails() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/exams/sessions/submit", address))
        .json(&serde_json::json!({
            "studentId": "s1",
            "answers": {},
            "score": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "No active exam");
}

#[tokio::test]
async fn essay_grading_fallback_gives_half_credit() {
    // The test app runs the offline oracle, i.e. the permanent failure path.
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{}/api/grading/essay", address))
        .json(&serde_json::json!({
            "questionText": "Describe the water cycle.",
            "essayText": "Water evaporates, condenses, and falls as rain.",
            "rubric": "Full marks for all three phases.",
            "maxPoints": 10
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["score"], 5.0);
    assert_eq!(body["data"]["feedback"], FALLBACK_FEEDBACK);
}

#[tokio::test]
async fn proctor_review_fallback_never_flags() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{}/api/grading/proctor", address))
        .json(&serde_json::json!({
            "eventDescription": "Student looked away from the screen twice."
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"]["flagged"], false);
    assert_eq!(body["data"]["reason"], FALLBACK_PROCTOR_REASON);
}
