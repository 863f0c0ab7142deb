// src/routes.rs

use axum::{
    Router, http::Method,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{exams, grading, live, records, schools, students, subjects, users};
use crate::state::AppState;

/// Assembles the main application router.
///
/// * Merges all sub-routers (schools, students, users, subjects, records,
///   exams, live classes, grading).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, config, grading oracle).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let school_routes = Router::new()
        .route("/", post(schools::create_school).get(schools::list_schools))
        .route(
            "/{id}",
            get(schools::get_school)
                .put(schools::update_school)
                .delete(schools::delete_school),
        );

    let student_routes = Router::new()
        .route(
            "/",
            post(students::create_student).get(students::list_students),
        )
        .route("/access", post(students::resolve_access))
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        );

    let user_routes = Router::new()
        .route("/", post(users::create_user).get(users::list_users))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    let subject_routes = Router::new()
        .route(
            "/",
            post(subjects::create_subject).get(subjects::list_subjects),
        )
        .route(
            "/{id}",
            get(subjects::get_subject)
                .put(subjects::update_subject)
                .delete(subjects::delete_subject),
        );

    let assessment_routes = Router::new()
        .route(
            "/",
            post(records::upsert_assessment).get(records::list_assessments),
        )
        .route("/{id}", delete(records::delete_assessment));

    let exam_routes = Router::new()
        .route(
            "/",
            post(exams::create_or_update_exam).get(exams::list_exams),
        )
        .route("/available", get(exams::list_available))
        .route("/sessions/start", post(exams::start_session))
        .route("/sessions/progress", put(exams::update_progress))
        .route("/sessions/submit", post(exams::submit_exam))
        .route("/sessions/reset", post(exams::reset_session))
        .route("/{id}", get(exams::get_exam))
        .route("/{id}/status", put(exams::set_status))
        .route("/{id}/sessions", get(exams::list_sessions));

    let live_routes = Router::new()
        .route(
            "/",
            post(live::create_live_class).get(live::list_live_classes),
        )
        .route("/{id}/join", post(live::join_live_class))
        .route("/{id}/leave", post(live::leave_live_class))
        .route(
            "/{id}/messages",
            post(live::post_message).get(live::list_messages),
        )
        .route("/{id}/end", post(live::end_live_class));

    let grading_routes = Router::new()
        .route("/essay", post(grading::grade_essay))
        .route("/proctor", post(grading::proctor_review));

    Router::new()
        .nest("/api/schools", school_routes)
        .nest("/api/students", student_routes)
        .nest("/api/users", user_routes)
        .nest("/api/subjects", subject_routes)
        .nest("/api/assessments", assessment_routes)
        .nest(
            "/api/results",
            Router::new().route("/", post(records::upsert_result).get(records::list_results)),
        )
        .nest(
            "/api/attendance",
            Router::new().route(
                "/",
                post(records::mark_attendance).get(records::list_attendance),
            ),
        )
        .nest("/api/exams", exam_routes)
        .nest("/api/live-classes", live_routes)
        .nest("/api/grading", grading_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
