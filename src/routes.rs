// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{debug, exam, health, teacher},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (exam, teacher, debug).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Storage, sandbox executor, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        state.config.frontend_url.parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let exam_routes = Router::new()
        .route("/submit", post(exam::submit_exam))
        .route("/{id}", get(exam::get_exam));

    let teacher_routes = Router::new()
        .route("/exams", get(teacher::list_exams).post(teacher::save_exam))
        .route("/analytics", get(teacher::get_analytics));

    let debug_routes = Router::new().route("/grade", post(debug::grade));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/exam", exam_routes)
        .nest("/api/teacher", teacher_routes)
        .nest("/api/debug", debug_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
