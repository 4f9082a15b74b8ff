// src/handlers/debug.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use crate::{
    error::AppError,
    grading::grade_question,
    models::question::{GradingType, Question},
    sandbox::CodeExecutor,
};

/// DTO for grading one ad hoc code/validation pair without touching storage.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugGradeRequest {
    pub student_code: String,
    pub validation_code: String,
    #[serde(default = "default_question_id")]
    pub question_id: String,
    #[serde(default = "default_max_points")]
    pub max_points: i64,
    #[serde(default)]
    pub grading_type: GradingType,
    #[serde(default)]
    pub grading_format: Option<String>,
}

fn default_question_id() -> String {
    "debug-q1".to_string()
}

fn default_max_points() -> i64 {
    100
}

/// Debug endpoint for testing grading logic against the live sandbox.
pub async fn grade(
    State(executor): State<Arc<dyn CodeExecutor>>,
    Json(payload): Json<DebugGradeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.student_code.is_empty() || payload.validation_code.is_empty() {
        return Err(AppError::BadRequest(
            "studentCode and validationCode are required".to_string(),
        ));
    }
    if payload.max_points < 0 {
        return Err(AppError::BadRequest(
            "maxPoints cannot be negative".to_string(),
        ));
    }

    let question = Question {
        id: payload.question_id,
        title: String::new(),
        description: String::new(),
        initial_code: String::new(),
        validation_code: payload.validation_code,
        points: payload.max_points,
        grading_type: payload.grading_type,
        hints: None,
        grading_format: payload.grading_format,
    };

    let result = grade_question(executor.as_ref(), &question, &payload.student_code).await;

    Ok(Json(serde_json::json!({
        "success": true,
        "result": result
    })))
}
