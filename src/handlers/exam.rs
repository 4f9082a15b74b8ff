// src/handlers/exam.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::PASS_THRESHOLD_RATIO,
    error::AppError,
    grading::grade_exam,
    models::submission::{ExamSubmission, SubmitExamRequest},
    state::AppState,
    storage::Storage,
};

/// Retrieves a single exam by ID.
pub async fn get_exam(
    State(storage): State<Storage>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let exam = storage
        .get_exam(&id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(exam))
}

/// Grades an exam submission and persists the result.
///
/// * Loads the exam and grades every question concurrently.
/// * One question's sandbox failure never prevents the others from being
///   graded; the submission always completes with whatever results were
///   obtainable.
/// * Saves the submission with full per-question grade details and reports
///   whether the total reached the pass threshold.
pub async fn submit_exam(
    State(state): State<AppState>,
    Json(payload): Json<SubmitExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let exam = state
        .storage
        .get_exam(&payload.exam_id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let total_points: f64 = exam.questions.iter().map(|q| q.points as f64).sum();

    let (grade_details, total_score) =
        grade_exam(state.executor.as_ref(), &exam.questions, &payload.answers).await;

    let submission = ExamSubmission {
        id: None,
        exam_id: payload.exam_id,
        student_name: payload.student_name,
        score: total_score,
        answers: payload.answers,
        grade_details,
        time_taken_seconds: payload.time_taken_seconds.unwrap_or(0),
        timestamp: Utc::now(),
    };

    let saved = state
        .storage
        .save_submission(&submission)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save exam submission: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let passed = total_score >= total_points * PASS_THRESHOLD_RATIO;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Submission graded and saved",
        "data": saved,
        "totalPoints": total_points,
        "totalScore": total_score,
        "passed": passed
    })))
}
