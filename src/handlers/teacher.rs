// src/handlers/teacher.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    analytics::compute_exam_analytics,
    error::AppError,
    models::question::{Exam, SaveExamRequest},
    storage::Storage,
};

/// Query parameters for the analytics endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsParams {
    pub exam_id: Option<String>,
}

/// Lists all exams, including unpublished ones.
pub async fn list_exams(State(storage): State<Storage>) -> Result<impl IntoResponse, AppError> {
    let exams = storage.list_exams().await.map_err(|e| {
        tracing::error!("Failed to list exams: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(exams))
}

/// Creates or updates an exam.
pub async fn save_exam(
    State(storage): State<Storage>,
    Json(payload): Json<SaveExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let exam = Exam {
        id: payload.id,
        title: payload.title,
        description: payload.description.unwrap_or_default(),
        duration_minutes: payload.duration_minutes.unwrap_or(60),
        questions: payload.questions,
        is_public: payload.is_public.unwrap_or(false),
        created_at: None,
    };

    let saved = storage.save_exam(&exam).await.map_err(|e| {
        tracing::error!("Failed to save exam: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(saved))
}

/// Returns exam analytics.
///
/// With `examId`, computes the KPI view for that exam from its submission
/// history. Without it, returns the raw submission list across all exams
/// for the teacher dashboard.
pub async fn get_analytics(
    State(storage): State<Storage>,
    Query(params): Query<AnalyticsParams>,
) -> Result<impl IntoResponse, AppError> {
    match params.exam_id {
        Some(exam_id) => {
            let exam = storage
                .get_exam(&exam_id)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to fetch exam {}: {:?}", exam_id, e);
                    AppError::InternalServerError(e.to_string())
                })?
                .ok_or(AppError::NotFound("Exam not found".to_string()))?;

            let submissions = storage.list_submissions(&exam_id).await.map_err(|e| {
                tracing::error!("Failed to list submissions for exam {}: {:?}", exam_id, e);
                AppError::InternalServerError(e.to_string())
            })?;
            let analytics = compute_exam_analytics(&exam, submissions);

            Ok(Json(serde_json::to_value(analytics)?))
        }
        None => {
            let submissions = storage.list_all_submissions().await.map_err(|e| {
                tracing::error!("Failed to list submissions: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

            Ok(Json(serde_json::json!({
                "total": submissions.len(),
                "submissions": submissions
            })))
        }
    }
}
