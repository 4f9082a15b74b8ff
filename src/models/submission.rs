// src/models/submission.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Outcome category of one grading attempt.
///
/// `Graded` covers both full credit and a zero earned by failing the
/// checks; `Error` and `Timeout` mean the system could not grade the
/// answer. Error/timeout attempts still score zero and stay in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Graded,
    Error,
    Timeout,
}

/// Structured grade for one question, created fresh per grading attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub question_id: String,

    /// Awarded score, always within `[0, max_score]`.
    pub score: f64,

    /// The question's `points` value.
    pub max_score: f64,

    /// Sub-criterion name -> awarded sub-score (rubric grading only).
    #[serde(default)]
    pub breakdown: HashMap<String, f64>,

    /// Diagnostic messages, in the order they were produced.
    #[serde(default)]
    pub errors: Vec<String>,

    pub status: GradeStatus,
}

/// One graded submit action for an exam. A student may submit the same
/// exam multiple times; each attempt is an independent, append-only record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub exam_id: String,

    /// Free-text identifier typed by the student, not a strong identity.
    pub student_name: String,

    /// Sum of all grade detail scores.
    pub score: f64,

    /// Question id -> submitted source code.
    pub answers: HashMap<String, String>,

    /// Question id -> grade for that question.
    #[serde(default)]
    pub grade_details: HashMap<String, GradeResult>,

    pub time_taken_seconds: i64,

    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting exam answers.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExamRequest {
    #[validate(length(min = 1, max = 64, message = "Exam id must be between 1 and 64 characters."))]
    pub exam_id: String,
    #[validate(length(min = 1, max = 100, message = "Student name must be between 1 and 100 characters."))]
    pub student_name: String,
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[validate(range(min = 0, message = "Time taken cannot be negative."))]
    #[serde(default)]
    pub time_taken_seconds: Option<i64>,
}
