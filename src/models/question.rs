// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How a question's validation code is interpreted.
///
/// * `assertion` - validation raises on failure, silence means full credit.
/// * `rubric` - validation prints a marker plus a JSON score breakdown,
///   enabling partial credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingType {
    #[default]
    Assertion,
    Rubric,
}

/// One coding question inside an exam. Owned by the exam and immutable
/// once the exam is published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Starter code shown to the student in the editor.
    #[serde(default)]
    pub initial_code: String,

    /// Hidden instructor-authored grading code. An empty string means the
    /// question is not auto-graded and always scores zero.
    #[serde(default)]
    pub validation_code: String,

    /// Maximum score for this question.
    pub points: i64,

    #[serde(default)]
    pub grading_type: GradingType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<String>,

    /// Overrides the rubric marker token for this question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading_format: Option<String>,
}

/// An authored exam with its questions embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub duration_minutes: i64,

    #[serde(default)]
    pub questions: Vec<Question>,

    #[serde(default)]
    pub is_public: bool,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating or updating an exam.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveExamRequest {
    #[validate(length(min = 1, max = 64, message = "Exam id must be between 1 and 64 characters."))]
    pub id: String,
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters."))]
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i64>,
    #[validate(custom(function = validate_questions))]
    pub questions: Vec<Question>,
    pub is_public: Option<bool>,
}

fn validate_questions(questions: &[Question]) -> Result<(), validator::ValidationError> {
    let mut seen_ids = std::collections::HashSet::new();
    for question in questions {
        if question.id.is_empty() {
            return Err(validator::ValidationError::new("question_id_cannot_be_empty"));
        }
        if question.points < 0 {
            return Err(validator::ValidationError::new("points_cannot_be_negative"));
        }
        // Grade details are keyed by question id; a duplicate would make the
        // submission total disagree with its per-question breakdown.
        if !seen_ids.insert(question.id.as_str()) {
            return Err(validator::ValidationError::new("question_ids_must_be_unique"));
        }
    }
    Ok(())
}
