// src/models/analytics.rs

use serde::Serialize;

use crate::models::submission::ExamSubmission;

/// Instructor-facing KPI view for one exam, derived on demand from the
/// submission history. Never persisted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAnalytics {
    pub exam_title: String,

    /// Sum of all question points.
    pub total_points: f64,

    /// Count of distinct student names, reported as a string. The expected
    /// class size is not tracked, so this is a count rather than a ratio.
    pub completion_rate: String,

    /// Percentage of students whose best attempt reached the pass threshold.
    pub pass_rate: f64,

    /// Percentage of students whose earliest attempt reached the threshold.
    pub first_attempt_success: f64,

    /// Mean over each student's best score.
    pub average_score: f64,

    /// Mean time in seconds over passing attempts only.
    pub average_time: f64,

    /// Full submission history, most recent first.
    pub submissions: Vec<ExamSubmission>,
}
