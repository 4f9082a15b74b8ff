// tests/analytics_tests.rs

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};

use apollo_backend::analytics::compute_exam_analytics;
use apollo_backend::models::question::{Exam, GradingType, Question};
use apollo_backend::models::submission::ExamSubmission;

fn question(id: &str, points: i64) -> Question {
    Question {
        id: id.to_string(),
        title: String::new(),
        description: String::new(),
        initial_code: String::new(),
        validation_code: String::new(),
        points,
        grading_type: GradingType::Assertion,
        hints: None,
        grading_format: None,
    }
}

/// Exam with two questions worth 50 points each (total 100, threshold 60).
fn exam() -> Exam {
    Exam {
        id: "exam-1".to_string(),
        title: "Analytics Test Exam".to_string(),
        description: String::new(),
        duration_minutes: 60,
        questions: vec![question("q1", 50), question("q2", 50)],
        is_public: false,
        created_at: None,
    }
}

fn submission(student: &str, score: f64, time_taken: i64, offset_secs: i64) -> ExamSubmission {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    ExamSubmission {
        id: None,
        exam_id: "exam-1".to_string(),
        student_name: student.to_string(),
        score,
        answers: HashMap::new(),
        grade_details: HashMap::new(),
        time_taken_seconds: time_taken,
        timestamp: base + Duration::seconds(offset_secs),
    }
}

#[test]
fn three_student_scenario() {
    // Student A passes outright, Student B fails then passes, Student C fails.
    // Deliberately out of timestamp order to exercise the sorting step.
    let submissions = vec![
        submission("Student B", 80.0, 900, 5),
        submission("Student A", 100.0, 600, 0),
        submission("Student C", 0.0, 120, 2),
        submission("Student B", 40.0, 300, -10),
    ];

    let analytics = compute_exam_analytics(&exam(), submissions);

    assert_eq!(analytics.total_points, 100.0);
    assert_eq!(analytics.completion_rate, "3");

    // A and B's best attempts reach 60; C never does.
    assert!((analytics.pass_rate - 200.0 / 3.0).abs() < 1e-9);

    // Only A's first attempt passes (B opened with 40, C with 0).
    assert!((analytics.first_attempt_success - 100.0 / 3.0).abs() < 1e-9);

    // Best-per-student: (100 + 80 + 0) / 3.
    assert_eq!(analytics.average_score, 60.0);

    // Qualifying attempts only: A's 600s and B's second attempt at 900s.
    // B's failing 300s attempt and C's 120s attempt are excluded.
    assert_eq!(analytics.average_time, 750.0);

    // Full history, most recent first.
    assert_eq!(analytics.submissions.len(), 4);
    assert_eq!(analytics.submissions[0].student_name, "Student B");
    assert_eq!(analytics.submissions[0].score, 80.0);
    assert_eq!(analytics.submissions[3].student_name, "Student B");
    assert_eq!(analytics.submissions[3].score, 40.0);
}

#[test]
fn zero_submissions_is_a_defined_boundary() {
    let analytics = compute_exam_analytics(&exam(), Vec::new());

    assert_eq!(analytics.total_points, 100.0);
    assert_eq!(analytics.completion_rate, "0");
    assert_eq!(analytics.pass_rate, 0.0);
    assert_eq!(analytics.first_attempt_success, 0.0);
    assert_eq!(analytics.average_score, 0.0);
    assert_eq!(analytics.average_time, 0.0);
    assert!(analytics.submissions.is_empty());
}

#[test]
fn average_time_is_zero_when_nobody_passes() {
    let submissions = vec![
        submission("Student A", 30.0, 400, 0),
        submission("Student B", 59.9, 500, 1),
    ];

    let analytics = compute_exam_analytics(&exam(), submissions);

    assert_eq!(analytics.pass_rate, 0.0);
    assert_eq!(analytics.average_time, 0.0);
    // Best scores still feed the average even when nobody passes.
    assert!((analytics.average_score - 44.95).abs() < 1e-9);
}

#[test]
fn pass_threshold_is_inclusive() {
    let submissions = vec![submission("Student A", 60.0, 100, 0)];

    let analytics = compute_exam_analytics(&exam(), submissions);

    assert_eq!(analytics.pass_rate, 100.0);
    assert_eq!(analytics.first_attempt_success, 100.0);
    assert_eq!(analytics.average_time, 100.0);
}

#[test]
fn repeat_passes_by_one_student_all_count_toward_average_time() {
    let submissions = vec![
        submission("Student A", 70.0, 100, 0),
        submission("Student A", 90.0, 300, 10),
    ];

    let analytics = compute_exam_analytics(&exam(), submissions);

    assert_eq!(analytics.completion_rate, "1");
    // Both qualifying attempts count, not just the best one.
    assert_eq!(analytics.average_time, 200.0);
    assert_eq!(analytics.average_score, 90.0);
}
