// src/analytics.rs

use std::collections::HashMap;

use crate::config::PASS_THRESHOLD_RATIO;
use crate::models::analytics::ExamAnalytics;
use crate::models::question::Exam;
use crate::models::submission::ExamSubmission;

/// Reduces an exam's full submission history into the instructor KPI view.
///
/// Pure function of the exam and its submissions; no external calls. The
/// exact reductions are load-bearing: pass rate and average score use each
/// student's BEST attempt, first-attempt success uses each student's
/// EARLIEST attempt, and average time runs over every individual passing
/// attempt (not best-per-student).
pub fn compute_exam_analytics(exam: &Exam, mut submissions: Vec<ExamSubmission>) -> ExamAnalytics {
    let total_points: f64 = exam.questions.iter().map(|q| q.points as f64).sum();

    // All per-student reductions assume ascending history order.
    submissions.sort_by_key(|s| s.timestamp);

    let mut best_scores: HashMap<String, f64> = HashMap::new();
    let mut first_scores: HashMap<String, f64> = HashMap::new();
    for submission in &submissions {
        first_scores
            .entry(submission.student_name.clone())
            .or_insert(submission.score);
        let best = best_scores
            .entry(submission.student_name.clone())
            .or_insert(submission.score);
        if submission.score > *best {
            *best = submission.score;
        }
    }

    let unique_students = best_scores.len();
    if unique_students == 0 {
        // Defined boundary case for a fresh exam, not an error.
        return ExamAnalytics {
            exam_title: exam.title.clone(),
            total_points,
            completion_rate: "0".to_string(),
            pass_rate: 0.0,
            first_attempt_success: 0.0,
            average_score: 0.0,
            average_time: 0.0,
            submissions: Vec::new(),
        };
    }

    let pass_threshold = total_points * PASS_THRESHOLD_RATIO;

    let students_passed = best_scores
        .values()
        .filter(|&&score| score >= pass_threshold)
        .count();
    let first_attempt_passed = first_scores
        .values()
        .filter(|&&score| score >= pass_threshold)
        .count();

    let pass_rate = students_passed as f64 / unique_students as f64 * 100.0;
    let first_attempt_success = first_attempt_passed as f64 / unique_students as f64 * 100.0;
    let average_score = best_scores.values().sum::<f64>() / unique_students as f64;

    // Every qualifying attempt counts here, including repeat passes by the
    // same student.
    let qualifying_times: Vec<i64> = submissions
        .iter()
        .filter(|s| s.score >= pass_threshold)
        .map(|s| s.time_taken_seconds)
        .collect();
    let average_time = if qualifying_times.is_empty() {
        0.0
    } else {
        qualifying_times.iter().sum::<i64>() as f64 / qualifying_times.len() as f64
    };

    // Display order: most recent first.
    submissions.reverse();

    ExamAnalytics {
        exam_title: exam.title.clone(),
        total_points,
        completion_rate: unique_students.to_string(),
        pass_rate,
        first_attempt_success,
        average_score,
        average_time,
        submissions,
    }
}
