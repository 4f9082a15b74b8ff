// src/grading/mod.rs

pub mod harness;
pub mod rubric;

use futures::future::join_all;
use std::collections::HashMap;

use crate::models::question::{GradingType, Question};
use crate::models::submission::{GradeResult, GradeStatus};
use crate::sandbox::{CodeExecutor, ExecutionError};

use harness::{build_assertion_harness, build_rubric_harness};
use rubric::{DEFAULT_RUBRIC_MARKER, parse_rubric_output};

/// Error-channel substrings recognized as "the validation checks failed"
/// rather than a genuine runtime fault. Contract: if the sandbox stderr
/// contains any of these, the learner code ran and was judged wrong, which
/// grades as a zero instead of an error. The list is configuration; the
/// rubric path's structured output is preferred where instructors can be
/// required to emit it.
const ASSERTION_FAILURE_PATTERNS: &[&str] = &["AssertionError"];

fn is_assertion_failure(error_output: &str) -> bool {
    ASSERTION_FAILURE_PATTERNS
        .iter()
        .any(|pattern| error_output.contains(pattern))
}

fn failed_result(question: &Question, status: GradeStatus, message: String) -> GradeResult {
    GradeResult {
        question_id: question.id.clone(),
        score: 0.0,
        max_score: question.points as f64,
        breakdown: HashMap::new(),
        errors: vec![message],
        status,
    }
}

fn execution_failure(question: &Question, err: ExecutionError) -> GradeResult {
    let status = match err {
        ExecutionError::Timeout => GradeStatus::Timeout,
        _ => GradeStatus::Error,
    };
    failed_result(question, status, err.to_string())
}

/// Grades one question against the student's submitted code.
///
/// * Empty validation code short-circuits to a graded zero without any
///   sandbox call.
/// * Otherwise dispatches on the question's grading type. A sandbox or
///   parsing failure yields `status=error` (or `timeout`) with score 0;
///   it never aborts the caller.
pub async fn grade_question(
    executor: &dyn CodeExecutor,
    question: &Question,
    student_code: &str,
) -> GradeResult {
    if question.validation_code.is_empty() {
        return failed_result(
            question,
            GradeStatus::Graded,
            "no_validation_code".to_string(),
        );
    }

    match question.grading_type {
        GradingType::Rubric => grade_with_rubric(executor, question, student_code).await,
        GradingType::Assertion => grade_with_assertion(executor, question, student_code).await,
    }
}

/// Rubric path: run the base64 harness, then decode the marker payload from
/// stdout into a partial-credit result.
async fn grade_with_rubric(
    executor: &dyn CodeExecutor,
    question: &Question,
    student_code: &str,
) -> GradeResult {
    let marker = question
        .grading_format
        .as_deref()
        .unwrap_or(DEFAULT_RUBRIC_MARKER);

    let source = build_rubric_harness(student_code, &question.validation_code);

    let result = match executor.execute(&source).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Sandbox execution failed for question {}: {}", question.id, e);
            return execution_failure(question, e);
        }
    };

    if !result.succeeded() {
        let status = if result.is_timeout() {
            GradeStatus::Timeout
        } else {
            GradeStatus::Error
        };
        return failed_result(question, status, result.failure_message());
    }

    match parse_rubric_output(result.stdout.as_deref(), marker) {
        Some(outcome) => {
            let max_score = question.points as f64;
            GradeResult {
                question_id: question.id.clone(),
                // `clamp` requires min <= max, so a malformed question with
                // negative points must not reach it as-is.
                score: outcome.score.clamp(0.0, max_score.max(0.0)),
                max_score,
                breakdown: outcome.breakdown,
                errors: outcome.errors,
                status: GradeStatus::Graded,
            }
        }
        // A missing or unparseable payload is an error, never a default
        // score a grader could mistake for a real zero.
        None => failed_result(
            question,
            GradeStatus::Error,
            format!("Rubric marker '{}' missing or payload invalid", marker),
        ),
    }
}

/// Assertion path: run learner code plus assert statements, then classify
/// the error channel. Silence means full credit; an assertion failure is a
/// graded zero; anything else is a system-level error.
async fn grade_with_assertion(
    executor: &dyn CodeExecutor,
    question: &Question,
    student_code: &str,
) -> GradeResult {
    let source = build_assertion_harness(student_code, &question.validation_code);

    let result = match executor.execute(&source).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Sandbox execution failed for question {}: {}", question.id, e);
            return execution_failure(question, e);
        }
    };

    if result.is_timeout() {
        return failed_result(question, GradeStatus::Timeout, result.failure_message());
    }

    let max_score = question.points as f64;

    match result.error_output() {
        None if result.succeeded() => GradeResult {
            question_id: question.id.clone(),
            score: max_score,
            max_score,
            breakdown: HashMap::from([("all_tests".to_string(), max_score)]),
            errors: Vec::new(),
            status: GradeStatus::Graded,
        },
        None => failed_result(
            question,
            GradeStatus::Error,
            result.status.description.clone(),
        ),
        Some(output) if is_assertion_failure(output) => GradeResult {
            question_id: question.id.clone(),
            score: 0.0,
            max_score,
            breakdown: HashMap::from([("all_tests".to_string(), 0.0)]),
            errors: vec!["assertion_failed".to_string()],
            status: GradeStatus::Graded,
        },
        Some(output) => failed_result(question, GradeStatus::Error, output.to_string()),
    }
}

/// Grades all questions of an exam concurrently and sums the scores.
///
/// Questions are independent, so their sandbox runs proceed in parallel;
/// the total is only computed once every question has resolved. A missing
/// answer grades as the empty string.
pub async fn grade_exam(
    executor: &dyn CodeExecutor,
    questions: &[Question],
    answers: &HashMap<String, String>,
) -> (HashMap<String, GradeResult>, f64) {
    let grading = questions.iter().map(|question| {
        let student_code = answers
            .get(&question.id)
            .map(String::as_str)
            .unwrap_or_default();
        grade_question(executor, question, student_code)
    });

    let results = join_all(grading).await;

    let mut grade_details = HashMap::with_capacity(results.len());
    let mut total_score = 0.0;
    for result in results {
        total_score += result.score;
        grade_details.insert(result.question_id.clone(), result);
    }

    (grade_details, total_score)
}
