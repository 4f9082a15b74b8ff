// src/storage.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, types::Json};
use std::collections::HashMap;

use crate::models::question::{Exam, Question};
use crate::models::submission::{ExamSubmission, GradeResult};

/// Row shape for the 'exams' table. Questions are authored, stored and
/// served as one JSON document.
#[derive(sqlx::FromRow)]
struct ExamRow {
    id: String,
    title: String,
    description: String,
    duration_minutes: i64,
    questions: Json<Vec<Question>>,
    is_public: bool,
    created_at: Option<DateTime<Utc>>,
}

impl From<ExamRow> for Exam {
    fn from(row: ExamRow) -> Self {
        Exam {
            id: row.id,
            title: row.title,
            description: row.description,
            duration_minutes: row.duration_minutes,
            questions: row.questions.0,
            is_public: row.is_public,
            created_at: row.created_at,
        }
    }
}

/// Row shape for the 'exam_submissions' table.
#[derive(sqlx::FromRow)]
struct SubmissionRow {
    id: i64,
    exam_id: String,
    student_name: String,
    score: f64,
    answers: Json<HashMap<String, String>>,
    grade_details: Json<HashMap<String, GradeResult>>,
    time_taken_seconds: i64,
    created_at: DateTime<Utc>,
}

impl From<SubmissionRow> for ExamSubmission {
    fn from(row: SubmissionRow) -> Self {
        ExamSubmission {
            id: Some(row.id),
            exam_id: row.exam_id,
            student_name: row.student_name,
            score: row.score,
            answers: row.answers.0,
            grade_details: row.grade_details.0,
            time_taken_seconds: row.time_taken_seconds,
            timestamp: row.created_at,
        }
    }
}

const SUBMISSION_COLUMNS: &str =
    "id, exam_id, student_name, score, answers, grade_details, time_taken_seconds, created_at";

/// Handle over the database pool. Built once at startup and shared through
/// `AppState`; all exam and submission persistence goes through here.
#[derive(Clone)]
pub struct Storage {
    pool: PgPool,
}

impl Storage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_exam(&self, id: &str) -> Result<Option<Exam>, sqlx::Error> {
        let row = sqlx::query_as::<_, ExamRow>(
            r#"
            SELECT id, title, description, duration_minutes, questions, is_public, created_at
            FROM exams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Exam::from))
    }

    pub async fn list_exams(&self) -> Result<Vec<Exam>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ExamRow>(
            r#"
            SELECT id, title, description, duration_minutes, questions, is_public, created_at
            FROM exams
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Exam::from).collect())
    }

    /// Creates or updates an exam and returns the persisted record.
    pub async fn save_exam(&self, exam: &Exam) -> Result<Exam, sqlx::Error> {
        let row = sqlx::query_as::<_, ExamRow>(
            r#"
            INSERT INTO exams (id, title, description, duration_minutes, questions, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                duration_minutes = EXCLUDED.duration_minutes,
                questions = EXCLUDED.questions,
                is_public = EXCLUDED.is_public
            RETURNING id, title, description, duration_minutes, questions, is_public, created_at
            "#,
        )
        .bind(&exam.id)
        .bind(&exam.title)
        .bind(&exam.description)
        .bind(exam.duration_minutes)
        .bind(Json(&exam.questions))
        .bind(exam.is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Appends one graded submission and returns it with its assigned id.
    /// Submissions are never edited or deleted.
    pub async fn save_submission(
        &self,
        submission: &ExamSubmission,
    ) -> Result<ExamSubmission, sqlx::Error> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            INSERT INTO exam_submissions
                (exam_id, student_name, score, answers, grade_details, time_taken_seconds, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(&submission.exam_id)
        .bind(&submission.student_name)
        .bind(submission.score)
        .bind(Json(&submission.answers))
        .bind(Json(&submission.grade_details))
        .bind(submission.time_taken_seconds)
        .bind(submission.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Full submission history for one exam, oldest first.
    pub async fn list_submissions(&self, exam_id: &str) -> Result<Vec<ExamSubmission>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM exam_submissions
            WHERE exam_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ExamSubmission::from).collect())
    }

    /// All exam submissions across exams, newest first (teacher dashboard).
    pub async fn list_all_submissions(&self) -> Result<Vec<ExamSubmission>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM exam_submissions
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ExamSubmission::from).collect())
    }
}
