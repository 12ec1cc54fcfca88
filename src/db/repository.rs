//! Database repository for quiz CRUD and the pending-question query.
//!
//! Uses prepared statements; quiz fields are validated here before any write.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, FieldError};
use crate::models::{CreateQuizRequest, Quiz, UpdateQuizRequest};

/// Database repository for all quiz operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count quizzes, optionally restricted by a question search.
    pub async fn count_quizzes(&self, search: Option<&str>) -> Result<i64, AppError> {
        let row = match search {
            Some(term) => {
                sqlx::query("SELECT COUNT(*) AS count FROM quizzes WHERE question LIKE ?")
                    .bind(like_pattern(term))
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM quizzes")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(row.get("count"))
    }

    /// List quizzes ordered by id, optionally filtered, with offset/limit paging.
    pub async fn list_quizzes(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Quiz>, AppError> {
        let rows = match search {
            Some(term) => {
                sqlx::query(
                    "SELECT id, question, answer, created_at, updated_at FROM quizzes WHERE question LIKE ? ORDER BY id LIMIT ? OFFSET ?"
                )
                .bind(like_pattern(term))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, question, answer, created_at, updated_at FROM quizzes ORDER BY id LIMIT ? OFFSET ?"
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.iter().map(quiz_from_row).collect())
    }

    /// Get a quiz by ID.
    pub async fn get_quiz(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let row = sqlx::query(
            "SELECT id, question, answer, created_at, updated_at FROM quizzes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(quiz_from_row))
    }

    /// Create a new quiz.
    pub async fn create_quiz(&self, request: &CreateQuizRequest) -> Result<Quiz, AppError> {
        validate_fields(&request.question, &request.answer)?;

        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO quizzes (question, answer, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.question)
        .bind(&request.answer)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Quiz {
            id: result.last_insert_rowid(),
            question: request.question.clone(),
            answer: request.answer.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a quiz. Only the question and answer fields are writable.
    pub async fn update_quiz(&self, id: i64, request: &UpdateQuizRequest) -> Result<Quiz, AppError> {
        let existing = self
            .get_quiz(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;

        validate_fields(&request.question, &request.answer)?;

        let now = Utc::now().to_rfc3339();

        sqlx::query("UPDATE quizzes SET question = ?, answer = ?, updated_at = ? WHERE id = ?")
            .bind(&request.question)
            .bind(&request.answer)
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(Quiz {
            id,
            question: request.question.clone(),
            answer: request.answer.clone(),
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a quiz.
    pub async fn delete_quiz(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Quiz {} not found", id)));
        }

        Ok(())
    }

    /// Quizzes whose id is not in `excluded` — the pending set of a run.
    pub async fn list_pending_quizzes(&self, excluded: &[i64]) -> Result<Vec<Quiz>, AppError> {
        if excluded.is_empty() {
            return self.list_quizzes(None, 0, i64::MAX).await;
        }

        let placeholders = vec!["?"; excluded.len()].join(", ");
        let sql = format!(
            "SELECT id, question, answer, created_at, updated_at FROM quizzes WHERE id NOT IN ({}) ORDER BY id",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for id in excluded {
            query = query.bind(*id);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(quiz_from_row).collect())
    }
}

// Helper functions

fn quiz_from_row(row: &sqlx::sqlite::SqliteRow) -> Quiz {
    Quiz {
        id: row.get("id"),
        question: row.get("question"),
        answer: row.get("answer"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// `%`-wrapped LIKE pattern with runs of spaces acting as wildcards, so
/// "capital france" matches "Capital of France?".
fn like_pattern(search: &str) -> String {
    format!(
        "%{}%",
        search.split_whitespace().collect::<Vec<_>>().join("%")
    )
}

fn validate_fields(question: &str, answer: &str) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if question.trim().is_empty() {
        errors.push(FieldError::new("question", "Question must not be empty"));
    }
    if answer.trim().is_empty() {
        errors.push(FieldError::new("answer", "Answer must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation {
            errors,
            input: Some(serde_json::json!({
                "question": question,
                "answer": answer,
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_spaces_become_wildcards() {
        assert_eq!(like_pattern("capital france"), "%capital%france%");
        assert_eq!(like_pattern("paris"), "%paris%");
        assert_eq!(like_pattern("a  b   c"), "%a%b%c%");
    }

    #[test]
    fn test_like_pattern_blank_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("   "), "%%");
    }

    #[test]
    fn test_validate_fields() {
        assert!(validate_fields("2+2?", "4").is_ok());

        let err = validate_fields("", "4").unwrap_err();
        match err {
            AppError::Validation { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "question");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = validate_fields("  ", " ").unwrap_err();
        match err {
            AppError::Validation { errors, input } => {
                assert_eq!(errors.len(), 2);
                assert!(input.is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
