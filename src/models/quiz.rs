//! Quiz model and request bodies.

use serde::{Deserialize, Serialize};

/// A quiz entry: one question with its expected answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Public view of a quiz during play: the question without its answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub question: String,
}

impl From<Quiz> for QuizQuestion {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            question: quiz.question,
        }
    }
}

/// Request body for creating a new quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Request body for updating an existing quiz. Only the question and answer
/// fields are writable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuizRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}
