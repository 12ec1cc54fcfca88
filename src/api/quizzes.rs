//! Quiz CRUD and single-quiz play endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::game;
use crate::models::{CreateQuizRequest, Quiz, QuizQuestion, UpdateQuizRequest};
use crate::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Question search term; spaces act as wildcards.
    #[serde(default)]
    pub search: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// One page of the quiz listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizListPage {
    pub quizzes: Vec<Quiz>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

/// Form values for the create/edit forms.
#[derive(Debug, Serialize)]
pub struct QuizForm {
    pub question: String,
    pub answer: String,
}

/// Quiz presented for playing, plus the draft answer. The stored answer never
/// leaves the server here.
#[derive(Debug, Serialize)]
pub struct PlayView {
    pub quiz: QuizQuestion,
    pub answer: String,
}

/// Check result for a single quiz outside a run.
#[derive(Debug, Serialize)]
pub struct CheckView {
    pub quiz: QuizQuestion,
    pub answer: String,
    pub correct: bool,
}

/// Answer submitted via the query string.
#[derive(Debug, Deserialize)]
pub struct AnswerQuery {
    #[serde(default)]
    pub answer: String,
}

/// GET /quizzes - List quizzes, paginated, optionally filtered by search.
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> ApiResult<QuizListPage> {
    let page_size = state.config.page_size;
    let page = params.page.max(1);
    let search = params.search.as_deref().filter(|s| !s.is_empty());

    let total_count = state.repo.count_quizzes(search).await?;
    let total_pages = (total_count + page_size - 1) / page_size;
    let offset = page_size * (page - 1);
    let quizzes = state.repo.list_quizzes(search, offset, page_size).await?;

    Ok(ApiResponse::new(QuizListPage {
        quizzes,
        search: search.map(str::to_string),
        page,
        page_size,
        total_count,
        total_pages,
    }))
}

/// GET /quizzes/:id - Get a single quiz.
pub async fn get_quiz(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Quiz> {
    match state.repo.get_quiz(id).await? {
        Some(quiz) => Ok(ApiResponse::new(quiz)),
        None => Err(AppError::NotFound(format!("Quiz {} not found", id))),
    }
}

/// GET /quizzes/new - Blank form view for creating a quiz.
pub async fn new_quiz() -> ApiResult<QuizForm> {
    Ok(ApiResponse::new(QuizForm {
        question: String::new(),
        answer: String::new(),
    }))
}

/// POST /quizzes - Create a new quiz.
pub async fn create_quiz(
    State(state): State<AppState>,
    Json(request): Json<CreateQuizRequest>,
) -> ApiResult<Quiz> {
    let quiz = state.repo.create_quiz(&request).await?;
    tracing::info!(quiz_id = quiz.id, "quiz created");

    Ok(ApiResponse::with_message(quiz, "Quiz created successfully"))
}

/// GET /quizzes/:id/edit - Edit form view for an existing quiz.
pub async fn edit_quiz(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Quiz> {
    match state.repo.get_quiz(id).await? {
        Some(quiz) => Ok(ApiResponse::new(quiz)),
        None => Err(AppError::NotFound(format!("Quiz {} not found", id))),
    }
}

/// PUT /quizzes/:id - Update a quiz.
pub async fn update_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateQuizRequest>,
) -> ApiResult<Quiz> {
    let quiz = state.repo.update_quiz(id, &request).await?;
    tracing::info!(quiz_id = quiz.id, "quiz updated");

    Ok(ApiResponse::with_message(quiz, "Quiz updated successfully"))
}

/// DELETE /quizzes/:id - Delete a quiz.
pub async fn delete_quiz(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_quiz(id).await?;
    tracing::info!(quiz_id = id, "quiz deleted");

    Ok(ApiResponse::with_message((), "Quiz deleted successfully"))
}

/// GET /quizzes/:id/play?answer= - Present a quiz for playing.
pub async fn play_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<AnswerQuery>,
) -> ApiResult<PlayView> {
    let quiz = state
        .repo
        .get_quiz(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;

    Ok(ApiResponse::new(PlayView {
        quiz: QuizQuestion::from(quiz),
        answer: params.answer,
    }))
}

/// GET /quizzes/:id/check?answer= - Check an answer without touching any run.
pub async fn check_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<AnswerQuery>,
) -> ApiResult<CheckView> {
    let quiz = state
        .repo
        .get_quiz(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;

    let correct = game::answers_match(&quiz.answer, &params.answer);

    Ok(ApiResponse::new(CheckView {
        quiz: QuizQuestion::from(quiz),
        answer: params.answer,
        correct,
    }))
}
