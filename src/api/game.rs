//! Random sequential play endpoints.
//!
//! Progress for a run lives in the caller's session; selection and scoring
//! rules are in [`crate::game`].

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::quizzes::AnswerQuery;
use super::ApiResponse;
use crate::errors::AppError;
use crate::game::{self, NextQuestion};
use crate::models::QuizQuestion;
use crate::session::{GameSession, SessionCookie};
use crate::AppState;

/// Next step of a random-play run: either a question or the end signal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomPlayView {
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizQuestion>,
    pub no_more_questions: bool,
}

/// Scored answer within a random-play run.
#[derive(Debug, Serialize)]
pub struct RandomCheckView {
    pub answer: String,
    pub correct: bool,
    pub score: i64,
}

/// GET /quizzes/randomplay - Next unanswered question for this session.
pub async fn random_play(
    State(state): State<AppState>,
    session: GameSession,
) -> Result<(SessionCookie, ApiResponse<RandomPlayView>), AppError> {
    let progress = state.sessions.progress(&session.id);
    let pending = state
        .repo
        .list_pending_quizzes(progress.answered_ids())
        .await?;

    let view = match game::next_question(&progress, pending, state.rng.as_ref()) {
        NextQuestion::Question { quiz, score } => RandomPlayView {
            score,
            quiz: Some(QuizQuestion::from(quiz)),
            no_more_questions: false,
        },
        NextQuestion::NoneRemaining { score } => RandomPlayView {
            score,
            quiz: None,
            no_more_questions: true,
        },
    };

    // Persists the fresh run on a first visit
    state.sessions.save(&session.id, progress);

    Ok((session.cookie(), ApiResponse::new(view)))
}

/// GET /quizzes/:id/randomcheck?answer= - Score an answer and update the run.
pub async fn random_check(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<AnswerQuery>,
    session: GameSession,
) -> Result<(SessionCookie, ApiResponse<RandomCheckView>), AppError> {
    let quiz = state
        .repo
        .get_quiz(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", id)))?;

    let mut progress = state.sessions.progress(&session.id);
    let outcome = game::submit_answer(&mut progress, &quiz, &params.answer);
    state.sessions.save(&session.id, progress);

    Ok((
        session.cookie(),
        ApiResponse::new(RandomCheckView {
            answer: outcome.answer,
            correct: outcome.correct,
            score: outcome.score,
        }),
    ))
}
