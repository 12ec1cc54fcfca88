//! Random-play game logic.
//!
//! Drives the random sequential play mode: picks the next unanswered question,
//! scores submitted answers, and tracks per-run progress.

use rand::Rng;

use crate::models::Quiz;

/// Marker id recorded when a run starts. Quiz ids are assigned from 1, so the
/// sentinel never collides with a stored quiz.
pub const RUN_SENTINEL: i64 = 0;

/// Progress of one random-play run: the ids of quizzes answered correctly, in
/// answer order, preceded by the run sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProgress {
    answered: Vec<i64>,
}

impl GameProgress {
    /// A fresh run with nothing answered yet.
    pub fn new() -> Self {
        Self {
            answered: vec![RUN_SENTINEL],
        }
    }

    /// Count of correctly answered quizzes in this run.
    pub fn score(&self) -> i64 {
        self.answered.len() as i64 - 1
    }

    /// Ids to exclude from the pending-question query.
    pub fn answered_ids(&self) -> &[i64] {
        &self.answered
    }

    /// Record a correctly answered quiz. The pending query already excludes
    /// answered ids; the guard keeps the sequence duplicate-free even if a
    /// client replays a check request.
    pub fn record_correct(&mut self, id: i64) {
        if !self.answered.contains(&id) {
            self.answered.push(id);
        }
    }

    /// End the run, discarding all progress.
    pub fn reset(&mut self) {
        self.answered.clear();
        self.answered.push(RUN_SENTINEL);
    }
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform random source for question selection. Injectable so selection can
/// be driven deterministically in tests.
pub trait RandomSource: Send + Sync {
    /// Pick an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&self, len: usize) -> usize;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Outcome of asking for the next question of a run.
#[derive(Debug, Clone)]
pub enum NextQuestion {
    Question { quiz: Quiz, score: i64 },
    NoneRemaining { score: i64 },
}

/// Select the next question uniformly at random from the pending set, or
/// signal that the run has exhausted all quizzes. Read-only with respect to
/// the progress.
pub fn next_question(
    progress: &GameProgress,
    mut pending: Vec<Quiz>,
    rng: &dyn RandomSource,
) -> NextQuestion {
    if pending.is_empty() {
        return NextQuestion::NoneRemaining {
            score: progress.score(),
        };
    }

    let quiz = pending.swap_remove(rng.pick_index(pending.len()));
    NextQuestion::Question {
        quiz,
        score: progress.score(),
    }
}

/// Result of scoring a submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub answer: String,
    pub correct: bool,
    pub score: i64,
}

/// Score a submitted answer against the quiz being played. A correct answer
/// extends the run; a wrong one ends it and discards the progress. The
/// returned score reflects the updated progress.
pub fn submit_answer(progress: &mut GameProgress, quiz: &Quiz, submitted: &str) -> AnswerOutcome {
    let correct = answers_match(&quiz.answer, submitted);

    if correct {
        progress.record_correct(quiz.id);
    } else {
        progress.reset();
    }

    AnswerOutcome {
        answer: submitted.to_string(),
        correct,
        score: progress.score(),
    }
}

/// Case-insensitive, whitespace-trimmed answer comparison. Internal whitespace
/// still distinguishes answers.
pub fn answers_match(expected: &str, submitted: &str) -> bool {
    normalize(submitted) == normalize(expected)
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}
