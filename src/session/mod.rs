//! Cookie-keyed session storage for game progress.
//!
//! Each client gets an opaque session id in a cookie; the progress of its
//! random-play run lives server-side in an in-memory map.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};

use crate::game::GameProgress;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "quiz_session";

/// In-memory store of per-session game progress.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, GameProgress>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress for a session, initialized to a fresh run on first access.
    pub fn progress(&self, session_id: &str) -> GameProgress {
        self.lock().get(session_id).cloned().unwrap_or_default()
    }

    /// Write a session's progress back.
    pub fn save(&self, session_id: &str, progress: GameProgress) {
        self.lock().insert(session_id.to_string(), progress);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, GameProgress>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Session identity resolved from the request cookies. A request without a
/// session cookie gets a freshly minted id; the response then carries the
/// matching `Set-Cookie` via [`SessionCookie`].
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: String,
    is_new: bool,
}

impl GameSession {
    /// Response part that sets the session cookie for fresh sessions.
    pub fn cookie(&self) -> SessionCookie {
        SessionCookie {
            value: self.is_new.then(|| {
                format!(
                    "{}={}; Path=/; HttpOnly; SameSite=Lax",
                    SESSION_COOKIE, self.id
                )
            }),
        }
    }
}

impl<S> FromRequestParts<S> for GameSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(session_id_from_cookies);

        Ok(match existing {
            Some(id) => GameSession { id, is_new: false },
            None => GameSession {
                id: uuid::Uuid::new_v4().to_string(),
                is_new: true,
            },
        })
    }
}

fn session_id_from_cookies(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// `Set-Cookie` response part for newly minted sessions. A no-op when the
/// request already carried a session cookie.
#[derive(Debug)]
pub struct SessionCookie {
    value: Option<String>,
}

impl IntoResponseParts for SessionCookie {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.value.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
            res.headers_mut().append(header::SET_COOKIE, cookie);
        }
        Ok(res)
    }
}
