//! JSON request/response surface of the score service
//!
//! Routing and authentication belong to the host; it hands us the decoded
//! request and the acting identity (if any).

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::leaderboard::LeaderboardEntry;
use super::service::{Identity, ScoreError, ScoreService};
use super::store::KeyValueStore;
use crate::sim::{Level, ScoreReport};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ApiRequest {
    SaveScore { score: u32, level: Level },
    GetHighScore,
    GetLeaderboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreResponse {
    pub high_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status: STATUS_OK,
                body,
            },
            Err(e) => Self::error(STATUS_INTERNAL, &e.to_string()),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl From<ScoreError> for ApiResponse {
    fn from(err: ScoreError) -> Self {
        let status = match err {
            ScoreError::MissingContext => STATUS_BAD_REQUEST,
            ScoreError::Store(_) | ScoreError::Corrupt { .. } => STATUS_INTERNAL,
        };
        Self::error(status, &err.to_string())
    }
}

/// Decode a raw JSON body and handle it
pub fn handle_json<S: KeyValueStore>(
    service: &ScoreService<S>,
    identity: Option<&Identity>,
    body: &str,
    now_ms: u64,
) -> ApiResponse {
    match serde_json::from_str::<ApiRequest>(body) {
        Ok(request) => handle(service, identity, request, now_ms),
        Err(e) => ApiResponse::error(STATUS_BAD_REQUEST, &format!("bad request: {e}")),
    }
}

pub fn handle<S: KeyValueStore>(
    service: &ScoreService<S>,
    identity: Option<&Identity>,
    request: ApiRequest,
    now_ms: u64,
) -> ApiResponse {
    let result = match request {
        ApiRequest::SaveScore { score, level } => service
            .save_score(identity, ScoreReport { score, level }, now_ms)
            .map(|high_score| ApiResponse::ok(&HighScoreResponse { high_score })),
        ApiRequest::GetHighScore => service
            .high_score(identity)
            .map(|high_score| ApiResponse::ok(&HighScoreResponse { high_score })),
        ApiRequest::GetLeaderboard => service
            .leaderboard()
            .map(|entries| ApiResponse::ok(&LeaderboardResponse { entries })),
    };

    result.unwrap_or_else(|err| {
        log::warn!("Score request failed: {err}");
        err.into()
    })
}
