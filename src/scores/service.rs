//! Score persistence over the key-value store

use thiserror::Error;

use super::leaderboard::{Leaderboard, LeaderboardEntry};
use super::store::{KeyValueStore, StoreError};
use crate::sim::ScoreReport;

const LEADERBOARD_KEY: &str = "leaderboard";

#[derive(Debug, Error)]
pub enum ScoreError {
    /// No acting user; the host did not provide identifying context
    #[error("user context is missing")]
    MissingContext,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("corrupt value at `{key}`")]
    Corrupt { key: String },
}

/// The acting user, as provided by the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub username: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }
}

fn high_score_key(user_id: &str) -> String {
    format!("highscore:{user_id}")
}

fn games_key(user_id: &str) -> String {
    format!("games:{user_id}")
}

/// Per-user high scores, play counts and the shared leaderboard
pub struct ScoreService<S> {
    store: S,
}

impl<S: KeyValueStore> ScoreService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a finished run and return the user's (possibly new) high score
    ///
    /// The high score and the leaderboard are read-modify-write over plain
    /// `get`/`set`. Concurrent saves can drop one of two racing leaderboard
    /// submissions; the per-user counter uses `increment` and is not affected.
    pub fn save_score(
        &self,
        identity: Option<&Identity>,
        report: ScoreReport,
        timestamp_ms: u64,
    ) -> Result<u64, ScoreError> {
        let identity = identity.ok_or(ScoreError::MissingContext)?;
        let key = high_score_key(&identity.user_id);
        let previous = self.read_u64(&key)?;
        let score = u64::from(report.score);

        let high_score = if score > previous {
            self.store.set(&key, &score.to_string())?;
            log::info!(
                "New high score {} for {} on {}",
                score,
                identity.username,
                report.level.as_str()
            );
            score
        } else {
            previous
        };

        self.store.increment(&games_key(&identity.user_id), 1)?;

        let mut board = self.load_leaderboard()?;
        if board.submit(&identity.username, score, timestamp_ms).is_some() {
            let json = serde_json::to_string(&board).map_err(|_| ScoreError::Corrupt {
                key: LEADERBOARD_KEY.to_string(),
            })?;
            self.store.set(LEADERBOARD_KEY, &json)?;
        }

        Ok(high_score)
    }

    /// Stored high score, 0 if the user never finished a run
    pub fn high_score(&self, identity: Option<&Identity>) -> Result<u64, ScoreError> {
        let identity = identity.ok_or(ScoreError::MissingContext)?;
        self.read_u64(&high_score_key(&identity.user_id))
    }

    pub fn games_played(&self, identity: Option<&Identity>) -> Result<u64, ScoreError> {
        let identity = identity.ok_or(ScoreError::MissingContext)?;
        self.read_u64(&games_key(&identity.user_id))
    }

    /// Top entries, highest score first
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ScoreError> {
        Ok(self.load_leaderboard()?.entries)
    }

    fn load_leaderboard(&self) -> Result<Leaderboard, ScoreError> {
        match self.store.get(LEADERBOARD_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|_| ScoreError::Corrupt {
                key: LEADERBOARD_KEY.to_string(),
            }),
            None => Ok(Leaderboard::new()),
        }
    }

    fn read_u64(&self, key: &str) -> Result<u64, ScoreError> {
        match self.store.get(key)? {
            Some(value) => value.parse().map_err(|_| ScoreError::Corrupt {
                key: key.to_string(),
            }),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::scores::store::MemoryStore;
    use crate::sim::Level;

    /// Store whose every call fails, for exercising error paths
    pub(crate) struct DownStore;

    impl KeyValueStore for DownStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
        fn increment(&self, _key: &str, _by: i64) -> Result<i64, StoreError> {
            Err(StoreError::Unavailable("down".to_string()))
        }
    }

    fn report(score: u32) -> ScoreReport {
        ScoreReport {
            score,
            level: Level::Medium,
        }
    }

    #[test]
    fn test_save_keeps_best() {
        let service = ScoreService::new(MemoryStore::new());
        let alice = Identity::new("t2_a", "alice");

        assert_eq!(service.save_score(Some(&alice), report(40), 1).unwrap(), 40);
        assert_eq!(service.save_score(Some(&alice), report(20), 2).unwrap(), 40);
        assert_eq!(service.save_score(Some(&alice), report(90), 3).unwrap(), 90);
        assert_eq!(service.high_score(Some(&alice)).unwrap(), 90);
        assert_eq!(service.games_played(Some(&alice)).unwrap(), 3);
    }

    #[test]
    fn test_high_score_defaults_to_zero() {
        let service = ScoreService::new(MemoryStore::new());
        let bob = Identity::new("t2_b", "bob");
        assert_eq!(service.high_score(Some(&bob)).unwrap(), 0);
    }

    #[test]
    fn test_missing_context() {
        let service = ScoreService::new(MemoryStore::new());
        assert!(matches!(
            service.save_score(None, report(10), 1),
            Err(ScoreError::MissingContext)
        ));
        assert!(matches!(
            service.high_score(None),
            Err(ScoreError::MissingContext)
        ));
    }

    #[test]
    fn test_leaderboard_across_users() {
        let service = ScoreService::new(MemoryStore::new());
        let alice = Identity::new("t2_a", "alice");
        let bob = Identity::new("t2_b", "bob");

        assert!(service.leaderboard().unwrap().is_empty());

        service.save_score(Some(&alice), report(30), 100).unwrap();
        service.save_score(Some(&bob), report(50), 200).unwrap();
        service.save_score(Some(&bob), report(0), 300).unwrap();

        let board = service.leaderboard().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].username, "bob");
        assert_eq!(board[0].score, 50);
        assert_eq!(board[0].timestamp, 200);
        assert_eq!(board[1].username, "alice");
    }

    #[test]
    fn test_services_share_one_store() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let first = ScoreService::new(store.clone());
        let second = ScoreService::new(store);
        let alice = Identity::new("t2_a", "alice");
        let bob = Identity::new("t2_b", "bob");

        first.save_score(Some(&alice), report(30), 1).unwrap();
        second.save_score(Some(&bob), report(60), 2).unwrap();
        first.save_score(Some(&alice), report(10), 3).unwrap();

        let board = second.leaderboard().unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice", "alice"]);
        assert_eq!(second.games_played(Some(&alice)).unwrap(), 2);
        assert_eq!(first.high_score(Some(&bob)).unwrap(), 60);
    }

    #[test]
    fn test_corrupt_high_score() {
        let store = MemoryStore::new();
        store.set("highscore:t2_a", "lots").unwrap();
        let service = ScoreService::new(store);
        let alice = Identity::new("t2_a", "alice");
        assert!(matches!(
            service.high_score(Some(&alice)),
            Err(ScoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_store_failure_surfaces() {
        let service = ScoreService::new(DownStore);
        let alice = Identity::new("t2_a", "alice");
        assert!(matches!(
            service.save_score(Some(&alice), report(10), 1),
            Err(ScoreError::Store(_))
        ));
    }
}
