//! Game state and core simulation types
//!
//! A `GameState` is a value: the tick function reads one and returns the next.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::physics;
use super::spawn;
use crate::config::GameConfig;

/// Coarse lifecycle of a run. The three phases are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level selected, waiting to start
    Idle,
    /// Active gameplay
    Running,
    /// Run ended (terminal)
    Over,
}

/// Difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Index into per-level config tables
    pub fn index(self) -> usize {
        match self {
            Level::Easy => 0,
            Level::Medium => 1,
            Level::Hard => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }
}

/// The player's ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity, positive is downward
    pub velocity: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.player_x, config.player_start_y),
            velocity: 0.0,
            alive: true,
        }
    }
}

/// A moving snake the player has to dodge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Center of the body
    pub pos: Vec2,
    /// x is always -1; y is the bob component
    pub direction: Vec2,
    pub speed: f32,
    /// Horizontal extent
    pub length: f32,
    /// Vertical extent
    pub width: f32,
}

impl Obstacle {
    /// Axis-aligned body used for collision
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::new(self.length, self.width))
    }
}

/// Final result of a run, sent to the score collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u32,
    pub level: Level,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub level: Level,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active obstacles (sorted by id)
    pub obstacles: Vec<Obstacle>,
    pub(crate) rng: Pcg32,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game for the given level
    pub fn new(config: GameConfig, level: Level, seed: u64) -> Self {
        Self {
            seed,
            config,
            level,
            phase: GamePhase::Idle,
            score: 0,
            time_ticks: 0,
            player: Player::new(&config),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Leave `Idle` with a freshly generated obstacle wave.
    ///
    /// Any other phase is returned unchanged: an ended game is never revived.
    pub fn start(&self) -> Self {
        if self.phase != GamePhase::Idle {
            return self.clone();
        }
        let mut next = self.clone();
        next.obstacles = spawn::spawn_wave(&mut next);
        next.phase = GamePhase::Running;
        log::info!(
            "Game started on {} with {} obstacles (seed {})",
            next.level.as_str(),
            next.obstacles.len(),
            next.seed
        );
        next
    }

    /// Apply the jump command. Only the player's velocity changes.
    pub fn jump(&self) -> Self {
        let mut next = self.clone();
        if next.phase == GamePhase::Running {
            next.player = physics::jump(next.player, &next.config);
        }
        next
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn report(&self) -> ScoreReport {
        ScoreReport {
            score: self.score,
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(GameConfig::default(), Level::Medium, 7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(50.0, 150.0));
        assert!(state.player.alive);
    }

    #[test]
    fn test_start_generates_level_sized_wave() {
        for level in Level::ALL {
            let state = GameState::new(GameConfig::default(), level, 1).start();
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(
                state.obstacles.len(),
                GameConfig::default().obstacle_count(level)
            );
        }
    }

    #[test]
    fn test_start_leaves_original_untouched() {
        let idle = GameState::new(GameConfig::default(), Level::Easy, 1);
        let running = idle.start();
        assert_eq!(idle.phase, GamePhase::Idle);
        assert_eq!(running.phase, GamePhase::Running);
    }

    #[test]
    fn test_over_is_never_restarted() {
        let mut state = GameState::new(GameConfig::default(), Level::Easy, 1).start();
        state.phase = GamePhase::Over;
        assert_eq!(state.start().phase, GamePhase::Over);
    }

    #[test]
    fn test_jump_ignored_unless_running() {
        let idle = GameState::new(GameConfig::default(), Level::Easy, 1);
        assert_eq!(idle.jump().player.velocity, 0.0);

        let running = idle.start();
        assert_eq!(running.jump().player.velocity, -6.0);
    }

    #[test]
    fn test_obstacle_ids_unique() {
        let state = GameState::new(GameConfig::default(), Level::Hard, 3).start();
        let mut ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), state.obstacles.len());
    }

    #[test]
    fn test_level_names() {
        assert_eq!(Level::Hard.as_str(), "hard");
        assert_eq!(
            serde_json::to_string(&Level::Medium).unwrap(),
            "\"medium\""
        );
    }
}
