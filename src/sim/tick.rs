//! Fixed timestep simulation tick
//!
//! `tick` is a pure function of the previous state: it never mutates its input
//! and returns the next state together with what happened during the step.

use super::collision::circle_rect_collision;
use super::physics::{self, BoundContact};
use super::spawn;
use super::state::{GamePhase, GameState, ScoreReport};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Player sank to the bottom of the field
    HitFloor,
    /// Player touched an obstacle
    Collision { obstacle_id: u32 },
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An obstacle crossed the field and was sent back to the right edge
    ObstacleRecycled { id: u32, points: u32 },
    /// The run ended; emitted once per game
    GameOver {
        cause: GameOverCause,
        report: ScoreReport,
    },
}

/// Result of advancing one tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    /// The game-over report, if this tick ended the run
    pub fn game_over(&self) -> Option<ScoreReport> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver { report, .. } => Some(*report),
            _ => None,
        })
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &GameState) -> TickOutcome {
    let mut next = state.clone();
    let mut events = Vec::new();

    // Idle and Over are frozen
    if next.phase != GamePhase::Running {
        return TickOutcome {
            state: next,
            events,
        };
    }

    next.time_ticks += 1;

    let (player, contact) = physics::integrate(next.player, &next.config);
    next.player = player;
    if contact == BoundContact::Floor {
        end_game(&mut next, GameOverCause::HitFloor, &mut events);
        return TickOutcome {
            state: next,
            events,
        };
    }

    let config = next.config;
    for obstacle in next.obstacles.iter_mut() {
        obstacle.pos.x += obstacle.direction.x * obstacle.speed;
        obstacle.pos.y += obstacle.direction.y * config.vertical_step;

        if obstacle.pos.y < 0.0 || obstacle.pos.y > config.field_height {
            obstacle.direction.y = -obstacle.direction.y;
        }

        if obstacle.pos.x < config.recycle_threshold {
            *obstacle = spawn::recycle(*obstacle, &config, &mut next.rng);
            next.score += config.recycle_reward;
            log::debug!("Obstacle {} recycled, score {}", obstacle.id, next.score);
            events.push(GameEvent::ObstacleRecycled {
                id: obstacle.id,
                points: config.recycle_reward,
            });
        }
    }

    let hit = next
        .obstacles
        .iter()
        .find(|o| circle_rect_collision(next.player.pos, config.player_radius, &o.bounds()))
        .map(|o| o.id);
    if let Some(obstacle_id) = hit {
        end_game(&mut next, GameOverCause::Collision { obstacle_id }, &mut events);
    }

    TickOutcome {
        state: next,
        events,
    }
}

/// Move to `Over`. Callers only reach this while Running, so it fires once per game.
fn end_game(state: &mut GameState, cause: GameOverCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Over;
    state.player.alive = false;
    log::info!(
        "Game over ({:?}) on {} with score {}",
        cause,
        state.level.as_str(),
        state.score
    );
    events.push(GameEvent::GameOver {
        cause,
        report: state.report(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Obstacle;
    use crate::sim::Level;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(level: Level) -> GameState {
        GameState::new(GameConfig::default(), level, 12345).start()
    }

    fn obstacle(id: u32, x: f32, y: f32) -> Obstacle {
        Obstacle {
            id,
            pos: Vec2::new(x, y),
            direction: Vec2::new(-1.0, 0.5),
            speed: 2.0,
            length: 40.0,
            width: 10.0,
        }
    }

    #[test]
    fn test_idle_does_not_tick() {
        let idle = GameState::new(GameConfig::default(), Level::Easy, 1);
        let out = tick(&idle);
        assert_eq!(out.state.phase, GamePhase::Idle);
        assert_eq!(out.state.time_ticks, 0);
        assert_eq!(out.state.player, idle.player);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_gravity_example() {
        let mut state = running(Level::Easy);
        state.obstacles.clear();
        let out = tick(&state);
        assert!((out.state.player.velocity - 0.4).abs() < 1e-6);
        assert!((out.state.player.pos.y - 150.4).abs() < 1e-4);
        assert_eq!(out.state.phase, GamePhase::Running);

        let out = tick(&state.jump());
        assert!((out.state.player.velocity - -5.6).abs() < 1e-6);
        assert!((out.state.player.pos.y - 144.4).abs() < 1e-4);
    }

    #[test]
    fn test_tick_does_not_mutate_input() {
        let state = running(Level::Medium);
        let before = state.clone();
        let _ = tick(&state);
        assert_eq!(state.player, before.player);
        assert_eq!(state.obstacles, before.obstacles);
        assert_eq!(state.time_ticks, before.time_ticks);
    }

    #[test]
    fn test_floor_ends_game_and_skips_obstacles() {
        let mut state = running(Level::Easy);
        state.player.pos.y = 285.0;
        state.player.velocity = 20.0;
        let before = state.obstacles.clone();

        let out = tick(&state);
        assert_eq!(out.state.phase, GamePhase::Over);
        assert_eq!(out.state.player.pos.y, 284.0);
        assert_eq!(out.state.player.velocity, 0.0);
        assert!(!out.state.player.alive);
        assert_eq!(out.state.obstacles, before);
        assert_eq!(
            out.events,
            vec![GameEvent::GameOver {
                cause: GameOverCause::HitFloor,
                report: ScoreReport {
                    score: 0,
                    level: Level::Easy
                },
            }]
        );
    }

    #[test]
    fn test_ceiling_is_not_fatal() {
        let mut state = running(Level::Easy);
        state.obstacles.clear();
        state.player.pos.y = 2.0;
        state.player.velocity = -6.0;
        let out = tick(&state);
        assert_eq!(out.state.phase, GamePhase::Running);
        assert_eq!(out.state.player.pos.y, 0.0);
        assert_eq!(out.state.player.velocity, 0.0);
    }

    #[test]
    fn test_obstacle_moves_left_and_bobs() {
        let mut state = running(Level::Easy);
        state.obstacles = vec![obstacle(1, 300.0, 100.0)];
        let out = tick(&state);
        let o = out.state.obstacles[0];
        assert_eq!(o.pos, Vec2::new(298.0, 100.25));
    }

    #[test]
    fn test_obstacle_reflects_off_bounds() {
        let mut state = running(Level::Easy);
        let mut top = obstacle(1, 300.0, 0.1);
        top.direction.y = -1.0;
        let mut bottom = obstacle(2, 350.0, 299.9);
        bottom.direction.y = 1.0;
        state.obstacles = vec![top, bottom];

        let out = tick(&state);
        assert_eq!(out.state.obstacles[0].direction.y, 1.0);
        assert_eq!(out.state.obstacles[1].direction.y, -1.0);
        // Only the direction is flipped; this tick's move stands
        assert!(out.state.obstacles[0].pos.y < 0.0);
    }

    #[test]
    fn test_recycle_scores_ten() {
        let mut state = running(Level::Easy);
        state.obstacles = vec![obstacle(3, -49.0, 40.0)];

        let out = tick(&state);
        let o = out.state.obstacles[0];
        assert_eq!(o.id, 3);
        assert_eq!(o.pos.x, 450.0);
        assert!(o.pos.y >= 50.0 && o.pos.y < 250.0);
        assert_eq!(out.state.score, 10);
        assert_eq!(
            out.events,
            vec![GameEvent::ObstacleRecycled { id: 3, points: 10 }]
        );
    }

    #[test]
    fn test_collision_ends_game_once() {
        let mut state = running(Level::Hard);
        // Two obstacles on top of the player at once
        state.obstacles = vec![obstacle(1, 52.0, 150.0), obstacle(2, 52.0, 152.0)];
        state.score = 30;

        let out = tick(&state);
        assert_eq!(out.state.phase, GamePhase::Over);
        let overs: Vec<_> = out
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        assert_eq!(
            out.game_over(),
            Some(ScoreReport {
                score: 30,
                level: Level::Hard
            })
        );
        assert!(matches!(
            overs[0],
            GameEvent::GameOver {
                cause: GameOverCause::Collision { obstacle_id: 1 },
                ..
            }
        ));
    }

    #[test]
    fn test_over_is_frozen() {
        let mut state = running(Level::Medium);
        state.player.pos.y = 290.0;
        let over = tick(&state).state;
        assert_eq!(over.phase, GamePhase::Over);

        let mut current = over.clone();
        for _ in 0..10 {
            let out = tick(&current.jump());
            assert!(out.events.is_empty());
            current = out.state;
        }
        assert_eq!(current.obstacles, over.obstacles);
        assert_eq!(current.score, over.score);
        assert_eq!(current.player, over.player);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(Level::Hard);
        let mut b = running(Level::Hard);
        for i in 0..300 {
            if i % 12 == 0 {
                a = a.jump();
                b = b.jump();
            }
            a = tick(&a).state;
            b = tick(&b).state;
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            jumps in prop::collection::vec(any::<bool>(), 1..200),
        ) {
            let mut state = GameState::new(GameConfig::default(), Level::Medium, seed).start();
            for jump in jumps {
                if state.is_over() {
                    break;
                }
                if jump {
                    state = state.jump();
                }
                let out = tick(&state);
                prop_assert!(out.state.score >= state.score);
                if out.game_over().is_none() {
                    prop_assert_eq!(out.state.phase, GamePhase::Running);
                }
                state = out.state;
            }
        }
    }
}
