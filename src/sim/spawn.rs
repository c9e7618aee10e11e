//! Obstacle generation
//!
//! Obstacles enter from the right edge, travel left and bob gently up or down.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Obstacle};
use crate::config::GameConfig;
use crate::sim::Level;

/// Create one obstacle just off the right edge of the field
pub fn spawn_obstacle<R: Rng>(
    id: u32,
    level: Level,
    config: &GameConfig,
    rng: &mut R,
) -> Obstacle {
    let y = config.spawn_y().lerp(rng.random::<f32>());

    let magnitude = config.bob[rng.random_range(0..config.bob.len())];
    let bob = if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    };

    Obstacle {
        id,
        pos: Vec2::new(config.spawn_x(), y),
        direction: Vec2::new(-1.0, bob),
        speed: config.speed(level),
        length: config.length.lerp(rng.random::<f32>()),
        width: config.width.lerp(rng.random::<f32>()),
    }
}

/// Generate the opening wave for the state's level.
///
/// Consecutive obstacles are pushed further right so they arrive staggered.
pub fn spawn_wave(state: &mut GameState) -> Vec<Obstacle> {
    let count = state.config.obstacle_count(state.level);
    let mut wave = Vec::with_capacity(count);

    for i in 0..count {
        let id = state.next_obstacle_id();
        let mut obstacle = spawn_obstacle(id, state.level, &state.config, &mut state.rng);
        obstacle.pos.x += i as f32 * state.config.spawn_spacing;
        wave.push(obstacle);
    }

    wave
}

/// Send an obstacle that left the field back to the right edge at a new height
pub fn recycle<R: Rng>(mut obstacle: Obstacle, config: &GameConfig, rng: &mut R) -> Obstacle {
    obstacle.pos.x = config.spawn_x();
    obstacle.pos.y = config.spawn_y().lerp(rng.random::<f32>());
    obstacle
}
