//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (obstacles sorted by ID)

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_collision};
pub use physics::BoundContact;
pub use state::{GamePhase, GameState, Level, Obstacle, Player, ScoreReport};
pub use tick::{GameEvent, GameOverCause, TickOutcome, tick};
