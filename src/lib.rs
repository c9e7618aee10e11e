//! Snake Dodge - a side-scrolling dodge arcade game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (physics, obstacles, collisions, game state)
//! - `driver`: Session loop that ticks the simulation and reports finished runs
//! - `input`: Keyboard/pointer events mapped to game commands
//! - `renderer`: Draw primitives and the WebGPU pipeline
//! - `scores`: Key-value backed score service and its client
//! - `config`: Data-driven game constants

pub mod config;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod scores;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::{FrameRate, Session};
pub use settings::Settings;
pub use sim::{GamePhase, GameState, Level};

/// Engine-level constants that are not part of the tunable game config
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
