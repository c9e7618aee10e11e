//! Session driver
//!
//! Owns the current game, feeds it fixed timesteps from variable frame times,
//! applies input commands and reports each finished run exactly once.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, TICK_DT};
use crate::input::{self, Command, InputEvent};
use crate::scores::ScoreReporter;
use crate::sim::{GamePhase, GameState, Level, ScoreReport, tick};

pub struct Session {
    config: GameConfig,
    state: GameState,
    reporter: Box<dyn ScoreReporter>,
    /// Seeds for successive games
    seeds: Pcg32,
    accumulator: f32,
    /// High score known before the last report went out
    previous_best: Option<u64>,
    last_report: Option<ScoreReport>,
}

impl Session {
    /// Create an idle session and query the persisted high score
    pub fn new(
        config: GameConfig,
        level: Level,
        seed: u64,
        mut reporter: Box<dyn ScoreReporter>,
    ) -> Self {
        reporter.load_high_score();
        let mut seeds = Pcg32::seed_from_u64(seed);
        let state = GameState::new(config, level, seeds.random());
        Self {
            config,
            state,
            reporter,
            seeds,
            accumulator: 0.0,
            previous_best: None,
            last_report: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Choose a level for the next game. Ignored mid-run.
    pub fn select_level(&mut self, level: Level) {
        if self.state.phase == GamePhase::Running {
            return;
        }
        self.state = GameState::new(self.config, level, self.seeds.random());
        self.accumulator = 0.0;
        log::info!("Level selected: {}", level.as_str());
    }

    /// Start the idle game, or replace a finished one with a fresh run
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Idle => self.state = self.state.start(),
            GamePhase::Over => self.restart(),
            GamePhase::Running => {}
        }
    }

    /// Throw away the current game and start a new one on the same level
    pub fn restart(&mut self) {
        let level = self.state.level;
        self.state = GameState::new(self.config, level, self.seeds.random()).start();
        self.accumulator = 0.0;
        self.last_report = None;
    }

    pub fn jump(&mut self) {
        self.state = self.state.jump();
    }

    /// Apply a raw input event. Returns the command it mapped to.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<Command> {
        let command = input::map_event(event, self.state.phase)?;
        match command {
            Command::Jump => self.jump(),
            Command::Start => self.start(),
            Command::SelectLevel(level) => self.select_level(level),
        }
        Some(command)
    }

    /// Feed a frame delta (seconds) and run the ticks it covers. Returns ticks run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.state.phase != GamePhase::Running {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator = self.accumulator.min(TICK_DT * MAX_SUBSTEPS as f32);

        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            let outcome = tick(&self.state);
            let over = outcome.game_over();
            self.state = outcome.state;
            self.accumulator -= TICK_DT;
            substeps += 1;

            if let Some(report) = over {
                self.finish(report);
                break;
            }
        }

        substeps
    }

    fn finish(&mut self, report: ScoreReport) {
        self.accumulator = 0.0;
        self.previous_best = self.reporter.high_score();
        self.last_report = Some(report);
        self.reporter.report(report);
    }

    /// Best score the collaborator has confirmed
    pub fn high_score(&self) -> Option<u64> {
        self.reporter.high_score()
    }

    /// Whether the finished run set a new high score
    pub fn is_new_high_score(&self) -> bool {
        let Some(report) = self.last_report else {
            return false;
        };
        let score = u64::from(report.score);
        score > 0
            && self.reporter.high_score() == Some(score)
            && self.previous_best.is_none_or(|best| score > best)
    }
}

/// Frames per second over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FrameRate {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameRate {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FrameRate {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Slot after the newest holds the oldest sample; the window spans len - 1 intervals
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
