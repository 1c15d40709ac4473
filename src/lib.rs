//! Brickfall - collision core for a ball-and-paddle brick breaker
//!
//! Core modules:
//! - `geometry`: Points, vectors, intervals, line segments, rectangles
//! - `sim`: Deterministic simulation (collision environment, balls, paddle,
//!   blocks, level and turn flow, fixed tick)
//! - `tuning`: Data-driven physics constants
//!
//! Rendering, input polling and persistence belong to the driver. It builds
//! a `sim::GameFlow`, calls `sim::tick` once per time slice and reads back
//! positions, score and lives.

pub mod error;
pub mod geometry;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use tuning::PhysicsTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f64 = 800.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;
    /// Band above the playfield reserved for the score line
    pub const TOP_BAR_HEIGHT: f64 = 30.0;
    /// Side and top wall thickness
    pub const WALL_THICKNESS: f64 = 25.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 5.0;
    /// Horizontal gap between spawned balls
    pub const BALL_SPACING: f64 = 20.0;
    /// Balls spawn this far above the paddle's top edge
    pub const BALL_LIFT: f64 = 20.0;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f64 = 20.0;
    /// Gap between the paddle's bottom and the floor
    pub const PADDLE_CLEARANCE: f64 = 20.0;

    /// Scoring
    pub const BLOCK_HIT_SCORE: i64 = 5;
    pub const BLOCK_DESTROY_BONUS: i64 = 10;
    pub const LEVEL_CLEAR_BONUS: i64 = 100;

    pub const STARTING_LIVES: i64 = 5;
}
