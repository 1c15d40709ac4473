//! Level content: paddle, ball launches and block placement
//!
//! Layouts are plain data handed to the core. They are read from JSON; no
//! other level-file format is understood here.

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_WIDTH, TOP_BAR_HEIGHT, WALL_THICKNESS};
use crate::error::{Error, Result};
use crate::geometry::{Rectangle, Velocity};

/// Initial ball velocity as an angle (degrees clockwise from up) and speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallLaunch {
    pub angle: f64,
    pub speed: f64,
}

impl BallLaunch {
    pub fn velocity(&self) -> Velocity {
        Velocity::from_angle_and_speed(self.angle, self.speed)
    }
}

fn default_hit_points() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_hit_points")]
    pub hit_points: u32,
}

impl BlockSpec {
    pub fn rectangle(&self) -> Result<Rectangle> {
        Rectangle::from_coords(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub name: String,
    pub paddle_width: f64,
    /// Units per second
    pub paddle_speed: f64,
    pub balls: Vec<BallLaunch>,
    pub blocks: Vec<BlockSpec>,
    /// Blocks that must be destroyed to clear the level; all of them if unset
    #[serde(default)]
    pub blocks_to_remove: Option<usize>,
}

impl LevelLayout {
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self =
            serde_json::from_str(json).map_err(|e| Error::Layout(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Layout(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.paddle_width > 0.0 && self.paddle_width <= SCREEN_WIDTH) {
            return Err(Error::Layout(format!(
                "{}: paddle width {} does not fit the screen",
                self.name, self.paddle_width
            )));
        }
        if !(self.paddle_speed >= 0.0) {
            return Err(Error::Layout(format!(
                "{}: paddle speed {} is negative",
                self.name, self.paddle_speed
            )));
        }
        if self.balls.is_empty() {
            return Err(Error::Layout(format!("{}: no balls", self.name)));
        }
        for block in &self.blocks {
            block
                .rectangle()
                .map_err(|e| Error::Layout(format!("{}: {}", self.name, e)))?;
        }
        if self.removal_target() > self.blocks.len() {
            return Err(Error::Layout(format!(
                "{}: {} blocks to remove but only {} placed",
                self.name,
                self.removal_target(),
                self.blocks.len()
            )));
        }
        Ok(())
    }

    /// Number of blocks whose destruction clears the level
    pub fn removal_target(&self) -> usize {
        self.blocks_to_remove.unwrap_or(self.blocks.len())
    }

    /// Two rows of blocks spanning the playfield, two balls
    pub fn demo() -> Self {
        const COLUMNS: usize = 15;
        let width = (SCREEN_WIDTH - 2.0 * WALL_THICKNESS) / COLUMNS as f64;
        let height = 25.0;
        let top = TOP_BAR_HEIGHT + WALL_THICKNESS + 70.0;

        let blocks = (0..2)
            .flat_map(|row| {
                (0..COLUMNS).map(move |col| BlockSpec {
                    x: WALL_THICKNESS + col as f64 * width,
                    y: top + row as f64 * height,
                    width,
                    height,
                    hit_points: 2 - row as u32,
                })
            })
            .collect();

        Self {
            name: "Two Rows".into(),
            paddle_width: 120.0,
            paddle_speed: 480.0,
            balls: vec![
                BallLaunch {
                    angle: -30.0,
                    speed: 300.0,
                },
                BallLaunch {
                    angle: 30.0,
                    speed: 300.0,
                },
            ],
            blocks,
            blocks_to_remove: None,
        }
    }
}
