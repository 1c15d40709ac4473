//! Running a sequence of levels with shared lives and score

use log::info;
use serde::{Deserialize, Serialize};

use super::layout::LevelLayout;
use super::level::{Level, TurnStatus};
use super::listener::Counter;
use super::paddle::PaddleMove;
use crate::consts::LEVEL_CLEAR_BONUS;
use crate::error::Result;
use crate::tuning::PhysicsTuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Lives ran out
    GameOver,
    /// Every level cleared
    Victory,
}

pub struct GameFlow {
    layouts: Vec<LevelLayout>,
    tuning: PhysicsTuning,
    /// Run seed; each level derives its own from this
    seed: u64,
    level_index: usize,
    level: Option<Level>,
    lives: Counter,
    score: Counter,
    phase: GamePhase,
    time_ticks: u64,
}

impl GameFlow {
    /// Start the first level's first turn
    pub fn new(
        layouts: Vec<LevelLayout>,
        tuning: PhysicsTuning,
        seed: u64,
        starting_lives: i64,
    ) -> Result<Self> {
        tuning.validate()?;
        for layout in &layouts {
            layout.validate()?;
        }
        let mut flow = Self {
            layouts,
            tuning,
            seed,
            level_index: 0,
            level: None,
            lives: Counter::new(starting_lives),
            score: Counter::default(),
            phase: GamePhase::Playing,
            time_ticks: 0,
        };
        flow.load_level()?;
        Ok(flow)
    }

    fn load_level(&mut self) -> Result<()> {
        let Some(layout) = self.layouts.get(self.level_index).cloned() else {
            info!("all levels cleared, final score {}", self.score.value());
            self.level = None;
            self.phase = GamePhase::Victory;
            return Ok(());
        };
        let mut level = Level::new(
            layout,
            self.tuning.clone(),
            self.score.clone(),
            self.lives.clone(),
            self.seed.wrapping_add(self.level_index as u64),
        )?;
        if level.more_blocks_left() {
            level.start_turn()?;
        }
        self.level = Some(level);
        Ok(())
    }

    /// Advance the active turn one slice and react to how it ended
    pub fn advance(&mut self, direction: PaddleMove, dt: f64) -> Result<()> {
        if self.phase != GamePhase::Playing {
            return Ok(());
        }
        self.time_ticks += 1;
        let Some(level) = self.level.as_mut() else {
            return Ok(());
        };

        let status = level.tick_turn(direction, dt)?;
        if status == TurnStatus::Playing {
            return Ok(());
        }
        if self.lives.value() < 0 {
            info!("game over, final score {}", self.score.value());
            self.phase = GamePhase::GameOver;
            return Ok(());
        }
        match status {
            TurnStatus::Cleared => {
                self.score.increase(LEVEL_CLEAR_BONUS);
                self.level_index += 1;
                self.load_level()
            }
            _ => level.start_turn(),
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn lives(&self) -> i64 {
        self.lives.value()
    }

    pub fn score(&self) -> i64 {
        self.score.value()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Victory)
    }
}
