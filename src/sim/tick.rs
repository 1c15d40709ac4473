//! Fixed timestep simulation tick
//!
//! The driver calls `tick` once per time slice with that slice's input. The
//! core never reads a clock; `dt` is whatever the driver passes.

use serde::{Deserialize, Serialize};

use super::flow::{GameFlow, GamePhase};
use super::paddle::PaddleMove;
use crate::error::Result;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Requested paddle movement
    pub paddle: PaddleMove,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game by one fixed timestep
pub fn tick(flow: &mut GameFlow, input: &TickInput, dt: f64) -> Result<()> {
    if input.pause {
        match flow.phase() {
            GamePhase::Playing => {
                flow.set_phase(GamePhase::Paused);
                return Ok(());
            }
            GamePhase::Paused => flow.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    if flow.phase() != GamePhase::Playing {
        return Ok(());
    }
    flow.advance(input.paddle, dt)
}
