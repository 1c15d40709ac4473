//! Brickfall headless runner
//!
//! Plays the demo layout with a paddle that chases the lowest ball and logs
//! how the run went. Pass a seed as the first argument; set `RUST_LOG=info`
//! (or `debug` for every collision) to see the simulation log.

use brickfall::consts::*;
use brickfall::sim::{GameFlow, LevelLayout, PaddleMove, TickInput, tick};
use brickfall::tuning::PhysicsTuning;

/// Five simulated minutes
const MAX_TICKS: u64 = 60 * 60 * 5;
/// The paddle holds still while the ball is this close to its middle
const DEAD_ZONE: f64 = 8.0;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> brickfall::Result<()> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    log::info!("Brickfall (headless) starting with seed {}", seed);

    let mut flow = GameFlow::new(
        vec![LevelLayout::demo()],
        PhysicsTuning::default(),
        seed,
        STARTING_LIVES,
    )?;

    while !flow.is_finished() && flow.time_ticks() < MAX_TICKS {
        let input = TickInput {
            paddle: chase_lowest_ball(&flow),
            pause: false,
        };
        tick(&mut flow, &input, SIM_DT)?;

        if flow.time_ticks() % 600 == 0 {
            log::info!(
                "t={}s score {} lives {}",
                flow.time_ticks() / 60,
                flow.score(),
                flow.lives()
            );
        }
    }

    log::info!(
        "finished {:?} after {} ticks: score {}, lives {}",
        flow.phase(),
        flow.time_ticks(),
        flow.score(),
        flow.lives()
    );
    Ok(())
}

fn chase_lowest_ball(flow: &GameFlow) -> PaddleMove {
    let Some(level) = flow.level() else {
        return PaddleMove::Stay;
    };
    let Some(paddle) = level.paddle() else {
        return PaddleMove::Stay;
    };
    let Some(target) = level
        .balls()
        .map(|b| b.borrow().center())
        .max_by(|a, b| a.y().total_cmp(&b.y()))
    else {
        return PaddleMove::Stay;
    };

    let middle = paddle.borrow().top_middle().x();
    if target.x() < middle - DEAD_ZONE {
        PaddleMove::Left
    } else if target.x() > middle + DEAD_ZONE {
        PaddleMove::Right
    } else {
        PaddleMove::Stay
    }
}
