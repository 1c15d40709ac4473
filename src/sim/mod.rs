//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, passed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (registration order, then by shape id)
//! - Registry changes only between ticks

pub mod ball;
pub mod block;
pub mod collidable;
pub mod environment;
pub mod flow;
pub mod layout;
pub mod level;
pub mod listener;
pub mod paddle;
pub mod tick;

pub use ball::{Ball, StepOutcome};
pub use block::{Block, BoundaryWall, reflect_off_edge};
pub use collidable::{
    Collidable, CollisionInfo, Predicate, Registration, ShapeId, ShapeKind, SharedCollidable,
    exclude_id, exclude_kind, include_all,
};
pub use environment::{Environment, WeakEnvironment};
pub use flow::{GameFlow, GamePhase};
pub use layout::{BallLaunch, BlockSpec, LevelLayout};
pub use level::{Level, TurnStatus};
pub use listener::{
    BallRemover, BlockRemover, Counter, HitListener, Listening, RemovalQueue, ScoreTracker,
};
pub use paddle::{Paddle, PaddleMove};
pub use tick::{TickInput, tick};
