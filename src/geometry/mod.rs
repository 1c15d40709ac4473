//! Geometric value types
//!
//! Everything here is plain data: copyable, immutable after construction and
//! free of any knowledge about the game.

pub mod division;
pub mod interval;
pub mod line;
pub mod rect;
pub mod vector;

pub use division::EqualDivision;
pub use interval::Interval;
pub use line::{Line, LineIntersection};
pub use rect::{Corner, Edge, Rectangle, VERTEX_TOLERANCE};
pub use vector::{Point, Vector, Velocity, normalize_degrees};
