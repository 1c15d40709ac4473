//! The collidable capability and what a collision query returns
//!
//! Shapes never inspect each other's concrete type. The environment tags every
//! registered shape with a `ShapeKind` supplied by whoever registers it, and
//! query filters work on that tag and the shape's id.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::environment::WeakEnvironment;
use crate::error::Result;
use crate::geometry::{Line, Point, Rectangle, Velocity};

/// Registry-assigned identity, stable for a shape's whole registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Capability tag supplied at registration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Ball,
    Paddle,
    Block,
    Wall,
}

/// What a query filter sees of a registered shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration {
    pub id: ShapeId,
    pub kind: ShapeKind,
}

/// A shape that balls can strike
pub trait Collidable {
    fn bounding_rectangle(&self) -> Rectangle;

    /// Outgoing velocity for `hitter` striking this shape at `point`
    ///
    /// Shapes whose response depends on the struck edge return
    /// `Error::MissingCollisionLine` when `edge` is `None`.
    fn on_hit(
        &mut self,
        hitter: &Ball,
        point: Point,
        velocity: Velocity,
        edge: Option<&Line>,
    ) -> Result<Velocity>;

    /// Whether queries still see this shape
    ///
    /// A destroyed shape stays registered until the tick ends but takes no
    /// more hits and occupies no space.
    fn is_solid(&self) -> bool {
        true
    }

    /// Called once when the shape joins an environment
    fn attach(&mut self, _registration: Registration, _environment: WeakEnvironment) {}
}

pub type SharedCollidable = Rc<RefCell<dyn Collidable>>;

/// Query filter over registrations
pub type Predicate<'a> = &'a dyn Fn(Registration) -> bool;

pub fn include_all(_: Registration) -> bool {
    true
}

pub fn exclude_kind(kind: ShapeKind) -> impl Fn(Registration) -> bool {
    move |r| r.kind != kind
}

pub fn exclude_id(id: ShapeId) -> impl Fn(Registration) -> bool {
    move |r| r.id != id
}

/// Closest-collision query result
#[derive(Clone)]
pub struct CollisionInfo {
    point: Point,
    registration: Registration,
    shape: SharedCollidable,
    edge: Line,
    rectangle: Rectangle,
}

impl CollisionInfo {
    pub(crate) fn new(
        point: Point,
        registration: Registration,
        shape: SharedCollidable,
        edge: Line,
        rectangle: Rectangle,
    ) -> Self {
        Self {
            point,
            registration,
            shape,
            edge,
            rectangle,
        }
    }

    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    #[inline]
    pub fn registration(&self) -> Registration {
        self.registration
    }

    /// The struck shape
    #[inline]
    pub fn shape(&self) -> &SharedCollidable {
        &self.shape
    }

    /// The boundary edge that was crossed
    #[inline]
    pub fn edge(&self) -> Line {
        self.edge
    }

    /// The struck shape's bounding rectangle at query time
    #[inline]
    pub fn rectangle(&self) -> Rectangle {
        self.rectangle
    }
}

impl fmt::Debug for CollisionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionInfo")
            .field("point", &self.point)
            .field("registration", &self.registration)
            .field("edge", &self.edge)
            .finish()
    }
}
