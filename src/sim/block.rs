//! Blocks, boundary walls and the generic edge reflection rule

use std::fmt;

use super::ball::Ball;
use super::collidable::{Collidable, Registration, ShapeId};
use super::environment::WeakEnvironment;
use super::listener::{HitListener, Listening};
use crate::error::{Error, Result};
use crate::geometry::{Line, Point, Rectangle, VERTEX_TOLERANCE, Vector, Velocity};

/// Bounce `velocity` off `edge` of `rect`
///
/// Corner hits reverse the velocity outright. Otherwise a horizontal edge
/// flips the vertical component and a vertical edge flips the horizontal one.
pub fn reflect_off_edge(
    rect: &Rectangle,
    point: Point,
    velocity: Velocity,
    edge: &Line,
    vertex_tolerance: f64,
) -> Velocity {
    if rect.is_vertex_within(point, vertex_tolerance) {
        return velocity.reversed();
    }
    let direction = edge.direction();
    let mut reflected = velocity;
    if direction.on_same_line(&Vector::X_UNIT) {
        reflected = reflected.with_negated_dy();
    }
    if direction.on_same_line(&Vector::Y_UNIT) {
        reflected = reflected.with_negated_dx();
    }
    reflected
}

/// A destructible rectangle
pub struct Block {
    rect: Rectangle,
    hit_points: u32,
    count_hits: bool,
    destroyed: bool,
    /// Set when the most recent counted hit was the destroying one
    destroyed_by_last_hit: bool,
    vertex_tolerance: f64,
    listeners: Vec<Box<dyn HitListener>>,
    registration: Option<Registration>,
}

impl Block {
    pub fn new(rect: Rectangle, hit_points: u32) -> Self {
        Self {
            rect,
            hit_points,
            count_hits: true,
            destroyed: false,
            destroyed_by_last_hit: false,
            vertex_tolerance: VERTEX_TOLERANCE,
            listeners: Vec::new(),
            registration: None,
        }
    }

    pub fn with_vertex_tolerance(mut self, tolerance: f64) -> Self {
        self.vertex_tolerance = tolerance;
        self
    }

    #[inline]
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    #[inline]
    pub fn counts_hits(&self) -> bool {
        self.count_hits
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether the hit being reported is the one that destroyed the block
    #[inline]
    pub fn destroyed_by_last_hit(&self) -> bool {
        self.destroyed_by_last_hit
    }

    pub fn id(&self) -> Option<ShapeId> {
        self.registration.map(|r| r.id)
    }

    pub fn add_hit_listener(&mut self, listener: Box<dyn HitListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn count_hit(&mut self) {
        self.destroyed_by_last_hit = false;
        if !self.count_hits {
            return;
        }
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.destroyed = true;
            self.destroyed_by_last_hit = true;
        }
    }

    fn notify_hit(&mut self, hitter: &Ball) {
        // listeners see the block, so they are detached while they run
        let mut listeners = std::mem::take(&mut self.listeners);
        listeners.retain_mut(|l| l.hit_event(self, hitter) == Listening::Keep);
        self.listeners = listeners;
    }
}

impl Collidable for Block {
    fn bounding_rectangle(&self) -> Rectangle {
        self.rect
    }

    fn on_hit(
        &mut self,
        hitter: &Ball,
        point: Point,
        velocity: Velocity,
        edge: Option<&Line>,
    ) -> Result<Velocity> {
        let edge = edge.ok_or(Error::MissingCollisionLine)?;
        if self.destroyed {
            return Ok(velocity);
        }
        self.count_hit();
        let reflected = reflect_off_edge(&self.rect, point, velocity, edge, self.vertex_tolerance);
        self.notify_hit(hitter);
        Ok(reflected)
    }

    fn is_solid(&self) -> bool {
        !self.destroyed
    }

    fn attach(&mut self, registration: Registration, _: WeakEnvironment) {
        self.registration = Some(registration);
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("rect", &self.rect)
            .field("hit_points", &self.hit_points)
            .field("count_hits", &self.count_hits)
            .field("destroyed", &self.destroyed)
            .field("listeners", &self.listeners.len())
            .field("registration", &self.registration)
            .finish()
    }
}

/// Indestructible block bounding the playfield
#[derive(Debug)]
pub struct BoundaryWall {
    block: Block,
}

impl BoundaryWall {
    pub fn new(rect: Rectangle) -> Self {
        let mut block = Block::new(rect, 1);
        block.count_hits = false;
        Self { block }
    }

    pub fn with_vertex_tolerance(self, tolerance: f64) -> Self {
        Self {
            block: self.block.with_vertex_tolerance(tolerance),
        }
    }

    pub fn add_hit_listener(&mut self, listener: Box<dyn HitListener>) {
        self.block.add_hit_listener(listener);
    }

    pub fn block(&self) -> &Block {
        &self.block
    }
}

impl Collidable for BoundaryWall {
    fn bounding_rectangle(&self) -> Rectangle {
        self.block.bounding_rectangle()
    }

    fn on_hit(
        &mut self,
        hitter: &Ball,
        point: Point,
        velocity: Velocity,
        edge: Option<&Line>,
    ) -> Result<Velocity> {
        self.block.on_hit(hitter, point, velocity, edge)
    }

    fn is_solid(&self) -> bool {
        self.block.is_solid()
    }

    fn attach(&mut self, registration: Registration, environment: WeakEnvironment) {
        self.block.attach(registration, environment);
    }
}
