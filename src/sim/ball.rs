//! The ball: the only body that moves through the environment on its own

use log::{debug, warn};
use rand::Rng;

use super::collidable::{Collidable, Registration, ShapeId, ShapeKind, exclude_kind};
use super::environment::WeakEnvironment;
use crate::error::{Error, Result};
use crate::geometry::{Line, Point, Rectangle, Vector, Velocity};
use crate::tuning::PhysicsTuning;

/// What happened to a ball during one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Travelled its full trajectory
    Moved,
    /// Struck a shape and backed off short of the impact
    Collided { with: Registration, point: Point },
    /// Found inside a shape and moved to a free point
    Relocated,
}

#[derive(Debug, Clone)]
pub struct Ball {
    center: Point,
    radius: f64,
    velocity: Velocity,
    /// Area the ball must stay inside; also where relocation samples from
    bounds: Option<Rectangle>,
    tuning: PhysicsTuning,
    registration: Option<Registration>,
    environment: WeakEnvironment,
}

impl Ball {
    pub fn new(center: Point, radius: f64, velocity: Velocity) -> Result<Self> {
        if !(radius >= 0.0 && radius.is_finite()) {
            return Err(Error::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            velocity,
            bounds: None,
            tuning: PhysicsTuning::default(),
            registration: None,
            environment: WeakEnvironment::default(),
        })
    }

    pub fn with_bounds(mut self, bounds: Rectangle) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_tuning(mut self, tuning: PhysicsTuning) -> Self {
        self.tuning = tuning;
        self
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn id(&self) -> Option<ShapeId> {
        self.registration.map(|r| r.id)
    }

    /// Segment the ball would cover in `dt` with nothing in the way
    pub fn trajectory(&self, dt: f64) -> Line {
        Line::new(self.center, self.velocity.apply_to_point(self.center, dt))
    }

    /// Advance one tick
    ///
    /// Other balls are never considered. A hit adopts the struck shape's
    /// response and stops short of the impact point by the tuned back-off.
    /// A ball found inside the shape it hit is moved to a free point with its
    /// velocity untouched.
    pub fn step<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) -> Result<StepOutcome> {
        let trajectory = self.trajectory(dt);
        let collision = self.environment.upgrade().and_then(|env| {
            env.get_closest_collision_filtered(&trajectory, &exclude_kind(ShapeKind::Ball))
        });

        let outcome = match collision {
            None => {
                self.center = trajectory.end();
                StepOutcome::Moved
            }
            Some(info) if info.rectangle().contains(self.center) => {
                warn!(
                    "ball {:?} inside {:?} at {}, relocating",
                    self.id(),
                    info.registration().id,
                    self.center
                );
                self.relocate(rng);
                return Ok(StepOutcome::Relocated);
            }
            Some(info) => {
                let edge = info.edge();
                let velocity =
                    info.shape()
                        .borrow_mut()
                        .on_hit(self, info.point(), self.velocity, Some(&edge))?;
                debug!(
                    "ball {:?} hit {:?} at {}: {} -> {}",
                    self.id(),
                    info.registration().id,
                    info.point(),
                    self.velocity,
                    velocity
                );
                self.velocity = velocity;

                let to_impact = Line::new(self.center, info.point());
                if !to_impact.direction().is_zero() {
                    let fraction = self.tuning.backoff_fraction(velocity.speed(), dt);
                    let partial = to_impact.fraction_of_line(fraction);
                    if partial.length() >= self.tuning.minimum_movement {
                        self.center = partial.end();
                    }
                }
                StepOutcome::Collided {
                    with: info.registration(),
                    point: info.point(),
                }
            }
        };

        self.keep_inside_bounds(rng);
        self.fix_horizontal_velocity();
        Ok(outcome)
    }

    /// Move to a point inside `bounds` that no other shape surrounds
    fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (Some(bounds), Some(env)) = (self.bounds, self.environment.upgrade()) else {
            return;
        };
        let this = self.id();
        let others = |r: Registration| Some(r.id) != this;
        if let Some(p) =
            env.sample_free_point(&bounds, &others, rng, self.tuning.max_free_point_attempts)
        {
            self.center = p;
        }
    }

    fn keep_inside_bounds<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if !(bounds.x_span().contains(self.center.x()) && bounds.y_span().contains(self.center.y()))
        {
            warn!("ball {:?} left the playfield at {}", self.id(), self.center);
            self.relocate(rng);
        }
    }

    /// A purely horizontal ball never comes back down; send it straight up
    fn fix_horizontal_velocity(&mut self) {
        if self.velocity.as_vector().on_same_line(&Vector::X_UNIT) {
            let speed = self.velocity.speed();
            warn!("ball {:?} moving horizontally, redirecting up", self.id());
            self.velocity = Velocity::new(0.0, -speed);
        }
    }
}

impl Collidable for Ball {
    /// Square of side `2 * radius` around the center
    fn bounding_rectangle(&self) -> Rectangle {
        let half = Vector::new(self.radius, self.radius);
        Rectangle::from_corners(self.center.translated(-half), self.center.translated(half))
    }

    fn on_hit(&mut self, _: &Ball, _: Point, velocity: Velocity, _: Option<&Line>) -> Result<Velocity> {
        Ok(velocity)
    }

    fn attach(&mut self, registration: Registration, environment: WeakEnvironment) {
        self.registration = Some(registration);
        self.environment = environment;
    }
}
