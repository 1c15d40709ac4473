//! The player's paddle
//!
//! Its top edge ignores the incoming direction and launches the ball at a
//! fixed angle chosen by where along the edge it landed. Every other hit
//! uses the generic reflection rule.

use log::debug;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::block::reflect_off_edge;
use super::collidable::{Collidable, Registration, ShapeId};
use super::environment::WeakEnvironment;
use crate::error::{Error, Result};
use crate::geometry::{Edge, EqualDivision, Line, Point, Rectangle, Vector, Velocity};
use crate::tuning::PhysicsTuning;

/// Requested horizontal movement for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleMove {
    #[default]
    Stay,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Paddle {
    upper_left: Point,
    width: f64,
    height: f64,
    /// Units per second
    speed: f64,
    tuning: PhysicsTuning,
    registration: Option<Registration>,
    environment: WeakEnvironment,
}

impl Paddle {
    pub fn new(upper_left: Point, width: f64, height: f64, speed: f64) -> Result<Self> {
        if !(width > 0.0 && height >= 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::InvalidRectangle { width, height });
        }
        Ok(Self {
            upper_left,
            width,
            height,
            speed,
            tuning: PhysicsTuning::default(),
            registration: None,
            environment: WeakEnvironment::default(),
        })
    }

    pub fn with_tuning(mut self, tuning: PhysicsTuning) -> Self {
        self.tuning = tuning;
        self
    }

    #[inline]
    pub fn upper_left(&self) -> Point {
        self.upper_left
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn id(&self) -> Option<ShapeId> {
        self.registration.map(|r| r.id)
    }

    pub fn top_middle(&self) -> Point {
        self.upper_left.translated(Vector::new(self.width / 2.0, 0.0))
    }

    fn middle_left(&self) -> Point {
        self.upper_left.translated(Vector::new(0.0, self.height / 2.0))
    }

    fn middle_right(&self) -> Point {
        self.upper_left
            .translated(Vector::new(self.width, self.height / 2.0))
    }

    /// Move `speed * dt` in `direction` unless something is in the way
    ///
    /// Probes ahead from the leading side with a fan of sensors covering the
    /// paddle's height. Returns whether the paddle moved.
    pub fn move_paddle(&mut self, direction: PaddleMove, dt: f64) -> bool {
        let (start, dx) = match direction {
            PaddleMove::Stay => return false,
            PaddleMove::Left => (self.middle_left(), -self.speed * dt),
            PaddleMove::Right => (self.middle_right(), self.speed * dt),
        };
        let offset = Vector::new(dx, 0.0);
        if offset.is_zero() {
            return false;
        }

        if let Some(env) = self.environment.upgrade() {
            let pairs = self.tuning.paddle_sensor_pairs;
            let spacing = if pairs == 0 {
                0.0
            } else {
                self.height / (2.0 * pairs as f64)
            };
            let this = self.id();
            let probe = Line::from_direction(start, offset);
            let blocked = env.get_closest_collision_with_sensors(
                &probe,
                &|r: Registration| Some(r.id) != this,
                pairs,
                spacing,
            );
            if let Some(info) = blocked {
                debug!("paddle blocked by {:?}", info.registration().id);
                return false;
            }
        }

        self.upper_left = self.upper_left.translated(offset);
        true
    }

    /// Launch angle for a hit at `x` along the top edge
    pub fn launch_angle(&self, x: f64) -> Result<f64> {
        let regions = self.tuning.paddle_regions;
        let edge = EqualDivision::new(self.bounding_rectangle().x_span(), regions)?;
        let fan = EqualDivision::from_center_spacing_and_amount(
            0.0,
            self.tuning.paddle_angle_spacing,
            regions,
        )?;
        Ok(fan.middle(edge.clamped_index_for(x)))
    }
}

impl Collidable for Paddle {
    fn bounding_rectangle(&self) -> Rectangle {
        Rectangle::from_corners(
            self.upper_left,
            self.upper_left
                .translated(Vector::new(self.width, self.height)),
        )
    }

    fn on_hit(
        &mut self,
        _: &Ball,
        point: Point,
        velocity: Velocity,
        edge: Option<&Line>,
    ) -> Result<Velocity> {
        let edge = edge.ok_or(Error::MissingCollisionLine)?;
        let rect = self.bounding_rectangle();
        let tolerance = self.tuning.vertex_tolerance;

        if *edge == rect.edge(Edge::Top) && !rect.is_vertex_within(point, tolerance) {
            let angle = self.launch_angle(point.x())?;
            return Ok(Velocity::from_angle_and_speed(angle, velocity.speed()));
        }
        Ok(reflect_off_edge(&rect, point, velocity, edge, tolerance))
    }

    fn attach(&mut self, registration: Registration, environment: WeakEnvironment) {
        self.registration = Some(registration);
        self.environment = environment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::block::Block;
    use crate::sim::collidable::{SharedCollidable, ShapeKind};
    use crate::sim::environment::Environment;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ball() -> Ball {
        Ball::new(Point::ORIGIN, 5.0, Velocity::ZERO).unwrap()
    }

    fn paddle() -> Paddle {
        Paddle::new(Point::new(0.0, 100.0), 100.0, 20.0, 300.0).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_region_angles() {
        let p = paddle();
        assert_eq!(p.launch_angle(10.0).unwrap(), -60.0);
        assert_eq!(p.launch_angle(30.0).unwrap(), -30.0);
        assert_eq!(p.launch_angle(50.0).unwrap(), 0.0);
        assert_eq!(p.launch_angle(90.0).unwrap(), 60.0);
        // clamped at and beyond the ends
        assert_eq!(p.launch_angle(100.0).unwrap(), 60.0);
        assert_eq!(p.launch_angle(-4.0).unwrap(), -60.0);
    }

    #[test]
    fn test_center_hit_launches_straight_up() {
        let mut p = paddle();
        let top = p.bounding_rectangle().edge(Edge::Top);
        for incoming in [Velocity::new(3.0, 4.0), Velocity::new(-4.0, 3.0)] {
            let out = p
                .on_hit(&ball(), Point::new(50.0, 100.0), incoming, Some(&top))
                .unwrap();
            assert!(close(out.dx(), 0.0));
            assert!(close(out.dy(), -5.0));
        }
    }

    #[test]
    fn test_left_region_launches_up_and_left() {
        let mut p = paddle();
        let top = p.bounding_rectangle().edge(Edge::Top);
        let out = p
            .on_hit(&ball(), Point::new(10.0, 100.0), Velocity::new(0.0, 200.0), Some(&top))
            .unwrap();
        assert!(close(out.speed(), 200.0));
        assert!(close(out.as_vector().angle(), -60.0));
    }

    #[test]
    fn test_side_and_corner_hits_use_generic_rule() {
        let mut p = paddle();
        let rect = p.bounding_rectangle();
        let v = Velocity::new(3.0, 4.0);

        let out = p
            .on_hit(&ball(), Point::new(100.0, 110.0), v, Some(&rect.edge(Edge::Right)))
            .unwrap();
        assert_eq!(out, Velocity::new(-3.0, 4.0));

        let out = p
            .on_hit(&ball(), Point::new(1.0, 100.0), v, Some(&rect.edge(Edge::Top)))
            .unwrap();
        assert_eq!(out, Velocity::new(-3.0, -4.0));
    }

    #[test]
    fn test_missing_edge_is_an_error() {
        let mut p = paddle();
        assert_eq!(
            p.on_hit(&ball(), Point::new(50.0, 100.0), Velocity::new(0.0, 1.0), None),
            Err(Error::MissingCollisionLine)
        );
    }

    #[test]
    fn test_moves_freely_and_stops_at_wall() {
        let env = Environment::new();
        let wall: SharedCollidable = Rc::new(RefCell::new(Block::new(
            Rectangle::from_coords(135.0, 90.0, 25.0, 40.0).unwrap(),
            1,
        )));
        env.add_collidable(&wall, ShapeKind::Wall);
        let paddle = Rc::new(RefCell::new(paddle()));
        let shared: SharedCollidable = paddle.clone();
        env.add_collidable(&shared, ShapeKind::Paddle);

        // 300 * 0.1 = 30 units per step
        assert!(paddle.borrow_mut().move_paddle(PaddleMove::Right, 0.1));
        assert!(close(paddle.borrow().upper_left().x(), 30.0));
        assert!(!paddle.borrow_mut().move_paddle(PaddleMove::Right, 0.1));
        assert!(close(paddle.borrow().upper_left().x(), 30.0));
        assert!(paddle.borrow_mut().move_paddle(PaddleMove::Left, 0.1));
        assert!(close(paddle.borrow().upper_left().x(), 0.0));
        assert!(!paddle.borrow_mut().move_paddle(PaddleMove::Stay, 0.1));
    }
}
