//! Points, free vectors and velocities
//!
//! Angles are in degrees, measured clockwise from straight up (screen
//! coordinates, y grows downward). `Point::from_distance_and_angle` and
//! `Vector::angle` share that convention, so a polar point converted back to
//! a vector reports the angle it was built from.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Map degrees into (-180, 180]
#[inline]
pub fn normalize_degrees(mut angle: f64) -> f64 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

/// A position on the plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point(DVec2);

impl Point {
    pub const ORIGIN: Point = Point(DVec2::ZERO);

    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.0.distance(other.0)
    }

    /// The free vector from the origin to this point
    #[inline]
    pub fn as_vector(&self) -> Vector {
        Vector(self.0)
    }

    /// This point moved by `offset`
    #[inline]
    pub fn translated(&self, offset: Vector) -> Point {
        Point(self.0 + offset.0)
    }

    /// Point at `distance` from the origin, `angle` degrees clockwise from up
    pub fn from_distance_and_angle(distance: f64, angle: f64) -> Self {
        let rads = angle.to_radians() - std::f64::consts::FRAC_PI_2;
        Self::new(distance * rads.cos(), distance * rads.sin())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// A free 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector(DVec2);

impl Vector {
    pub const ZERO: Vector = Vector(DVec2::ZERO);
    pub const X_UNIT: Vector = Vector(DVec2::X);
    pub const Y_UNIT: Vector = Vector(DVec2::Y);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self(DVec2::new(dx, dy))
    }

    /// Vector pointing from `start` to `end`
    #[inline]
    pub fn between(start: Point, end: Point) -> Self {
        Self(end.0 - start.0)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn scale(&self, scalar: f64) -> Vector {
        Vector(self.0 * scalar)
    }

    /// Scale only the horizontal component
    #[inline]
    pub fn scale_x(&self, scalar: f64) -> Vector {
        Vector::new(self.0.x * scalar, self.0.y)
    }

    /// Scale only the vertical component
    #[inline]
    pub fn scale_y(&self, scalar: f64) -> Vector {
        Vector::new(self.0.x, self.0.y * scalar)
    }

    /// Per-axis product
    #[inline]
    pub fn component_mul(&self, other: Vector) -> Vector {
        Vector(self.0 * other.0)
    }

    /// Degrees clockwise from straight up, in (-180, 180]
    pub fn angle(&self) -> f64 {
        normalize_degrees(self.0.y.atan2(self.0.x).to_degrees() + 90.0)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == DVec2::ZERO
    }

    /// Exact angle equality; the zero vector has no direction
    pub fn same_direction(&self, other: &Vector) -> bool {
        !self.is_zero() && !other.is_zero() && self.angle() == other.angle()
    }

    /// Same direction or exactly opposite
    pub fn on_same_line(&self, other: &Vector) -> bool {
        self.same_direction(other) || self.opposite().same_direction(other)
    }

    /// Unit vector rotated a quarter turn clockwise, `None` for the zero vector
    pub fn perpendicular(&self) -> Option<Vector> {
        if self.is_zero() {
            return None;
        }
        Some(Vector(self.0.perp().normalize()))
    }

    /// Unit vector in the same direction, `None` for the zero vector
    pub fn unitize(&self) -> Option<Vector> {
        if self.is_zero() {
            return None;
        }
        Some(Vector(self.0.normalize()))
    }

    #[inline]
    pub fn opposite(&self) -> Vector {
        Vector(-self.0)
    }

    #[inline]
    pub fn as_point(&self) -> Point {
        Point(self.0)
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        self.0
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Vector(v)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.scale(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.opposite()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.0.x, self.0.y)
    }
}

/// Velocity of a moving body, in units per second
///
/// Reflection rules never mutate a velocity in place; they return a new one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity(Vector);

impl Velocity {
    pub const ZERO: Velocity = Velocity(Vector::ZERO);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self(Vector::new(dx, dy))
    }

    /// Velocity heading `angle` degrees clockwise from up
    pub fn from_angle_and_speed(angle: f64, speed: f64) -> Self {
        Self(Point::from_distance_and_angle(speed, angle).as_vector())
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.0.x()
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.0.y()
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn as_vector(&self) -> Vector {
        self.0
    }

    /// Displacement covered in `dt` seconds
    #[inline]
    pub fn scaled_by_time(&self, dt: f64) -> Vector {
        self.0.scale(dt)
    }

    /// Where `point` ends up after `dt` seconds
    #[inline]
    pub fn apply_to_point(&self, point: Point, dt: f64) -> Point {
        point.translated(self.scaled_by_time(dt))
    }

    #[inline]
    pub fn reversed(&self) -> Velocity {
        Velocity(self.0.opposite())
    }

    #[inline]
    pub fn with_negated_dx(&self) -> Velocity {
        Velocity(self.0.scale_x(-1.0))
    }

    #[inline]
    pub fn with_negated_dy(&self) -> Velocity {
        Velocity(self.0.scale_y(-1.0))
    }
}

impl From<Vector> for Velocity {
    fn from(v: Vector) -> Self {
        Velocity(v)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx(), self.dy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_polar_zero_points_up() {
        let p = Point::from_distance_and_angle(10.0, 0.0);
        assert!(close(p.x(), 0.0));
        assert!(close(p.y(), -10.0));

        let right = Point::from_distance_and_angle(10.0, 90.0);
        assert!(close(right.x(), 10.0));
        assert!(close(right.y(), 0.0));
    }

    #[test]
    fn test_angle_of_axes() {
        assert!(close(Vector::new(0.0, -1.0).angle(), 0.0));
        assert!(close(Vector::X_UNIT.angle(), 90.0));
        assert!(close(Vector::Y_UNIT.angle(), 180.0));
        assert!(close(Vector::new(-1.0, 0.0).angle(), -90.0));
    }

    #[test]
    fn test_same_line_and_direction() {
        let v = Vector::new(3.0, 0.0);
        assert!(v.same_direction(&Vector::X_UNIT));
        assert!(!v.same_direction(&Vector::new(-3.0, 0.0)));
        assert!(v.on_same_line(&Vector::new(-0.5, 0.0)));
        assert!(!v.on_same_line(&Vector::Y_UNIT));
        assert!(!Vector::ZERO.on_same_line(&Vector::X_UNIT));
    }

    #[test]
    fn test_perpendicular_is_unit_and_orthogonal() {
        let v = Vector::new(3.0, 4.0);
        let p = v.perpendicular().unwrap();
        assert!(close(p.length(), 1.0));
        assert!(close(p.as_dvec2().dot(v.as_dvec2()), 0.0));
        assert!(Vector::ZERO.perpendicular().is_none());
        assert!(Vector::ZERO.unitize().is_none());
    }

    #[test]
    fn test_per_axis_scaling() {
        let v = Vector::new(2.0, -3.0);
        assert_eq!(v.scale_x(-1.0), Vector::new(-2.0, -3.0));
        assert_eq!(v.scale_y(2.0), Vector::new(2.0, -6.0));
        assert_eq!(v.component_mul(Vector::new(0.5, 2.0)), Vector::new(1.0, -6.0));
        assert_eq!(v - v, Vector::ZERO);
        assert_eq!(-v + v * 2.0, v);
    }

    #[test]
    fn test_velocity_from_angle_keeps_speed() {
        let v = Velocity::from_angle_and_speed(-60.0, 200.0);
        assert!(close(v.speed(), 200.0));
        assert!(v.dx() < 0.0);
        assert!(v.dy() < 0.0);
        assert!(close(v.as_vector().angle(), -60.0));
    }

    #[test]
    fn test_velocity_apply_to_point() {
        let v = Velocity::new(10.0, -20.0);
        let p = v.apply_to_point(Point::new(1.0, 1.0), 0.5);
        assert_eq!(p, Point::new(6.0, -9.0));
    }

    proptest! {
        #[test]
        fn prop_polar_round_trip(distance in 0.01f64..1000.0, angle in -720.0f64..720.0) {
            let v = Point::from_distance_and_angle(distance, angle).as_vector();
            let diff = normalize_degrees(v.angle() - angle);
            prop_assert!(diff.abs() < 1e-6);
            prop_assert!((v.length() - distance).abs() < 1e-6 * distance.max(1.0));
        }
    }
}
