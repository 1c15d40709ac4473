//! Line segments and segment/segment intersection

use std::fmt;

use super::interval::Interval;
use super::rect::Rectangle;
use super::vector::{Point, Vector};

/// A directed line segment from `start` to `end`
///
/// The axis extents are computed once at construction; every intersection
/// query starts by comparing them.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    start: Point,
    end: Point,
    x_span: Interval,
    y_span: Interval,
}

impl PartialEq for Line {
    /// Exact endpoint equality, no tolerance
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            x_span: Interval::spanning(start.x(), end.x()),
            y_span: Interval::spanning(start.y(), end.y()),
        }
    }

    /// Segment from `start` along `direction`
    pub fn from_direction(start: Point, direction: Vector) -> Self {
        Self::new(start, start.translated(direction))
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn middle(&self) -> Point {
        Point::new(
            (self.start.x() + self.end.x()) / 2.0,
            (self.start.y() + self.end.y()) / 2.0,
        )
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x() == self.end.x()
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.start.y() == self.end.y()
    }

    /// Slope dy/dx, `None` for a vertical line
    pub fn slope(&self) -> Option<f64> {
        if self.is_vertical() {
            return None;
        }
        Some((self.end.y() - self.start.y()) / (self.end.x() - self.start.x()))
    }

    /// The y on this line at `x`, `None` when vertical or `x` is off the segment
    pub fn y_at(&self, x: f64) -> Option<f64> {
        if !self.x_span.contains(x) {
            return None;
        }
        let m = self.slope()?;
        Some(m * (x - self.start.x()) + self.start.y())
    }

    #[inline]
    pub fn x_span(&self) -> Interval {
        self.x_span
    }

    #[inline]
    pub fn y_span(&self) -> Interval {
        self.y_span
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        Vector::between(self.start, self.end)
    }

    pub fn reversed(&self) -> Line {
        Line::new(self.end, self.start)
    }

    /// Whether `p` lies on this segment (exact slope comparison)
    pub fn contains(&self, p: Point) -> bool {
        if !self.x_span.contains(p.x()) || !self.y_span.contains(p.y()) {
            return false;
        }
        match self.slope() {
            None => true,
            Some(m) if p == self.start => m.is_finite(),
            Some(m) => (p.y() - self.start.y()) / (p.x() - self.start.x()) == m,
        }
    }

    /// The point where two segments cross, if any
    pub fn intersection_with(&self, other: &Line) -> Option<Point> {
        // fast rejection on the axis extents
        let shared_x = self.x_span.intersection(&other.x_span)?;
        let shared_y = self.y_span.intersection(&other.y_span)?;

        match (self.is_vertical(), other.is_vertical()) {
            (true, true) => Some(Point::new(self.start.x(), shared_y.value())),
            (true, false) | (false, true) => {
                let slanted = if self.is_vertical() { other } else { self };
                let x = shared_x.value();
                let y = slanted.y_at(x)?;
                (self.y_span.contains(y) && other.y_span.contains(y)).then(|| Point::new(x, y))
            }
            (false, false) if self.is_horizontal() && other.is_horizontal() => {
                Some(Point::new(shared_x.value(), self.start.y()))
            }
            (false, false) => {
                let m1 = self.slope()?;
                let m2 = other.slope()?;
                if m1 == m2 {
                    // parallel: only collinear segments share a point
                    let x = shared_x.value();
                    let y = self.y_at(x)?;
                    return (other.y_at(x)? == y).then(|| Point::new(x, y));
                }
                let (x1, y1) = (self.start.x(), self.start.y());
                let (x2, y2) = (other.start.x(), other.start.y());
                let x = (y2 - y1 - m2 * x2 + m1 * x1) / (m1 - m2);
                if !self.x_span.contains(x) || !other.x_span.contains(x) {
                    return None;
                }
                let y = if other.is_horizontal() {
                    other.start.y()
                } else if self.is_horizontal() {
                    self.start.y()
                } else {
                    self.y_at(x)?
                };
                Some(Point::new(x, y))
            }
        }
    }

    #[inline]
    pub fn is_intersecting(&self, other: &Line) -> bool {
        self.intersection_with(other).is_some()
    }

    /// Nearest crossing with `rect` to this line's start
    pub fn closest_intersection_to_start(&self, rect: &Rectangle) -> Option<Point> {
        self.closest_intersection_to_start_line(rect)
            .map(|hit| hit.point())
    }

    /// Nearest crossing with `rect` to this line's start, with the struck edge
    pub fn closest_intersection_to_start_line(&self, rect: &Rectangle) -> Option<LineIntersection> {
        self.closest_intersection_to_point(rect, self.start)
    }

    /// Crossing with `rect` nearest to `anchor`; ties keep the first edge in order
    pub fn closest_intersection_to_point(
        &self,
        rect: &Rectangle,
        anchor: Point,
    ) -> Option<LineIntersection> {
        let mut best: Option<(f64, LineIntersection)> = None;
        for hit in rect.intersections(self) {
            let distance = hit.point().distance(anchor);
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, hit));
            }
        }
        best.map(|(_, hit)| hit)
    }

    /// `2 * pairs + 1` copies of this line offset along its perpendicular
    ///
    /// Offsets run from `-pairs * spacing` to `+pairs * spacing`; the middle
    /// entry is this line. `None` when the line has no direction.
    pub fn equally_spaced_parallel_lines(&self, spacing: f64, pairs: usize) -> Option<Vec<Line>> {
        let direction = self.direction();
        let step = direction.perpendicular()? * spacing;
        let pairs = pairs as i64;
        let lines = (-pairs..=pairs)
            .map(|i| Line::from_direction(self.start.translated(step * i as f64), direction))
            .collect();
        Some(lines)
    }

    /// Segment from the same start covering `fraction` of this one
    pub fn fraction_of_line(&self, fraction: f64) -> Line {
        Line::from_direction(self.start, self.direction() * fraction)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// A probe line crossing a shape edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection {
    intersecting: Line,
    intersected: Line,
    point: Point,
}

impl LineIntersection {
    pub fn new(intersecting: Line, intersected: Line, point: Point) -> Self {
        Self {
            intersecting,
            intersected,
            point,
        }
    }

    /// The moving probe
    #[inline]
    pub fn intersecting(&self) -> Line {
        self.intersecting
    }

    /// The edge that was crossed
    #[inline]
    pub fn intersected(&self) -> Line {
        self.intersected
    }

    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    pub fn distance_to_start_of_intersecting(&self) -> f64 {
        self.point.distance(self.intersecting.start())
    }

    /// Negative when this crossing is nearer its probe's start than `other`'s
    pub fn compare_distance_to_start(&self, other: &LineIntersection) -> f64 {
        self.distance_to_start_of_intersecting() - other.distance_to_start_of_intersecting()
    }
}
