//! Axis-aligned rectangles
//!
//! Corners and edges are stored in a fixed order that callers index into:
//! corners run upper-left, upper-right, bottom-right, bottom-left and edge `i`
//! joins corner `i` to corner `i + 1`, giving top, right, bottom, left.

use std::fmt;

use super::interval::Interval;
use super::line::{Line, LineIntersection};
use super::vector::{Point, Vector};
use crate::error::{Error, Result};

/// Distance under which an impact counts as hitting a corner
pub const VERTEX_TOLERANCE: f64 = 3.0;

/// Fixed edge indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fixed corner indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    UpperLeft = 0,
    UpperRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Corner {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    upper_left: Point,
    width: f64,
    height: f64,
    corners: [Point; 4],
    edges: [Line; 4],
}

impl Rectangle {
    pub fn new(upper_left: Point, width: f64, height: f64) -> Result<Self> {
        if !(width >= 0.0 && height >= 0.0 && width.is_finite() && height.is_finite()) {
            return Err(Error::InvalidRectangle { width, height });
        }
        Ok(Self::build(upper_left, width, height))
    }

    fn build(upper_left: Point, width: f64, height: f64) -> Self {
        let (x, y) = (upper_left.x(), upper_left.y());
        let corners = [
            upper_left,
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        let edges = [
            Line::new(corners[0], corners[1]),
            Line::new(corners[1], corners[2]),
            Line::new(corners[2], corners[3]),
            Line::new(corners[3], corners[0]),
        ];
        Self {
            upper_left,
            width,
            height,
            corners,
            edges,
        }
    }

    pub fn from_coords(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(Point::new(x, y), width, height)
    }

    /// Square of side `side` centered on `center`
    pub fn square(center: Point, side: f64) -> Result<Self> {
        let half = side / 2.0;
        Self::new(center.translated(Vector::new(-half, -half)), side, side)
    }

    /// Smallest rectangle with both points as opposite corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        let xs = Interval::spanning(a.x(), b.x());
        let ys = Interval::spanning(a.y(), b.y());
        Self::build(Point::new(xs.low(), ys.low()), xs.length(), ys.length())
    }

    /// Same size, moved so the upper-left corner sits at `upper_left`
    pub fn moved_to(&self, upper_left: Point) -> Rectangle {
        Self::from_corners(
            upper_left,
            upper_left.translated(Vector::new(self.width, self.height)),
        )
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

    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    #[inline]
    pub fn corner(&self, corner: Corner) -> Point {
        self.corners[corner.index()]
    }

    #[inline]
    pub fn edges(&self) -> &[Line; 4] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, edge: Edge) -> Line {
        self.edges[edge.index()]
    }

    pub fn center(&self) -> Point {
        self.upper_left
            .translated(Vector::new(self.width / 2.0, self.height / 2.0))
    }

    pub fn x_span(&self) -> Interval {
        Interval::from_start_and_width(self.upper_left.x(), self.width)
    }

    pub fn y_span(&self) -> Interval {
        Interval::from_start_and_width(self.upper_left.y(), self.height)
    }

    /// Up to two distinct crossings, edges tested in fixed order
    pub fn intersection_points(&self, line: &Line) -> Vec<Point> {
        let mut points = Vec::with_capacity(2);
        for edge in &self.edges {
            if let Some(p) = edge.intersection_with(line) {
                if !points.contains(&p) {
                    points.push(p);
                }
                if points.len() == 2 {
                    break;
                }
            }
        }
        points
    }

    /// Every edge crossed by `line`, with the edge as the intersected line
    pub fn intersections(&self, line: &Line) -> Vec<LineIntersection> {
        self.edges
            .iter()
            .filter_map(|edge| {
                line.intersection_with(edge)
                    .map(|p| LineIntersection::new(*line, *edge, p))
            })
            .collect()
    }

    #[inline]
    pub fn is_vertex(&self, point: Point) -> bool {
        self.is_vertex_within(point, VERTEX_TOLERANCE)
    }

    /// Whether `point` is closer than `tolerance` to any corner
    pub fn is_vertex_within(&self, point: Point, tolerance: f64) -> bool {
        self.corners.iter().any(|c| c.distance(point) < tolerance)
    }

    /// Strict interior test; points on the boundary are outside
    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x() - self.upper_left.x();
        let dy = point.y() - self.upper_left.y();
        dx > 0.0 && dx < self.width && dy > 0.0 && dy < self.height
    }

    /// Edge nearest to `point` by axis distance, first edge on ties
    pub fn closest_edge(&self, point: Point) -> Edge {
        let mut best = (Edge::Top, f64::INFINITY);
        for edge in Edge::ALL {
            let distance = self.axis_distance(point, edge);
            if distance < best.1 {
                best = (edge, distance);
            }
        }
        best.0
    }

    #[inline]
    pub fn closest_line(&self, point: Point) -> Line {
        self.edge(self.closest_edge(point))
    }

    fn axis_distance(&self, point: Point, edge: Edge) -> f64 {
        let line = self.edge(edge);
        match edge {
            Edge::Top | Edge::Bottom => (point.y() - line.start().y()).abs(),
            Edge::Right | Edge::Left => (point.x() - line.start().x()).abs(),
        }
    }

    /// First edge, in fixed order, that passes through `point`
    pub fn line_containing(&self, point: Point) -> Option<Line> {
        self.edges.iter().copied().find(|edge| edge.contains(point))
    }

    /// Which edge `line` is, if it is one of ours
    pub fn edge_of(&self, line: &Line) -> Option<Edge> {
        Edge::ALL.into_iter().find(|e| self.edges[e.index()] == *line)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}x{}]", self.upper_left, self.width, self.height)
    }
}
