//! Registry of collidable shapes and closest-collision queries
//!
//! The environment indexes shapes without owning them: entries hold weak
//! references and dead ones are skipped. Mutation (add/remove) happens only
//! between ticks; queries borrow each shape read-only and pass over any shape
//! that is mid-update, which is always the body asking the question.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use rand::Rng;

use super::collidable::{
    Collidable, CollisionInfo, Predicate, Registration, ShapeId, ShapeKind, SharedCollidable,
    include_all,
};
use crate::geometry::{Line, LineIntersection, Point, Rectangle};

struct Entry {
    registration: Registration,
    shape: Weak<RefCell<dyn Collidable>>,
}

#[derive(Default)]
struct Registry {
    entries: Vec<Entry>,
    next_id: u32,
}

/// Shared handle to a collision registry
///
/// Cloning is cheap and every clone sees the same registry.
#[derive(Clone, Default)]
pub struct Environment {
    inner: Rc<RefCell<Registry>>,
}

/// Non-owning back-reference handed to registered shapes
#[derive(Clone, Default)]
pub struct WeakEnvironment(Weak<RefCell<Registry>>);

impl fmt::Debug for WeakEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeakEnvironment")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("registrations", &self.registrations())
            .finish()
    }
}

impl WeakEnvironment {
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(|inner| Environment { inner })
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(Rc::downgrade(&self.inner))
    }

    /// Register `shape` under `kind`; the shape is told its id and environment
    pub fn add_collidable(&self, shape: &SharedCollidable, kind: ShapeKind) -> ShapeId {
        let registration = {
            let mut registry = self.inner.borrow_mut();
            registry.entries.retain(|e| e.shape.strong_count() > 0);
            let id = ShapeId(registry.next_id);
            registry.next_id += 1;
            let registration = Registration { id, kind };
            registry.entries.push(Entry {
                registration,
                shape: Rc::downgrade(shape),
            });
            registration
        };
        shape.borrow_mut().attach(registration, self.downgrade());
        debug!("registered {:?} as {:?}", kind, registration.id);
        registration.id
    }

    /// Register a concretely typed shape
    pub fn register<T: Collidable + 'static>(
        &self,
        shape: &Rc<RefCell<T>>,
        kind: ShapeKind,
    ) -> ShapeId {
        let shared: SharedCollidable = shape.clone();
        self.add_collidable(&shared, kind)
    }

    /// Remove by reference identity; returns whether anything was removed
    pub fn remove_collidable(&self, shape: &SharedCollidable) -> bool {
        let target = Rc::as_ptr(shape);
        self.remove_where(|e| std::ptr::addr_eq(e.shape.as_ptr(), target))
    }

    /// Remove by registry id; returns whether anything was removed
    pub fn remove_id(&self, id: ShapeId) -> bool {
        self.remove_where(|e| e.registration.id == id)
    }

    fn remove_where(&self, matches: impl Fn(&Entry) -> bool) -> bool {
        let mut registry = self.inner.borrow_mut();
        let before = registry.entries.len();
        registry
            .entries
            .retain(|e| !matches(e) && e.shape.strong_count() > 0);
        registry.entries.len() < before
    }

    /// Live registrations in registration order
    pub fn registrations(&self) -> Vec<Registration> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.shape.strong_count() > 0)
            .map(|e| e.registration)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: ShapeId) -> Option<SharedCollidable> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|e| e.registration.id == id)
            .and_then(|e| e.shape.upgrade())
    }

    /// Closest collision along `trajectory` with every registered shape
    pub fn get_closest_collision(&self, trajectory: &Line) -> Option<CollisionInfo> {
        self.get_closest_collision_filtered(trajectory, &include_all)
    }

    /// Closest collision with the shapes `include` accepts
    pub fn get_closest_collision_filtered(
        &self,
        trajectory: &Line,
        include: Predicate<'_>,
    ) -> Option<CollisionInfo> {
        self.get_closest_collision_with_sensors(trajectory, include, 1, 0.0)
    }

    /// Closest collision probed by `2 * sensor_pairs + 1` parallel lines
    ///
    /// Hits on every probe are ranked by distance to the trajectory's own
    /// start. On an exact tie the first hit found wins, scanning probes from
    /// the most negative offset and shapes in registration order.
    pub fn get_closest_collision_with_sensors(
        &self,
        trajectory: &Line,
        include: Predicate<'_>,
        sensor_pairs: usize,
        sensor_spacing: f64,
    ) -> Option<CollisionInfo> {
        let probes = trajectory.equally_spaced_parallel_lines(sensor_spacing, sensor_pairs)?;
        let anchor = trajectory.start();

        // snapshot so no registry borrow is held while shapes are inspected
        let candidates: Vec<(Registration, SharedCollidable, Rectangle)> = {
            let registry = self.inner.borrow();
            registry
                .entries
                .iter()
                .filter(|e| include(e.registration))
                .filter_map(|e| {
                    let shape = e.shape.upgrade()?;
                    let rect = shape
                        .try_borrow()
                        .ok()
                        .filter(|s| s.is_solid())?
                        .bounding_rectangle();
                    Some((e.registration, shape, rect))
                })
                .collect()
        };

        let mut best: Option<(f64, LineIntersection, usize)> = None;
        for probe in &probes {
            for (index, (_, _, rect)) in candidates.iter().enumerate() {
                let Some(hit) = probe.closest_intersection_to_point(rect, anchor) else {
                    continue;
                };
                let distance = hit.point().distance(anchor);
                if best.as_ref().is_none_or(|(d, _, _)| distance < *d) {
                    best = Some((distance, hit, index));
                }
            }
        }

        let (_, hit, index) = best?;
        let (registration, shape, rect) = candidates.into_iter().nth(index)?;
        Some(CollisionInfo::new(
            hit.point(),
            registration,
            shape,
            hit.intersected(),
            rect,
        ))
    }

    /// Whether any solid shape's rectangle strictly contains `point`
    pub fn is_surrounded(&self, point: Point) -> bool {
        self.is_surrounded_filtered(point, &include_all)
    }

    /// Whether any solid shape `include` accepts strictly contains `point`
    ///
    /// A shape the caller holds mutably cannot be inspected and is passed
    /// over, so callers exclude themselves explicitly.
    pub fn is_surrounded_filtered(&self, point: Point, include: Predicate<'_>) -> bool {
        let registry = self.inner.borrow();
        registry
            .entries
            .iter()
            .filter(|e| include(e.registration))
            .filter_map(|e| e.shape.upgrade())
            .any(|shape| {
                shape
                    .try_borrow()
                    .is_ok_and(|s| s.is_solid() && s.bounding_rectangle().contains(point))
            })
    }

    /// Rejection-sample a point in `area` that no shape `include` accepts
    /// surrounds
    ///
    /// Gives up after `max_attempts` samples.
    pub fn sample_free_point<R: Rng + ?Sized>(
        &self,
        area: &Rectangle,
        include: Predicate<'_>,
        rng: &mut R,
        max_attempts: u32,
    ) -> Option<Point> {
        let (x, y) = (area.x_span(), area.y_span());
        for _ in 0..max_attempts {
            let p = Point::new(
                x.low() + rng.random::<f64>() * x.length(),
                y.low() + rng.random::<f64>() * y.length(),
            );
            if !self.is_surrounded_filtered(p, include) {
                return Some(p);
            }
        }
        warn!(
            "no free point found in {} after {} attempts",
            area, max_attempts
        );
        None
    }
}
