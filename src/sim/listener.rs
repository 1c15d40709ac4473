//! Hit notification: counters, removal queue and the stock listeners

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};

use super::ball::Ball;
use super::block::Block;
use super::collidable::ShapeId;
use crate::consts::{BLOCK_DESTROY_BONUS, BLOCK_HIT_SCORE};

/// Whether a listener stays attached after handling a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listening {
    Keep,
    Detach,
}

/// Observer of hits on a block
pub trait HitListener {
    /// Called after `block` has counted the hit from `hitter`
    fn hit_event(&mut self, block: &Block, hitter: &Ball) -> Listening;
}

/// Shared integer counter; clones observe the same value
#[derive(Debug, Clone, Default)]
pub struct Counter(Rc<Cell<i64>>);

impl Counter {
    pub fn new(value: i64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.0.get()
    }

    pub fn set(&self, value: i64) {
        self.0.set(value);
    }

    pub fn increase(&self, amount: i64) {
        self.0.set(self.0.get() + amount);
    }

    pub fn decrease(&self, amount: i64) {
        self.0.set(self.0.get() - amount);
    }
}

/// Shapes waiting to leave the environment at the next tick boundary
#[derive(Debug, Clone, Default)]
pub struct RemovalQueue(Rc<RefCell<Vec<ShapeId>>>);

impl RemovalQueue {
    pub fn push(&self, id: ShapeId) {
        let mut queue = self.0.borrow_mut();
        if !queue.contains(&id) {
            queue.push(id);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Take everything queued, in queue order
    pub fn drain(&self) -> Vec<ShapeId> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Adds points for every hit and a bonus for the hit that destroys a block
#[derive(Debug)]
pub struct ScoreTracker {
    score: Counter,
}

impl ScoreTracker {
    pub fn new(score: Counter) -> Self {
        Self { score }
    }
}

impl HitListener for ScoreTracker {
    fn hit_event(&mut self, block: &Block, _: &Ball) -> Listening {
        self.score.increase(BLOCK_HIT_SCORE);
        if block.destroyed_by_last_hit() {
            self.score.increase(BLOCK_DESTROY_BONUS);
        }
        Listening::Keep
    }
}

/// Queues a block on the hit that destroys it
#[derive(Debug)]
pub struct BlockRemover {
    remaining: Counter,
    removals: RemovalQueue,
}

impl BlockRemover {
    pub fn new(remaining: Counter, removals: RemovalQueue) -> Self {
        Self {
            remaining,
            removals,
        }
    }
}

impl HitListener for BlockRemover {
    fn hit_event(&mut self, block: &Block, _: &Ball) -> Listening {
        if !block.destroyed_by_last_hit() {
            return Listening::Keep;
        }
        self.remaining.decrease(1);
        if let Some(id) = block.id() {
            self.removals.push(id);
        }
        debug!(
            "block {:?} destroyed, {} left",
            block.id(),
            self.remaining.value()
        );
        Listening::Detach
    }
}

/// Attached to the death wall: any ball touching it is lost
#[derive(Debug)]
pub struct BallRemover {
    remaining: Counter,
    removals: RemovalQueue,
}

impl BallRemover {
    pub fn new(remaining: Counter, removals: RemovalQueue) -> Self {
        Self {
            remaining,
            removals,
        }
    }
}

impl HitListener for BallRemover {
    fn hit_event(&mut self, _: &Block, hitter: &Ball) -> Listening {
        self.remaining.decrease(1);
        if let Some(id) = hitter.id() {
            self.removals.push(id);
        }
        info!(
            "ball {:?} lost, {} in play",
            hitter.id(),
            self.remaining.value()
        );
        Listening::Keep
    }
}
