//! One level: playfield, walls, blocks and the per-turn paddle and balls

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::block::{Block, BoundaryWall};
use super::collidable::{ShapeId, ShapeKind, include_all};
use super::environment::Environment;
use super::layout::LevelLayout;
use super::listener::{BallRemover, BlockRemover, Counter, RemovalQueue, ScoreTracker};
use super::paddle::{Paddle, PaddleMove};
use crate::consts::*;
use crate::error::Result;
use crate::geometry::{EqualDivision, Interval, Point, Rectangle, Vector};
use crate::tuning::PhysicsTuning;

/// Where a turn stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    Playing,
    /// Every block that has to go is gone
    Cleared,
    /// No balls left in play; a life was spent
    BallsLost,
}

pub struct Level {
    layout: LevelLayout,
    tuning: PhysicsTuning,
    environment: Environment,
    playfield: Rectangle,
    walls: Vec<Rc<RefCell<BoundaryWall>>>,
    blocks: BTreeMap<ShapeId, Rc<RefCell<Block>>>,
    paddle: Option<Rc<RefCell<Paddle>>>,
    balls: BTreeMap<ShapeId, Rc<RefCell<Ball>>>,
    remaining_blocks: Counter,
    remaining_balls: Counter,
    score: Counter,
    lives: Counter,
    removals: RemovalQueue,
    rng: Pcg32,
}

impl Level {
    /// Build walls and blocks; the first turn starts with `start_turn`
    pub fn new(
        layout: LevelLayout,
        tuning: PhysicsTuning,
        score: Counter,
        lives: Counter,
        seed: u64,
    ) -> Result<Self> {
        layout.validate()?;
        tuning.validate()?;
        let playfield = Rectangle::from_coords(
            WALL_THICKNESS,
            TOP_BAR_HEIGHT + WALL_THICKNESS,
            SCREEN_WIDTH - 2.0 * WALL_THICKNESS,
            SCREEN_HEIGHT - TOP_BAR_HEIGHT - WALL_THICKNESS,
        )?;

        let mut level = Self {
            remaining_blocks: Counter::new(layout.removal_target() as i64),
            layout,
            tuning,
            environment: Environment::new(),
            playfield,
            walls: Vec::new(),
            blocks: BTreeMap::new(),
            paddle: None,
            balls: BTreeMap::new(),
            remaining_balls: Counter::default(),
            score,
            lives,
            removals: RemovalQueue::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        level.build_walls()?;
        level.build_blocks()?;
        info!(
            "level '{}' initialized: {} blocks, {} to remove",
            level.layout.name,
            level.blocks.len(),
            level.remaining_blocks.value()
        );
        Ok(level)
    }

    fn build_walls(&mut self) -> Result<()> {
        let sides = [
            Rectangle::from_coords(0.0, TOP_BAR_HEIGHT, WALL_THICKNESS, SCREEN_HEIGHT)?,
            Rectangle::from_coords(
                SCREEN_WIDTH - WALL_THICKNESS,
                TOP_BAR_HEIGHT,
                WALL_THICKNESS,
                SCREEN_HEIGHT,
            )?,
            Rectangle::from_coords(0.0, TOP_BAR_HEIGHT, SCREEN_WIDTH, WALL_THICKNESS)?,
        ];
        for rect in sides {
            self.add_wall(BoundaryWall::new(rect));
        }

        // zero-height floor; anything touching it is lost
        let mut floor = BoundaryWall::new(Rectangle::from_coords(
            0.0,
            SCREEN_HEIGHT,
            SCREEN_WIDTH,
            0.0,
        )?);
        floor.add_hit_listener(Box::new(BallRemover::new(
            self.remaining_balls.clone(),
            self.removals.clone(),
        )));
        self.add_wall(floor);
        Ok(())
    }

    fn add_wall(&mut self, wall: BoundaryWall) {
        let wall = Rc::new(RefCell::new(
            wall.with_vertex_tolerance(self.tuning.vertex_tolerance),
        ));
        self.environment.register(&wall, ShapeKind::Wall);
        self.walls.push(wall);
    }

    fn build_blocks(&mut self) -> Result<()> {
        for spec in &self.layout.blocks {
            let mut block = Block::new(spec.rectangle()?, spec.hit_points)
                .with_vertex_tolerance(self.tuning.vertex_tolerance);
            block.add_hit_listener(Box::new(BlockRemover::new(
                self.remaining_blocks.clone(),
                self.removals.clone(),
            )));
            block.add_hit_listener(Box::new(ScoreTracker::new(self.score.clone())));
            let block = Rc::new(RefCell::new(block));
            let id = self.environment.register(&block, ShapeKind::Block);
            self.blocks.insert(id, block);
        }
        Ok(())
    }

    /// Place a fresh centered paddle and the layout's balls above it
    pub fn start_turn(&mut self) -> Result<()> {
        self.end_turn();

        let x = Interval::from_middle_and_width(SCREEN_WIDTH / 2.0, self.layout.paddle_width)?;
        let y = SCREEN_HEIGHT - PADDLE_HEIGHT - PADDLE_CLEARANCE;
        let paddle = Paddle::new(
            Point::new(x.low(), y),
            self.layout.paddle_width,
            PADDLE_HEIGHT,
            self.layout.paddle_speed,
        )?
        .with_tuning(self.tuning.clone());
        let spawn = paddle.top_middle().translated(Vector::new(0.0, -BALL_LIFT));
        let paddle = Rc::new(RefCell::new(paddle));
        self.environment.register(&paddle, ShapeKind::Paddle);
        self.paddle = Some(paddle);

        let count = self.layout.balls.len();
        let columns = EqualDivision::from_center_spacing_and_amount(spawn.x(), BALL_SPACING, count)?;
        for (i, launch) in self.layout.balls.iter().enumerate() {
            let ball = Ball::new(
                Point::new(columns.middle(i), spawn.y()),
                BALL_RADIUS,
                launch.velocity(),
            )?
            .with_bounds(self.playfield)
            .with_tuning(self.tuning.clone());
            let ball = Rc::new(RefCell::new(ball));
            let id = self.environment.register(&ball, ShapeKind::Ball);
            self.balls.insert(id, ball);
        }
        self.remaining_balls.set(count as i64);

        info!(
            "turn started on '{}' with {} balls, {} lives",
            self.layout.name,
            count,
            self.lives.value()
        );
        Ok(())
    }

    /// Take the paddle and any balls out of play
    pub fn end_turn(&mut self) {
        if let Some(paddle) = self.paddle.take() {
            if let Some(id) = paddle.borrow().id() {
                self.environment.remove_id(id);
            }
        }
        for id in std::mem::take(&mut self.balls).into_keys() {
            self.environment.remove_id(id);
        }
        self.removals.drain();
    }

    /// Advance the current turn by `dt`
    ///
    /// Moves the paddle, steps every ball in id order, then removes whatever
    /// was destroyed or lost during the tick. Ending a turn by losing every
    /// ball costs a life.
    pub fn tick_turn(&mut self, direction: PaddleMove, dt: f64) -> Result<TurnStatus> {
        let Some(paddle) = &self.paddle else {
            return Ok(self.status());
        };
        paddle.borrow_mut().move_paddle(direction, dt);

        for ball in self.balls.values() {
            ball.borrow_mut().step(dt, &mut self.rng)?;
        }
        self.apply_removals();

        let status = self.status();
        if status != TurnStatus::Playing {
            if self.remaining_balls.value() <= 0 {
                self.lives.decrease(1);
                info!("turn lost, {} lives left", self.lives.value());
            }
            if status == TurnStatus::Cleared {
                info!("level '{}' cleared", self.layout.name);
            }
            self.end_turn();
        }
        Ok(status)
    }

    fn apply_removals(&mut self) {
        for id in self.removals.drain() {
            self.environment.remove_id(id);
            self.balls.remove(&id);
            self.blocks.remove(&id);
        }
    }

    /// Where the current turn stands
    ///
    /// With no balls in play, which includes before the first turn, the
    /// status is `BallsLost` unless the level is already cleared.
    pub fn status(&self) -> TurnStatus {
        if self.remaining_blocks.value() <= 0 {
            TurnStatus::Cleared
        } else if self.remaining_balls.value() <= 0 {
            TurnStatus::BallsLost
        } else {
            TurnStatus::Playing
        }
    }

    /// A playfield point no shape surrounds
    pub fn free_point(&mut self) -> Option<Point> {
        self.environment.sample_free_point(
            &self.playfield,
            &include_all,
            &mut self.rng,
            self.tuning.max_free_point_attempts,
        )
    }

    pub fn inside_bounds(&self, point: Point) -> bool {
        self.playfield.x_span().contains(point.x()) && self.playfield.y_span().contains(point.y())
    }

    pub fn more_blocks_left(&self) -> bool {
        self.remaining_blocks.value() > 0
    }

    pub fn name(&self) -> &str {
        &self.layout.name
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn playfield(&self) -> Rectangle {
        self.playfield
    }

    pub fn paddle(&self) -> Option<&Rc<RefCell<Paddle>>> {
        self.paddle.as_ref()
    }

    pub fn balls(&self) -> impl Iterator<Item = &Rc<RefCell<Ball>>> {
        self.balls.values()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Rc<RefCell<Block>>> {
        self.blocks.values()
    }

    pub fn walls(&self) -> &[Rc<RefCell<BoundaryWall>>] {
        &self.walls
    }

    pub fn remaining_blocks(&self) -> i64 {
        self.remaining_blocks.value()
    }

    pub fn remaining_balls(&self) -> i64 {
        self.remaining_balls.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Velocity;
    use crate::sim::collidable::Collidable;
    use crate::sim::layout::{BallLaunch, BlockSpec};

    const DT: f64 = 1.0 / 60.0;

    fn single_block(launch: BallLaunch) -> LevelLayout {
        LevelLayout {
            name: "Single".into(),
            paddle_width: 100.0,
            paddle_speed: 300.0,
            balls: vec![launch],
            blocks: vec![BlockSpec {
                x: 380.0,
                y: 200.0,
                width: 40.0,
                height: 20.0,
                hit_points: 1,
            }],
            blocks_to_remove: None,
        }
    }

    fn level(layout: LevelLayout) -> Level {
        Level::new(
            layout,
            PhysicsTuning::default(),
            Counter::default(),
            Counter::new(STARTING_LIVES),
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_walls_and_blocks_registered() {
        let level = level(LevelLayout::demo());
        assert_eq!(level.walls().len(), 4);
        assert_eq!(level.blocks().count(), 30);
        assert_eq!(level.environment().len(), 34);
        assert!(level.more_blocks_left());
    }

    #[test]
    fn test_status_before_and_after_first_turn() {
        let mut level = level(LevelLayout::demo());
        assert_eq!(level.remaining_balls(), 0);
        assert_eq!(level.status(), TurnStatus::BallsLost);
        level.start_turn().unwrap();
        assert_eq!(level.status(), TurnStatus::Playing);
    }

    #[test]
    fn test_destroyed_block_takes_one_hit_per_tick() {
        let score = Counter::default();
        let up = BallLaunch {
            angle: 0.0,
            speed: 600.0,
        };
        let mut layout = single_block(up);
        layout.balls = vec![up, up];
        let mut level = Level::new(
            layout,
            PhysicsTuning::default(),
            score.clone(),
            Counter::new(STARTING_LIVES),
            1,
        )
        .unwrap();
        level.start_turn().unwrap();
        // both balls rise side by side under the same block
        let balls: Vec<_> = level.balls().cloned().collect();
        let xs: Vec<f64> = balls.iter().map(|b| b.borrow().center().x()).collect();
        assert_eq!(xs, vec![390.0, 410.0]);

        let mut status = TurnStatus::Playing;
        for _ in 0..120 {
            status = level.tick_turn(PaddleMove::Stay, DT).unwrap();
            if status != TurnStatus::Playing {
                break;
            }
        }
        assert_eq!(status, TurnStatus::Cleared);
        assert_eq!(score.value(), 15);
        // the first ball bounced; the second passed through the destroyed block
        assert!(balls[0].borrow().velocity().dy() > 0.0);
        assert!(balls[1].borrow().velocity().dy() < 0.0);
    }

    #[test]
    fn test_turn_places_paddle_and_balls() {
        let mut level = level(LevelLayout::demo());
        level.start_turn().unwrap();
        let paddle = level.paddle().unwrap().borrow().bounding_rectangle();
        assert_eq!(paddle.upper_left(), Point::new(340.0, 560.0));
        assert_eq!(paddle.width(), 120.0);

        let centers: Vec<Point> = level.balls().map(|b| b.borrow().center()).collect();
        assert_eq!(centers, vec![Point::new(390.0, 540.0), Point::new(410.0, 540.0)]);
        assert_eq!(level.remaining_balls(), 2);
        assert_eq!(level.environment().len(), 37);

        // a second turn replaces rather than adds
        level.start_turn().unwrap();
        assert_eq!(level.environment().len(), 37);
    }

    #[test]
    fn test_ball_straight_up_destroys_block_and_clears() {
        let score = Counter::default();
        let lives = Counter::new(STARTING_LIVES);
        let mut level = Level::new(
            single_block(BallLaunch {
                angle: 0.0,
                speed: 600.0,
            }),
            PhysicsTuning::default(),
            score.clone(),
            lives.clone(),
            1,
        )
        .unwrap();
        level.start_turn().unwrap();

        let mut status = TurnStatus::Playing;
        for _ in 0..120 {
            status = level.tick_turn(PaddleMove::Stay, DT).unwrap();
            if status != TurnStatus::Playing {
                break;
            }
        }
        assert_eq!(status, TurnStatus::Cleared);
        assert_eq!(score.value(), 15);
        assert_eq!(lives.value(), STARTING_LIVES);
        assert_eq!(level.blocks().count(), 0);
        assert!(level.paddle().is_none());
        // only the walls remain
        assert_eq!(level.environment().len(), 4);
    }

    #[test]
    fn test_ball_into_floor_costs_a_life() {
        let lives = Counter::new(2);
        let mut level = Level::new(
            single_block(BallLaunch {
                angle: 180.0,
                speed: 600.0,
            }),
            PhysicsTuning::default(),
            Counter::default(),
            lives.clone(),
            1,
        )
        .unwrap();
        level.start_turn().unwrap();
        // start beside the paddle so the ball falls straight to the floor
        let ball = level.balls().next().unwrap().clone();
        ball.borrow_mut().set_velocity(Velocity::new(0.0, 600.0));
        {
            let paddle = level.paddle().unwrap().clone();
            let mut paddle = paddle.borrow_mut();
            while paddle.move_paddle(PaddleMove::Right, DT) {}
        }

        let mut status = TurnStatus::Playing;
        for _ in 0..120 {
            status = level.tick_turn(PaddleMove::Stay, DT).unwrap();
            if status != TurnStatus::Playing {
                break;
            }
        }
        assert_eq!(status, TurnStatus::BallsLost);
        assert_eq!(lives.value(), 1);
        assert_eq!(level.balls().count(), 0);
        assert_eq!(level.remaining_blocks(), 1);

        // ticking an ended turn changes nothing
        assert_eq!(
            level.tick_turn(PaddleMove::Stay, DT).unwrap(),
            TurnStatus::BallsLost
        );
        assert_eq!(lives.value(), 1);
    }

    #[test]
    fn test_free_point_and_bounds() {
        let mut level = level(LevelLayout::demo());
        for _ in 0..50 {
            let p = level.free_point().unwrap();
            assert!(level.inside_bounds(p));
            assert!(!level.environment().is_surrounded(p));
        }
        assert!(!level.inside_bounds(Point::new(10.0, 300.0)));
        assert!(!level.inside_bounds(Point::new(400.0, 40.0)));
    }
}
