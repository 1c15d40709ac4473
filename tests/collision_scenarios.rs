//! End-to-end collision scenarios through the public API

use std::cell::RefCell;
use std::rc::Rc;

use brickfall::Error;
use brickfall::geometry::{Edge, Line, Point, Rectangle, Velocity};
use brickfall::sim::{
    Ball, Block, Collidable, Environment, Paddle, ShapeKind, StepOutcome, exclude_id,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;

const DT: f64 = 1.0 / 60.0;

fn rng() -> Pcg32 {
    Pcg32::seed_from_u64(7)
}

fn block(env: &Environment, x: f64, y: f64, w: f64, h: f64) -> Rc<RefCell<Block>> {
    let block = Rc::new(RefCell::new(Block::new(
        Rectangle::from_coords(x, y, w, h).unwrap(),
        1,
    )));
    env.register(&block, ShapeKind::Block);
    block
}

fn ball(env: &Environment, center: Point, velocity: Velocity) -> Rc<RefCell<Ball>> {
    let ball = Rc::new(RefCell::new(Ball::new(center, 5.0, velocity).unwrap()));
    env.register(&ball, ShapeKind::Ball);
    ball
}

#[test]
fn test_vertical_trajectory_hits_top_edge() {
    let env = Environment::new();
    let target = block(&env, 0.0, 0.0, 10.0, 10.0);
    let rect = target.borrow().bounding_rectangle();

    let info = env
        .get_closest_collision(&Line::from_coords(5.0, -5.0, 5.0, 5.0))
        .unwrap();
    assert_eq!(info.point(), Point::new(5.0, 0.0));
    assert_eq!(info.edge(), rect.edge(Edge::Top));
    assert_eq!(info.registration().kind, ShapeKind::Block);
}

#[test]
fn test_miss_returns_none() {
    let env = Environment::new();
    let _target = block(&env, 0.0, 0.0, 10.0, 10.0);
    assert!(
        env.get_closest_collision(&Line::from_coords(20.0, -5.0, 20.0, 5.0))
            .is_none()
    );
}

#[test]
fn test_excluded_shape_is_skipped() {
    let env = Environment::new();
    let near = block(&env, 0.0, 10.0, 10.0, 10.0);
    let far = block(&env, 0.0, 40.0, 10.0, 10.0);
    let trajectory = Line::from_coords(5.0, 0.0, 5.0, 100.0);

    let hit = env.get_closest_collision(&trajectory).unwrap();
    assert_eq!(Some(hit.registration().id), near.borrow().id());

    let skip_near = exclude_id(near.borrow().id().unwrap());
    let hit = env
        .get_closest_collision_filtered(&trajectory, &skip_near)
        .unwrap();
    assert_eq!(Some(hit.registration().id), far.borrow().id());
    assert_eq!(hit.point(), Point::new(5.0, 40.0));
}

#[test]
fn test_sensors_catch_what_the_center_line_misses() {
    let env = Environment::new();
    let _beside = block(&env, 8.0, 20.0, 10.0, 10.0);
    let trajectory = Line::from_coords(5.0, 0.0, 5.0, 50.0);
    assert!(env.get_closest_collision(&trajectory).is_none());

    let probes = trajectory.equally_spaced_parallel_lines(2.0, 2).unwrap();
    assert_eq!(probes.len(), 5);

    let hit = env
        .get_closest_collision_with_sensors(&trajectory, &|_| true, 2, 2.0)
        .unwrap();
    assert_eq!(hit.point().y(), 20.0);
}

#[test]
fn test_ball_moves_freely_without_obstacles() {
    let env = Environment::new();
    let ball = ball(&env, Point::new(100.0, 100.0), Velocity::new(60.0, 120.0));
    let outcome = ball.borrow_mut().step(DT, &mut rng()).unwrap();
    assert_eq!(outcome, StepOutcome::Moved);
    assert_eq!(ball.borrow().center(), Point::new(101.0, 102.0));
}

#[test]
fn test_ball_bounces_off_block_bottom() {
    let env = Environment::new();
    let target = block(&env, 50.0, 0.0, 100.0, 20.0);
    let ball = ball(&env, Point::new(100.0, 30.0), Velocity::new(0.0, -900.0));

    let outcome = ball.borrow_mut().step(DT, &mut rng()).unwrap();
    assert!(matches!(outcome, StepOutcome::Collided { .. }));
    assert_eq!(ball.borrow().velocity(), Velocity::new(0.0, 900.0));
    assert_eq!(target.borrow().hit_points(), 0);
}

#[test]
fn test_paddle_top_sets_launch_angle() {
    let env = Environment::new();
    let paddle = Rc::new(RefCell::new(
        Paddle::new(Point::new(0.0, 100.0), 100.0, 20.0, 300.0).unwrap(),
    ));
    env.register(&paddle, ShapeKind::Paddle);

    assert!((paddle.borrow().launch_angle(10.0).unwrap() + 60.0).abs() < 1e-9);
    assert!(paddle.borrow().launch_angle(50.0).unwrap().abs() < 1e-9);

    let ball = ball(&env, Point::new(10.0, 90.0), Velocity::new(0.0, 1200.0));
    ball.borrow_mut().step(DT, &mut rng()).unwrap();
    let launched = ball.borrow().velocity();
    let expected = Velocity::from_angle_and_speed(-60.0, 1200.0);
    assert!((launched.dx() - expected.dx()).abs() < 1e-9);
    assert!((launched.dy() - expected.dy()).abs() < 1e-9);
    assert!(launched.dx() < 0.0 && launched.dy() < 0.0);
}

#[test]
fn test_tunneled_ball_lands_on_free_point() {
    let env = Environment::new();
    let _target = block(&env, 0.0, 0.0, 100.0, 100.0);
    let bounds = Rectangle::from_coords(0.0, 0.0, 400.0, 400.0).unwrap();
    let velocity = Velocity::new(0.0, -600.0);
    let ball = Rc::new(RefCell::new(
        Ball::new(Point::new(50.0, 5.0), 5.0, velocity)
            .unwrap()
            .with_bounds(bounds),
    ));
    env.register(&ball, ShapeKind::Ball);

    let outcome = ball.borrow_mut().step(DT, &mut rng()).unwrap();
    assert_eq!(outcome, StepOutcome::Relocated);
    let ball = ball.borrow();
    let others = exclude_id(ball.id().unwrap());
    assert!(!env.is_surrounded_filtered(ball.center(), &others));
    assert_eq!(ball.velocity(), velocity);
}

#[test]
fn test_block_needs_the_struck_edge() {
    let mut target = Block::new(Rectangle::from_coords(0.0, 0.0, 10.0, 10.0).unwrap(), 1);
    let hitter = Ball::new(Point::new(5.0, -5.0), 5.0, Velocity::new(0.0, 60.0)).unwrap();
    let err = target
        .on_hit(&hitter, Point::new(5.0, 0.0), hitter.velocity(), None)
        .unwrap_err();
    assert_eq!(err, Error::MissingCollisionLine);
}
