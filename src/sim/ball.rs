//! The ball: a direction state machine plus its post-move checks
//!
//! The ball only ever travels diagonally (or not at all). After every move it
//! checks, in order:
//! 1. goals - records a point, stops the ball, skips everything else
//! 2. obstacles - first hit flips vertical direction, resolved on Y
//! 3. paddles - first hit flips horizontal direction, resolved on X
//!
//! Obstacles and paddles are independent: both can resolve in the same frame,
//! but only the first overlapping body of each group is handled.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Bodies, Body, BodyId};
use super::collision::{Axis, resolve_overlap};
use super::geometry::Rect;
use crate::audio::{SoundEffect, SoundSink};
use crate::render::{Canvas, Color};

/// Movement state of the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Still,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Uniform pick among the four diagonals (never `Still`)
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::DIAGONALS[rng.random_range(0..Self::DIAGONALS.len())]
    }

    /// Mirror the vertical component: NE <-> SE, NW <-> SW
    pub fn flipped_vertical(self) -> Self {
        match self {
            Direction::NorthEast => Direction::SouthEast,
            Direction::NorthWest => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthEast,
            Direction::SouthWest => Direction::NorthWest,
            Direction::Still => Direction::Still,
        }
    }

    /// Mirror the horizontal component: NE <-> NW, SE <-> SW
    pub fn flipped_horizontal(self) -> Self {
        match self {
            Direction::NorthEast => Direction::NorthWest,
            Direction::NorthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::SouthEast,
            Direction::Still => Direction::Still,
        }
    }

    /// Unit step in screen space (north is -y)
    pub fn step(self) -> IVec2 {
        match self {
            Direction::Still => IVec2::ZERO,
            Direction::NorthEast => IVec2::new(1, -1),
            Direction::NorthWest => IVec2::new(-1, -1),
            Direction::SouthEast => IVec2::new(1, 1),
            Direction::SouthWest => IVec2::new(-1, 1),
        }
    }

    #[inline]
    pub fn is_still(self) -> bool {
        self == Direction::Still
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    body: Body,
    direction: Direction,
    paddles: Vec<BodyId>,
    obstacles: Vec<BodyId>,
    goals: Vec<BodyId>,
    /// Goal the ball scored in, waiting for the game to consume it
    point: Option<BodyId>,
}

impl Ball {
    pub fn new(size: i32, speed: i32) -> Self {
        Self {
            body: Body::new(size, size).with_speed(speed),
            direction: Direction::Still,
            paddles: Vec::new(),
            obstacles: Vec::new(),
            goals: Vec::new(),
            point: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.body.color = color;
        self
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    #[inline]
    pub fn position(&self) -> IVec2 {
        self.body.position()
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn speed(&self) -> i32 {
        self.body.speed()
    }

    /// Registers a paddle for collision checks
    pub fn add_paddle(&mut self, paddle: BodyId) {
        self.paddles.push(paddle);
    }

    /// Registers an obstacle for collision checks
    pub fn add_obstacle(&mut self, obstacle: BodyId) {
        self.obstacles.push(obstacle);
    }

    /// Registers a goal for score checks
    pub fn add_goal(&mut self, goal: BodyId) {
        self.goals.push(goal);
    }

    /// Pick a random diagonal direction
    pub fn randomize_direction<R: Rng>(&mut self, rng: &mut R) {
        self.set_direction(Direction::random(rng));
    }

    /// Start moving in a random diagonal, only if currently still
    pub fn kick_off<R: Rng>(&mut self, rng: &mut R) {
        if self.direction.is_still() {
            self.randomize_direction(rng);
        }
    }

    pub fn flip_vertical(&mut self) {
        self.direction = self.direction.flipped_vertical();
    }

    pub fn flip_horizontal(&mut self) {
        self.direction = self.direction.flipped_horizontal();
    }

    /// Stop the ball at (x, y)
    pub fn place(&mut self, x: i32, y: i32) {
        self.body.transform.position = IVec2::new(x, y);
        self.set_direction(Direction::Still);
    }

    #[inline]
    pub fn has_point(&self) -> bool {
        self.point.is_some()
    }

    /// Goal scored in, without clearing it
    #[inline]
    pub fn peek_point(&self) -> Option<BodyId> {
        self.point
    }

    /// Goal scored in, if any; cleared on read
    pub fn consume_point(&mut self) -> Option<BodyId> {
        self.point.take()
    }

    /// Advance one frame
    ///
    /// A pending point freezes the ball until it's consumed.
    pub fn update(&mut self, bodies: &Bodies, sfx: &mut dyn SoundSink) {
        if self.point.is_some() {
            return;
        }

        let offset = self.direction.step() * self.body.speed();
        self.move_by(offset, bodies, sfx);
    }

    /// Move by `offset`, then run goal/obstacle/paddle checks
    pub fn move_by(&mut self, offset: IVec2, bodies: &Bodies, sfx: &mut dyn SoundSink) {
        self.body.move_by(offset);
        self.post_move(bodies, sfx);
    }

    fn post_move(&mut self, bodies: &Bodies, sfx: &mut dyn SoundSink) {
        let current = self.body.rect();

        if let Some(&goal) = self
            .goals
            .iter()
            .find(|&&id| current.intersects(&bodies.get(id).rect()))
        {
            self.set_direction(Direction::Still);
            self.point = Some(goal);
            sfx.play(SoundEffect::GoalTrigger);
            return;
        }

        if let Some(obstacle) = first_hit(&self.obstacles, &current, bodies) {
            self.flip_vertical();
            self.resolve(&current, &obstacle, Axis::Y);
            sfx.play(SoundEffect::ObstacleHit);
        }

        // Checked against the pre-resolution rect, same as obstacles
        if let Some(paddle) = first_hit(&self.paddles, &current, bodies) {
            self.flip_horizontal();
            self.resolve(&current, &paddle, Axis::X);
            sfx.play(SoundEffect::PaddleHit);
        }
    }

    /// Push the ball out of `other`, bypassing the move hook
    fn resolve(&mut self, current: &Rect, other: &Rect, axis: Axis) {
        let shift = resolve_overlap(current, other, axis);
        self.body.transform.translate(shift);
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.body.render(canvas);
    }
}

/// Rectangle of the first body in `ids` overlapping `rect`
fn first_hit(ids: &[BodyId], rect: &Rect, bodies: &Bodies) -> Option<Rect> {
    ids.iter()
        .map(|&id| bodies.get(id).rect())
        .find(|other| rect.intersects(other))
}
