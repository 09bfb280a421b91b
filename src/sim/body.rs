//! Movable rectangular bodies
//!
//! Every position change made through [`Body::move_by`] is followed by the
//! post-move hook for the body's kind. The hook is a plain `match` on
//! [`BodyKind`]; the ball has its own hook and lives in [`super::ball`].

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Transform};
use crate::render::{Canvas, Color};

/// Post-move behavior of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// No post-move logic (borders, goals, center line)
    #[default]
    Plain,
    /// Vertical travel clamped so the rectangle stays inside [upper, lower]
    Paddle { upper: i32, lower: i32 },
}

/// A rectangle with a place in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub transform: Transform,
    size: IVec2,
    speed: i32,
    pub color: Color,
    kind: BodyKind,
}

impl Body {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            transform: Transform::default(),
            size: IVec2::new(width, height),
            speed: 0,
            color: Color::WHITE,
            kind: BodyKind::Plain,
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Place at `position` using the given pivot
    pub fn placed(mut self, position: IVec2, pivot: Vec2) -> Self {
        self.transform.position = position;
        self.transform.pivot = pivot;
        self
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.size
    }

    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed
    }

    #[inline]
    pub fn position(&self) -> IVec2 {
        self.transform.position
    }

    /// Current rectangle, always derived from the live transform
    #[inline]
    pub fn rect(&self) -> Rect {
        self.transform.rect(self.size)
    }

    /// Move by `offset`, then run the post-move hook
    pub fn move_by(&mut self, offset: IVec2) {
        self.transform.translate(offset);
        self.post_move();
    }

    /// Paddle step for one frame: up wins over down, neither means stay
    pub fn steer(&mut self, up: bool, down: bool) {
        let dy = if up {
            -self.speed
        } else if down {
            self.speed
        } else {
            0
        };
        self.move_by(IVec2::new(0, dy));
    }

    fn post_move(&mut self) {
        match self.kind {
            BodyKind::Plain => {}
            BodyKind::Paddle { upper, lower } => {
                let offset_up = (self.size.y as f32 * self.transform.pivot.y) as i32;
                let offset_down = (self.size.y as f32 * (1.0 - self.transform.pivot.y)) as i32;

                let y = &mut self.transform.position.y;
                if *y < upper + offset_up {
                    *y = upper + offset_up;
                } else if *y > lower - offset_down {
                    *y = lower - offset_down;
                }
            }
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect(), self.color);
    }
}

/// Handle to a body stored in [`Bodies`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena owning every static or player-driven body in the scene
///
/// Bodies are only ever appended, so a handle stays valid for the arena's
/// whole life.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bodies {
    bodies: Vec<Body>,
}

impl Bodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(body);
        id
    }

    /// # Panics
    /// If `id` came from a different arena.
    pub fn get(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }

    /// # Panics
    /// If `id` came from a different arena.
    pub fn get_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.index()]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyId(i as u32), body))
    }
}
