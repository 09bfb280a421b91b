//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Integer positions, fixed per-frame speeds
//! - Seeded RNG only
//! - Fixed update order (paddles, then ball)
//! - No rendering or platform dependencies beyond the `Canvas`/`SoundSink` seams

pub mod ball;
pub mod body;
pub mod collision;
pub mod game;
pub mod geometry;
pub mod input;
pub mod splash;

pub use ball::{Ball, Direction};
pub use body::{Bodies, Body, BodyId, BodyKind};
pub use collision::{Axis, overlap_shift, resolve_overlap};
pub use game::{Player, PongGame, Score};
pub use geometry::{Rect, Transform};
pub use input::{InputState, Key, PaddleControls};
pub use splash::SplashScreen;
