//! Rect Pong - classic two-paddle Pong
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, ball, collisions, scoring)
//! - `audio`: Fire-and-forget sound effects and background music
//! - `render`: Rectangle-filling canvas seam
//! - `settings`: JSON-backed configuration

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundEffect, SoundSink};
pub use render::{Canvas, Color, DrawList, TextSpec};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::render::Color;

    /// Fixed frame rate the loop aims for
    pub const TARGET_FPS: u32 = 60;

    /// Field layout metrics
    pub const BORDERS_SIZE: i32 = 10;
    pub const CENTERLINE_SIZE: i32 = 2;
    pub const GOALS_SIZE: i32 = 5;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 10;
    pub const BALL_SPEED: i32 = 8;
    pub const BALL_COLOR: Color = Color::rgb(200, 50, 50);

    /// Paddle defaults (width matches the ball)
    pub const PADDLES_SIZE: i32 = 100;
    pub const PADDLES_SPEED: i32 = 5;
    pub const PADDLES_GOAL_DISTANCE: i32 = 30;
    /// Paddle center distance from the side edges
    pub const PADDLES_BORDER_OFFSET: i32 = GOALS_SIZE + PADDLES_GOAL_DISTANCE + BALL_SIZE / 2;
    /// Gap kept between paddle travel and the borders
    pub const PADDLE_LIMIT_MARGIN: i32 = 5;

    /// Score labels, either side of the center line
    pub const SCORE_FONT_SIZE: u8 = 72;
    pub const SCORE_TOP: i32 = BORDERS_SIZE * 3;

    /// Splash art size (16:9 cover)
    pub const SPLASH_IMAGE_SIZE: (i32, i32) = (1920, 1080);
}
