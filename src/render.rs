//! Rendering seam
//!
//! The game never talks to a window or GPU directly. Everything it draws is a
//! filled rectangle or a line of text pushed through [`Canvas`]; a platform
//! layer turns those into pixels and owns the fonts. [`DrawList`] records the commands instead, which is what the
//! headless runner and the tests use.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// Background the frame is cleared to
    pub const BACKGROUND: Color = Color::rgb(10, 10, 10);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Text placement: `anchor` is where the `pivot` point of the text's box lands
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub text: String,
    pub anchor: IVec2,
    pub pivot: Vec2,
    /// Font size in points
    pub size: u8,
    pub color: Color,
}

/// A render target that can fill rectangles and draw text
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &TextSpec);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    Text(TextSpec),
}

/// Canvas that records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Rectangles filled so far, in draw order
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRect(rect, color) => Some((*rect, *color)),
            _ => None,
        })
    }

    /// Text drawn so far, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &TextSpec> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn clear(&mut self, color: Color) {
        // Anything drawn before a clear is gone anyway
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn draw_text(&mut self, text: &TextSpec) {
        self.commands.push(DrawCommand::Text(text.clone()));
    }
}
