//! Timed splash screen shown before play starts

use super::geometry::Rect;
use super::input::{InputState, Key};

/// Default splash duration in milliseconds (shorter in debug builds)
pub const DEFAULT_SPLASH_MS: u64 = if cfg!(debug_assertions) { 1000 } else { 2500 };

/// Fraction of the viewport height the splash image fills
const SPLASH_VERTICAL_FILL: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct SplashScreen {
    duration_ms: u64,
    elapsed_ms: u64,
    skip: bool,
}

impl SplashScreen {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
            skip: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.skip && self.elapsed_ms <= self.duration_ms
    }

    /// Advance the timer; Space or Escape skips the rest
    pub fn update(&mut self, input: &InputState, dt_ms: u64) {
        if self.skip {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);

        if input.is_down(Key::Space) || input.is_down(Key::Escape) {
            log::debug!("Splash skipped after {} ms", self.elapsed_ms);
            self.skip = true;
        }
    }

    /// Where an image of `image_size` (w, h) goes: full height, aspect kept, centered
    pub fn target_rect(viewport: Rect, image_size: (i32, i32)) -> Rect {
        let h = (viewport.h as f32 * SPLASH_VERTICAL_FILL) as i32;
        let w = if image_size.1 > 0 {
            (h as f32 * (image_size.0 as f32 / image_size.1 as f32)) as i32
        } else {
            0
        };
        Rect::new(viewport.w / 2 - w / 2, viewport.h / 2 - h / 2, w, h)
    }
}
