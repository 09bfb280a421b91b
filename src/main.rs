//! Rect Pong entry point
//!
//! Headless native runner: loads settings, then drives the fixed-rate loop
//! (input, update, render, pacing) with the built-in autopilot at the controls.
//! Usage: `rect-pong [settings.json]`

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rect_pong::audio::{AudioBackend, AudioManager, LogBackend};
use rect_pong::render::DrawList;
use rect_pong::settings::Settings;
use rect_pong::sim::PongGame;

/// Game instance holding all loop state
struct Runner {
    game: PongGame,
    audio: AudioManager,
    canvas: DrawList,
    settings: Settings,
}

impl Runner {
    fn new(settings: Settings, backend: Box<dyn AudioBackend>) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);

        let mut audio = AudioManager::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);

        Self {
            game: PongGame::new(&settings, seed),
            audio,
            canvas: DrawList::new(),
            settings,
        }
    }

    /// Run frames until a close signal; returns frames run
    fn run(&mut self) -> u64 {
        let frame_duration = self.settings.frame_duration();
        let dt_ms = frame_duration.as_millis() as u64;

        self.audio.start_music();

        loop {
            let frame_start = Instant::now();

            let input = self.game.demo_input();
            if self.should_close(&input) {
                break;
            }

            self.game.update(&input, dt_ms, &mut self.audio);
            self.game.render(&mut self.canvas);
            log::trace!(
                "frame {}: {} draw calls",
                self.game.frame(),
                self.canvas.len()
            );

            // Pace to the fixed frame time
            let elapsed = frame_start.elapsed();
            if let Some(remaining) = frame_duration.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }

        // Let the fade-out finish before the process exits
        let fade_ms = self.audio.stop_music();
        std::thread::sleep(Duration::from_millis(fade_ms));

        self.game.frame()
    }

    fn should_close(&self, input: &rect_pong::sim::InputState) -> bool {
        if let Some(max) = self.settings.max_frames {
            if self.game.frame() >= max {
                return true;
            }
        }
        self.game.wants_close(input, self.settings.winning_score)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Rect Pong starting...");

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path),
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    if settings.max_frames.is_none() && settings.winning_score.is_none() {
        log::warn!("No frame limit or winning score set - running until killed");
    }

    let mut runner = Runner::new(settings, Box::new(LogBackend));
    let frames = runner.run();

    let score = runner.game.score();
    log::info!(
        "Stopped after {} frames, final score {} - {}",
        frames,
        score.one,
        score.two
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rect_pong::audio::{AudioError, MUSIC_FADE_OUT_MS, MUSIC_TRACK};
    use rect_pong::SoundEffect;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Backend that logs music calls by name
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl AudioBackend for Recorder {
        fn play(&mut self, _: SoundEffect, _: u8, _: f32) -> Result<(), AudioError> {
            Ok(())
        }

        fn start_music(&mut self, track: &'static str, _: f32, _: u64) -> Result<(), AudioError> {
            self.0.borrow_mut().push(format!("start {}", track));
            Ok(())
        }

        fn fade_out_music(&mut self, fade_out_ms: u64) -> Result<(), AudioError> {
            self.0.borrow_mut().push(format!("fade {}", fade_out_ms));
            Ok(())
        }
    }

    fn headless(settings: Settings) -> (Runner, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let runner = Runner::new(settings, Box::new(Recorder(log.clone())));
        (runner, log)
    }

    #[test]
    fn test_music_spans_the_run() {
        let (mut runner, log) = headless(Settings {
            target_fps: 1000,
            splash_ms: 0,
            max_frames: Some(3),
            seed: Some(1),
            ..Default::default()
        });

        assert_eq!(runner.run(), 3);
        assert_eq!(
            *log.borrow(),
            vec![
                format!("start {}", MUSIC_TRACK),
                format!("fade {}", MUSIC_FADE_OUT_MS),
            ]
        );
        assert!(!runner.audio.is_music_playing());
    }

    #[test]
    fn test_fast_loop_gets_past_splash() {
        let (mut runner, _) = headless(Settings {
            target_fps: 2000,
            splash_ms: 50,
            max_frames: Some(200),
            seed: Some(1),
            ..Default::default()
        });

        runner.run();
        assert!(!runner.game.splash_active());
    }
}
