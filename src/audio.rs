//! Sound effect triggers and background music
//!
//! The simulation only ever says "play this effect"; it never waits on audio and
//! never learns whether playback worked. A missing device or asset is a soft
//! failure: logged, then ignored. Music is started and faded out by the loop,
//! not the simulation.

use std::fmt;

/// Looping background track
pub const MUSIC_TRACK: &str = "GameLoop_01";
/// Music fade-in (ms), shorter in debug builds
pub const MUSIC_FADE_IN_MS: u64 = if cfg!(debug_assertions) { 1000 } else { 2500 };
/// Music fade-out on close (ms)
pub const MUSIC_FADE_OUT_MS: u64 = 500;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball bounces off a top/bottom border
    ObstacleHit,
    /// Ball bounces off a paddle
    PaddleHit,
    /// Ball enters a goal
    GoalTrigger,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::ObstacleHit,
        SoundEffect::PaddleHit,
        SoundEffect::GoalTrigger,
    ];

    /// Asset name (without extension) the platform layer resolves
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::ObstacleHit => "HitObstacle",
            SoundEffect::PaddleHit => "HitPaddle",
            SoundEffect::GoalTrigger => "TriggerGoal",
        }
    }

    /// Mixer channel, so one effect type never cuts off another
    pub fn channel(&self) -> u8 {
        match self {
            SoundEffect::ObstacleHit => 0,
            SoundEffect::PaddleHit => 1,
            SoundEffect::GoalTrigger => 2,
        }
    }
}

/// Fire-and-forget sound trigger
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Records effects instead of playing them
impl SoundSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Why a backend couldn't play an effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No audio device could be opened
    NoDevice,
    /// The effect's or track's asset was never loaded
    MissingAsset(&'static str),
    /// Backend-specific failure
    Backend(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoDevice => write!(f, "no audio device"),
            AudioError::MissingAsset(name) => write!(f, "sound asset '{}' not loaded", name),
            AudioError::Backend(msg) => write!(f, "audio backend error: {}", msg),
        }
    }
}

impl std::error::Error for AudioError {}

/// Something that can actually produce sound
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, channel: u8, volume: f32) -> Result<(), AudioError>;

    /// Start `track` looping forever, fading in over `fade_in_ms`
    fn start_music(
        &mut self,
        track: &'static str,
        volume: f32,
        fade_in_ms: u64,
    ) -> Result<(), AudioError>;

    /// Fade the current track out over `fade_out_ms`, then stop it
    fn fade_out_music(&mut self, fade_out_ms: u64) -> Result<(), AudioError>;
}

/// Backend for headless runs: logs each trigger
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, channel: u8, volume: f32) -> Result<(), AudioError> {
        log::trace!(
            "sfx {} on channel {} at volume {:.2}",
            effect.asset_name(),
            channel,
            volume
        );
        Ok(())
    }

    fn start_music(
        &mut self,
        track: &'static str,
        volume: f32,
        fade_in_ms: u64,
    ) -> Result<(), AudioError> {
        log::debug!(
            "music {} looping at volume {:.2}, {}ms fade-in",
            track,
            volume,
            fade_in_ms
        );
        Ok(())
    }

    fn fade_out_music(&mut self, fade_out_ms: u64) -> Result<(), AudioError> {
        log::debug!("music fading out over {}ms", fade_out_ms);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::disabled()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    /// Manager with no device; every trigger is dropped
    pub fn disabled() -> Self {
        log::warn!("No audio backend - audio disabled");
        Self {
            backend: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Get effective music volume
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Start the background loop with its fade-in
    pub fn start_music(&mut self) {
        let vol = self.effective_music_volume();
        let Some(backend) = self.backend.as_mut() else { return };

        match backend.start_music(MUSIC_TRACK, vol, MUSIC_FADE_IN_MS) {
            Ok(()) => self.music_playing = true,
            Err(e) => log::warn!("Couldn't start music {}: {}", MUSIC_TRACK, e),
        }
    }

    /// Fade the background loop out; returns how long the fade takes
    ///
    /// Zero when nothing was playing.
    pub fn stop_music(&mut self) -> u64 {
        if !self.music_playing {
            return 0;
        }
        self.music_playing = false;

        let Some(backend) = self.backend.as_mut() else { return 0 };

        match backend.fade_out_music(MUSIC_FADE_OUT_MS) {
            Ok(()) => MUSIC_FADE_OUT_MS,
            Err(e) => {
                log::debug!("Couldn't fade out music: {}", e);
                0
            }
        }
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = self.backend.as_mut() else { return };

        if let Err(e) = backend.play(effect, effect.channel(), vol) {
            log::debug!("Couldn't play {}: {}", effect.asset_name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum MusicCall {
        Start(&'static str, f32, u64),
        FadeOut(u64),
    }

    /// Backend that records calls and optionally fails
    struct Probe {
        calls: Rc<RefCell<Vec<(SoundEffect, u8, f32)>>>,
        music: Rc<RefCell<Vec<MusicCall>>>,
        fail: bool,
    }

    impl Probe {
        fn result(&self, name: &'static str) -> Result<(), AudioError> {
            if self.fail {
                Err(AudioError::MissingAsset(name))
            } else {
                Ok(())
            }
        }
    }

    impl AudioBackend for Probe {
        fn play(&mut self, effect: SoundEffect, channel: u8, volume: f32) -> Result<(), AudioError> {
            self.calls.borrow_mut().push((effect, channel, volume));
            self.result(effect.asset_name())
        }

        fn start_music(
            &mut self,
            track: &'static str,
            volume: f32,
            fade_in_ms: u64,
        ) -> Result<(), AudioError> {
            self.music
                .borrow_mut()
                .push(MusicCall::Start(track, volume, fade_in_ms));
            self.result(track)
        }

        fn fade_out_music(&mut self, fade_out_ms: u64) -> Result<(), AudioError> {
            self.music.borrow_mut().push(MusicCall::FadeOut(fade_out_ms));
            self.result(MUSIC_TRACK)
        }
    }

    type Calls = Rc<RefCell<Vec<(SoundEffect, u8, f32)>>>;
    type MusicCalls = Rc<RefCell<Vec<MusicCall>>>;

    fn probe_with_music(fail: bool) -> (AudioManager, Calls, MusicCalls) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let music = Rc::new(RefCell::new(Vec::new()));
        let manager = AudioManager::new(Box::new(Probe {
            calls: calls.clone(),
            music: music.clone(),
            fail,
        }));
        (manager, calls, music)
    }

    fn probe(fail: bool) -> (AudioManager, Calls) {
        let (manager, calls, _) = probe_with_music(fail);
        (manager, calls)
    }

    #[test]
    fn test_play_routes_channel_and_volume() {
        let (mut audio, calls) = probe(false);
        audio.set_master_volume(0.5);
        audio.play(SoundEffect::PaddleHit);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, SoundEffect::PaddleHit);
        assert_eq!(calls[0].1, 1);
        assert!((calls[0].2 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_muted_skips_backend() {
        let (mut audio, calls) = probe(false);
        audio.set_muted(true);
        audio.play(SoundEffect::GoalTrigger);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let (mut audio, calls) = probe(true);
        for effect in SoundEffect::ALL {
            audio.play(effect);
        }
        assert_eq!(calls.borrow().len(), 3);
    }

    #[test]
    fn test_disabled_manager_is_silent() {
        let mut audio = AudioManager::disabled();
        assert!(!audio.is_enabled());
        audio.play(SoundEffect::ObstacleHit);
        audio.start_music();
        assert!(!audio.is_music_playing());
        assert_eq!(audio.stop_music(), 0);
    }

    #[test]
    fn test_music_fades_in_and_out() {
        let (mut audio, _, music) = probe_with_music(false);
        audio.set_master_volume(0.5);
        audio.set_music_volume(0.5);

        audio.start_music();
        assert!(audio.is_music_playing());
        assert_eq!(audio.stop_music(), MUSIC_FADE_OUT_MS);
        assert!(!audio.is_music_playing());
        // Second stop has nothing to fade
        assert_eq!(audio.stop_music(), 0);

        assert_eq!(
            *music.borrow(),
            vec![
                MusicCall::Start("GameLoop_01", 0.25, MUSIC_FADE_IN_MS),
                MusicCall::FadeOut(500),
            ]
        );
    }

    #[test]
    fn test_music_failure_is_swallowed() {
        let (mut audio, _, music) = probe_with_music(true);
        audio.start_music();
        assert!(!audio.is_music_playing());
        assert_eq!(audio.stop_music(), 0);
        assert_eq!(music.borrow().len(), 1);
    }

    #[test]
    fn test_volume_clamped() {
        let (mut audio, _) = probe(false);
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_sfx_volume(1.0);
        assert_eq!(audio.effective_volume(), 1.0);
    }

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<SoundEffect> = Vec::new();
        sink.play(SoundEffect::ObstacleHit);
        sink.play(SoundEffect::PaddleHit);
        assert_eq!(sink, vec![SoundEffect::ObstacleHit, SoundEffect::PaddleHit]);
        assert_eq!(SoundEffect::GoalTrigger.asset_name(), "TriggerGoal");
    }
}
