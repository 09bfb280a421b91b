//! Game composition: field layout, update order, scoring
//!
//! `PongGame` owns every body. Borders, goals, paddles and the center line live
//! in a [`Bodies`] arena; the ball only holds handles into it. One call to
//! [`PongGame::update`] is one frame: paddles first, then the ball, then the
//! score check.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Direction};
use super::body::{Bodies, Body, BodyId, BodyKind};
use super::geometry::Rect;
use super::input::{InputState, KICK_OFF_KEY, Key, PaddleControls};
use super::splash::SplashScreen;
use crate::audio::SoundSink;
use crate::consts::*;
use crate::render::{Canvas, Color, TextSpec};
use crate::settings::Settings;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Left paddle, defends the left goal
    One,
    /// Right paddle, defends the right goal
    Two,
}

impl Player {
    #[inline]
    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Points per player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub one: u32,
    pub two: u32,
}

impl Score {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    fn award(&mut self, player: Player) {
        match player {
            Player::One => self.one += 1,
            Player::Two => self.two += 1,
        }
    }

    /// Player who has reached `target`, if any
    pub fn leader_at(&self, target: u32) -> Option<Player> {
        if self.one >= target {
            Some(Player::One)
        } else if self.two >= target {
            Some(Player::Two)
        } else {
            None
        }
    }
}

/// Complete game
pub struct PongGame {
    viewport: Rect,
    bodies: Bodies,
    top_border: BodyId,
    bottom_border: BodyId,
    center_line: BodyId,
    /// Indexed by the player defending the goal
    goals: [BodyId; 2],
    /// Indexed by the player owning the paddle
    paddles: [BodyId; 2],
    controls: [PaddleControls; 2],
    ball: Ball,
    score: Score,
    splash: Option<SplashScreen>,
    show_goals: bool,
    rng: Pcg32,
    frame: u64,
}

impl PongGame {
    /// Lay out the field for the configured viewport
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let w = settings.viewport_width;
        let h = settings.viewport_height;
        let mut bodies = Bodies::new();

        // Field
        let top_border = bodies.insert(
            Body::new(w, BORDERS_SIZE).placed(IVec2::new(w / 2, 0), Vec2::new(0.5, 0.0)),
        );
        let bottom_border = bodies.insert(
            Body::new(w, BORDERS_SIZE).placed(IVec2::new(w / 2, h), Vec2::new(0.5, 1.0)),
        );
        let center_line = bodies.insert(
            Body::new(CENTERLINE_SIZE, h)
                .placed(IVec2::new(w / 2, h / 2), Vec2::splat(0.5))
                .with_color(Color::GRAY),
        );

        // Gameplay
        let goal_p1 = bodies.insert(
            Body::new(GOALS_SIZE, h)
                .placed(IVec2::new(0, h / 2), Vec2::new(0.0, 0.5))
                .with_color(Color::GREEN),
        );
        let goal_p2 = bodies.insert(
            Body::new(GOALS_SIZE, h)
                .placed(IVec2::new(w, h / 2), Vec2::new(1.0, 0.5))
                .with_color(Color::GREEN),
        );

        let limits = BodyKind::Paddle {
            upper: PADDLE_LIMIT_MARGIN + BORDERS_SIZE,
            lower: h - PADDLE_LIMIT_MARGIN - BORDERS_SIZE,
        };
        let pad_p1 = bodies.insert(
            Body::new(BALL_SIZE, PADDLES_SIZE)
                .with_speed(settings.paddle_speed)
                .with_kind(limits)
                .placed(IVec2::new(PADDLES_BORDER_OFFSET, h / 2), Vec2::splat(0.5)),
        );
        let pad_p2 = bodies.insert(
            Body::new(BALL_SIZE, PADDLES_SIZE)
                .with_speed(settings.paddle_speed)
                .with_kind(limits)
                .placed(IVec2::new(w - PADDLES_BORDER_OFFSET, h / 2), Vec2::splat(0.5)),
        );

        let mut ball = Ball::new(BALL_SIZE, settings.ball_speed).with_color(BALL_COLOR);
        ball.add_goal(goal_p1);
        ball.add_goal(goal_p2);
        ball.add_paddle(pad_p1);
        ball.add_paddle(pad_p2);
        ball.add_obstacle(top_border);
        ball.add_obstacle(bottom_border);

        let splash = (settings.splash_ms > 0).then(|| SplashScreen::new(settings.splash_ms));

        let mut game = Self {
            viewport: Rect::new(0, 0, w, h),
            bodies,
            top_border,
            bottom_border,
            center_line,
            goals: [goal_p1, goal_p2],
            paddles: [pad_p1, pad_p2],
            controls: [PaddleControls::PLAYER_ONE, PaddleControls::PLAYER_TWO],
            ball,
            score: Score::default(),
            splash,
            show_goals: settings.show_goals,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
        };
        game.place_ball_to_center();

        log::info!("Field {}x{} ready (seed {})", w, h, seed);
        game
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn bodies(&self) -> &Bodies {
        &self.bodies
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn paddle(&self, player: Player) -> &Body {
        self.bodies.get(self.paddles[player.index()])
    }

    /// Goal defended by `player`
    pub fn goal(&self, player: Player) -> BodyId {
        self.goals[player.index()]
    }

    pub fn splash_active(&self) -> bool {
        self.splash.as_ref().is_some_and(SplashScreen::is_active)
    }

    /// Advance one frame; returns the player who scored, if any
    pub fn update(
        &mut self,
        input: &InputState,
        dt_ms: u64,
        sfx: &mut dyn SoundSink,
    ) -> Option<Player> {
        self.frame += 1;

        if let Some(splash) = self.splash.as_mut() {
            if splash.is_active() {
                splash.update(input, dt_ms);
                return None;
            }
            self.splash = None;
            log::debug!("Splash finished at frame {}", self.frame);
        }

        // Held key re-triggers every frame; kick_off ignores a moving ball
        if input.is_down(KICK_OFF_KEY) {
            self.ball.kick_off(&mut self.rng);
        }

        for (id, controls) in self.paddles.iter().zip(self.controls.iter()) {
            let (up, down) = controls.read(input);
            self.bodies.get_mut(*id).steer(up, down);
        }
        self.ball.update(&self.bodies, sfx);

        let goal = self.ball.consume_point()?;
        let defender = if goal == self.goal(Player::One) {
            Player::One
        } else {
            Player::Two
        };
        let scorer = defender.opponent();
        self.score.award(scorer);
        log::info!(
            "{:?} scores: {} - {}",
            scorer,
            self.score.one,
            self.score.two
        );

        self.place_ball_to_center();
        Some(scorer)
    }

    /// Draw the splash while it's up, the field otherwise
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::BACKGROUND);

        if self.splash_active() {
            let rect = SplashScreen::target_rect(self.viewport, SPLASH_IMAGE_SIZE);
            canvas.fill_rect(rect, Color::WHITE);
            return;
        }

        if self.show_goals {
            for id in self.goals {
                self.bodies.get(id).render(canvas);
            }
        }
        self.bodies.get(self.center_line).render(canvas);
        for label in self.score_labels() {
            canvas.draw_text(&label);
        }
        // Ball behind paddles, borders above everything
        self.ball.render(canvas);
        for id in self.paddles {
            self.bodies.get(id).render(canvas);
        }
        self.bodies.get(self.top_border).render(canvas);
        self.bodies.get(self.bottom_border).render(canvas);
    }

    /// Both scores, right-aligned and left-aligned against the center line
    fn score_labels(&self) -> [TextSpec; 2] {
        let center = self.viewport.w / 2;
        let label = |score: u32, x: i32, pivot: Vec2| TextSpec {
            text: score.to_string(),
            anchor: IVec2::new(x, SCORE_TOP),
            pivot,
            size: SCORE_FONT_SIZE,
            color: Color::GRAY,
        };
        [
            label(self.score.one, center - BORDERS_SIZE, Vec2::new(1.0, 0.0)),
            label(self.score.two, center + BORDERS_SIZE, Vec2::ZERO),
        ]
    }

    /// Input a simple autopilot would give this frame
    ///
    /// Serves whenever the ball is still and steers each paddle toward the
    /// ball while it's heading that way.
    pub fn demo_input(&self) -> InputState {
        let mut input = InputState::new();
        if self.splash_active() {
            return input;
        }

        let direction = self.ball.direction();
        if direction.is_still() {
            input.press(KICK_OFF_KEY);
        }

        let ball_y = self.ball.position().y;
        let heading_x = direction.step().x;
        for player in [Player::One, Player::Two] {
            let incoming = match player {
                Player::One => heading_x < 0,
                Player::Two => heading_x > 0,
            };
            if !incoming {
                continue;
            }

            let paddle = self.paddle(player);
            let controls = self.controls[player.index()];
            let dy = ball_y - paddle.position().y;
            if dy < -paddle.speed() {
                input.press(controls.up);
            } else if dy > paddle.speed() {
                input.press(controls.down);
            }
        }

        input
    }

    /// Whether the loop should stop on its own (quit key or winning score)
    ///
    /// Escape quits at any time, splash included.
    pub fn wants_close(&self, input: &InputState, winning_score: Option<u32>) -> bool {
        if input.is_down(Key::Escape) {
            return true;
        }
        winning_score.is_some_and(|target| self.score.leader_at(target).is_some())
    }

    fn place_ball_to_center(&mut self) {
        self.ball.place(self.viewport.w / 2, self.viewport.h / 2);
        debug_assert_eq!(self.ball.direction(), Direction::Still);
    }
}
