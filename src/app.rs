use ggez::audio::{self, SoundSource};
use ggez::event::EventHandler;
use ggez::graphics::{Canvas, Color, DrawMode, DrawParam, Mesh, Rect, Text};
use ggez::input::keyboard::KeyInput;
use ggez::input::mouse::MouseButton;
use ggez::mint::Point2;
use ggez::{Context, GameError, GameResult};
use log::{info, warn};

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::controller::{Cue, GameController, GameState};
use crate::input::{FrameInput, Key};
use crate::leaderboard::LeaderboardStore;
use crate::render::{self, Renderer, BACKGROUND_COLOR};

/// [`Renderer`] drawing into a ggez frame canvas.
pub struct CanvasRenderer<'a> {
    ctx: &'a mut Context,
    canvas: Canvas,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(ctx: &'a mut Context) -> Self {
        let canvas = Canvas::from_frame(&*ctx, BACKGROUND_COLOR);
        CanvasRenderer { ctx, canvas }
    }

    /// Presents the frame.
    pub fn finish(self) -> GameResult {
        self.canvas.finish(self.ctx)
    }
}

impl Renderer for CanvasRenderer<'_> {
    type Error = GameError;

    fn clear(&mut self, color: Color) -> GameResult {
        let screen = Rect::new(0.0, 0.0, WINDOW_WIDTH, WINDOW_HEIGHT);
        self.draw_rect(screen, color, true)
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool) -> GameResult {
        let mode = if filled {
            DrawMode::fill()
        } else {
            DrawMode::stroke(2.0)
        };
        let mesh = Mesh::new_rectangle(&*self.ctx, mode, rect, color)?;
        self.canvas.draw(&mesh, DrawParam::default());
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Point2<f32>,
        scale: f32,
        color: Color,
    ) -> GameResult {
        let mut text = Text::new(text);
        text.set_scale(scale);
        self.canvas
            .draw(&text, DrawParam::default().dest(position).color(color));
        Ok(())
    }
}

/// Window glue: turns ggez events into [`FrameInput`] snapshots, ticks the
/// controller once per frame and plays its sound cues.
pub struct SnakeApp<S: LeaderboardStore> {
    controller: GameController<S>,
    input: FrameInput,
    eat_sound: Option<audio::Source>,
    game_over_sound: Option<audio::Source>,
}

fn load_sound(ctx: &mut Context, path: &str) -> Option<audio::Source> {
    match audio::Source::new(ctx, path) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("sound {} unavailable: {}", path, e);
            None
        }
    }
}

impl<S: LeaderboardStore> SnakeApp<S> {
    pub fn new(ctx: &mut Context, controller: GameController<S>) -> Self {
        SnakeApp {
            controller,
            input: FrameInput::new(),
            eat_sound: load_sound(ctx, "/eat.wav"),
            game_over_sound: load_sound(ctx, "/game_over.wav"),
        }
    }

    fn play_cue(&mut self, ctx: &mut Context, cue: Cue) {
        if !self.controller.sound_enabled() {
            return;
        }
        let source = match cue {
            Cue::Eat | Cue::LevelUp => self.eat_sound.as_mut(),
            Cue::GameOver => self.game_over_sound.as_mut(),
            Cue::Win => None,
        };
        if let Some(source) = source {
            if let Err(e) = source.play_detached(ctx) {
                warn!("failed to play sound: {}", e);
            }
        }
    }
}

impl<S: LeaderboardStore> EventHandler for SnakeApp<S> {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let now = ctx.time.time_since_start();
        let cue = self.controller.tick(&self.input, now);
        self.input.end_frame();

        if let Some(cue) = cue {
            self.play_cue(ctx, cue);
        }
        if self.controller.state() == GameState::Exit {
            ctx.request_quit();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut renderer = CanvasRenderer::new(ctx);
        render::draw_frame(&self.controller, &mut renderer)?;
        renderer.finish()
    }

    fn key_down_event(
        &mut self,
        _ctx: &mut Context,
        input: KeyInput,
        repeated: bool,
    ) -> GameResult {
        if let Some(key) = input.keycode.and_then(Key::from_keycode) {
            self.input.key_down(key, repeated);
        }
        Ok(())
    }

    fn key_up_event(&mut self, _ctx: &mut Context, input: KeyInput) -> GameResult {
        if let Some(key) = input.keycode.and_then(Key::from_keycode) {
            self.input.key_up(key);
        }
        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> GameResult {
        if button == MouseButton::Left {
            self.input.mouse_left_down(x, y);
        }
        Ok(())
    }

    fn mouse_motion_event(
        &mut self,
        _ctx: &mut Context,
        x: f32,
        y: f32,
        _dx: f32,
        _dy: f32,
    ) -> GameResult {
        self.input.mouse_moved(x, y);
        Ok(())
    }

    fn quit_event(&mut self, _ctx: &mut Context) -> Result<bool, GameError> {
        info!("shutting down");
        self.controller.shutdown();
        Ok(false)
    }
}
