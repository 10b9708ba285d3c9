use ggez::graphics::{Color, Rect};
use ggez::mint::Point2;

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::controller::GameController;
use crate::leaderboard::LeaderboardStore;
use crate::menu::{InputBox, Menu, RectButton};
use crate::snake::{MotionState, Position, SnakeSimulation};

pub const BACKGROUND_COLOR: Color = Color::new(0.1, 0.1, 0.15, 1.0);
pub const MENU_BACKGROUND_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
pub const BOARD_COLOR: Color = Color::new(0.94, 0.97, 1.0, 1.0);
pub const GRID_COLOR: Color = Color::new(0.88, 0.92, 0.96, 1.0);
pub const BODY_COLOR: Color = Color::new(0.2, 0.8, 0.2, 1.0);
pub const HEAD_COLOR: Color = Color::new(0.5, 0.0, 0.5, 1.0);
pub const APPLE_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const BUTTON_COLOR: Color = Color::WHITE;
pub const HIGHLIGHT_COLOR: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const DISABLED_COLOR: Color = Color::new(0.75, 0.75, 0.75, 1.0);
pub const INPUT_TEXT_COLOR: Color = Color::new(0.0, 0.5, 0.0, 1.0);
pub const CURSOR_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);

const BOARD_TOP: f32 = 60.0;
const HEADER_SCALE: f32 = 20.0;
const TITLE_SCALE: f32 = 28.0;
const LINE_SCALE: f32 = 18.0;
const BUTTON_SCALE: f32 = 18.0;
// rough advance of the default font, good enough for centering
const CHAR_WIDTH_RATIO: f32 = 0.5;

/// Drawing backend. The window adapter implements it on top of a ggez
/// canvas; tests implement it with a recorder.
pub trait Renderer {
    type Error;

    fn clear(&mut self, color: Color) -> Result<(), Self::Error>;
    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool) -> Result<(), Self::Error>;
    fn draw_text(
        &mut self,
        text: &str,
        position: Point2<f32>,
        scale: f32,
        color: Color,
    ) -> Result<(), Self::Error>;
}

fn text_width(text: &str, scale: f32) -> f32 {
    text.chars().count() as f32 * scale * CHAR_WIDTH_RATIO
}

fn centered(text: &str, scale: f32, y: f32) -> Point2<f32> {
    Point2 {
        x: (WINDOW_WIDTH - text_width(text, scale)) / 2.0,
        y,
    }
}

/// Draws whatever currently has the player's attention: the running game,
/// or the top menu only.
pub fn draw_frame<S, R>(controller: &GameController<S>, r: &mut R) -> Result<(), R::Error>
where
    S: LeaderboardStore,
    R: Renderer,
{
    if let Some(play) = controller.active_play() {
        draw_play(play.simulation(), r)
    } else if let Some(menu) = controller.top_menu() {
        draw_menu(menu, r)
    } else {
        r.clear(BACKGROUND_COLOR)
    }
}

/// Screen rectangle of a board cell. Board rows grow upward, the screen's
/// grow downward.
pub fn cell_rect(sim: &SnakeSimulation, pos: Position) -> Rect {
    let config = sim.config();
    let cell = config.cell_size as f32;
    let left = (WINDOW_WIDTH - config.board_width_px()) / 2.0;
    let row = (config.grid_height - 1 - pos.y) as f32;
    Rect::new(left + pos.x as f32 * cell, BOARD_TOP + row * cell, cell, cell)
}

pub fn draw_play<R: Renderer>(sim: &SnakeSimulation, r: &mut R) -> Result<(), R::Error> {
    let config = sim.config();
    r.clear(BACKGROUND_COLOR)?;

    let header = format!("Level {}   Score {}", sim.level(), sim.score());
    r.draw_text(&header, centered(&header, HEADER_SCALE, 20.0), HEADER_SCALE, Color::WHITE)?;

    let board = Rect::new(
        (WINDOW_WIDTH - config.board_width_px()) / 2.0,
        BOARD_TOP,
        config.board_width_px(),
        config.board_height_px(),
    );
    r.draw_rect(board, BOARD_COLOR, true)?;
    for x in 0..config.grid_width {
        for y in 0..config.grid_height {
            if (x + y) % 2 == 0 {
                r.draw_rect(cell_rect(sim, Position::new(x, y)), GRID_COLOR, true)?;
            }
        }
    }

    let body = sim.body();
    for (i, &pos) in body.iter().enumerate() {
        let color = if i + 1 == body.len() { HEAD_COLOR } else { BODY_COLOR };
        r.draw_rect(cell_rect(sim, pos), color, true)?;
    }
    r.draw_rect(cell_rect(sim, sim.apple()), APPLE_COLOR, true)?;

    if sim.motion_state() == MotionState::Idle {
        let hint = "Press an arrow key";
        let y = BOARD_TOP + config.board_height_px() + 10.0;
        let position = centered(hint, LINE_SCALE, y.min(WINDOW_HEIGHT - 24.0));
        r.draw_text(hint, position, LINE_SCALE, Color::WHITE)?;
    }
    Ok(())
}

pub fn draw_menu<R: Renderer>(menu: &Menu, r: &mut R) -> Result<(), R::Error> {
    r.clear(MENU_BACKGROUND_COLOR)?;

    let mut y = 30.0;
    for (i, line) in menu.texts.iter().enumerate() {
        if i == 0 {
            r.draw_text(&line.text, centered(&line.text, TITLE_SCALE, y), TITLE_SCALE, line.color)?;
            y += TITLE_SCALE + 12.0;
        } else {
            r.draw_text(&line.text, Point2 { x: 60.0, y }, LINE_SCALE, line.color)?;
            y += LINE_SCALE + 4.0;
        }
    }

    for (i, button) in menu.buttons.iter().enumerate() {
        draw_button(button, menu.focus() == i as i32, r)?;
    }
    for input_box in &menu.input_boxes {
        draw_input_box(input_box, r)?;
    }
    Ok(())
}

fn draw_button<R: Renderer>(
    button: &RectButton,
    highlight: bool,
    r: &mut R,
) -> Result<(), R::Error> {
    let color = if button.disabled {
        DISABLED_COLOR
    } else if highlight {
        HIGHLIGHT_COLOR
    } else {
        BUTTON_COLOR
    };
    r.draw_rect(button.rect, BUTTON_COLOR, false)?;
    let position = Point2 {
        x: button.rect.x + (button.rect.w - text_width(&button.label, BUTTON_SCALE)) / 2.0,
        y: button.rect.y + (button.rect.h - BUTTON_SCALE) / 2.0,
    };
    r.draw_text(&button.label, position, BUTTON_SCALE, color)
}

fn draw_input_box<R: Renderer>(input_box: &InputBox, r: &mut R) -> Result<(), R::Error> {
    let rect = input_box.rect;
    r.draw_rect(rect, Color::WHITE, true)?;
    let text_y = rect.y + (rect.h - BUTTON_SCALE) / 2.0;
    r.draw_text(
        input_box.text(),
        Point2 { x: rect.x + 4.0, y: text_y },
        BUTTON_SCALE,
        INPUT_TEXT_COLOR,
    )?;
    if input_box.is_active() {
        let cursor_x = rect.x + 4.0 + input_box.cursor() as f32 * BUTTON_SCALE * CHAR_WIDTH_RATIO;
        r.draw_rect(Rect::new(cursor_x, rect.y + 3.0, 1.0, rect.h - 6.0), CURSOR_COLOR, true)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::Duration;

    use super::*;
    use crate::config::GameConfig;
    use crate::input::{FrameInput, Key};
    use crate::leaderboard::MemoryLeaderboard;
    use crate::menu::MenuAction;

    #[derive(Default)]
    struct Recorder {
        clears: usize,
        rects: Vec<(Rect, Color)>,
        texts: Vec<(String, Color)>,
    }

    impl Recorder {
        fn has_text(&self, needle: &str) -> bool {
            self.texts.iter().any(|(text, _)| text == needle)
        }
    }

    impl Renderer for Recorder {
        type Error = Infallible;

        fn clear(&mut self, _color: Color) -> Result<(), Infallible> {
            self.clears += 1;
            Ok(())
        }

        fn draw_rect(&mut self, rect: Rect, color: Color, _filled: bool) -> Result<(), Infallible> {
            self.rects.push((rect, color));
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            _position: Point2<f32>,
            _scale: f32,
            color: Color,
        ) -> Result<(), Infallible> {
            self.texts.push((text.to_string(), color));
            Ok(())
        }
    }

    fn controller() -> GameController<MemoryLeaderboard> {
        GameController::new(GameConfig::default(), MemoryLeaderboard::new()).with_seed(4)
    }

    #[test]
    fn main_menu_highlights_first_button() {
        let controller = controller();
        let mut recorder = Recorder::default();
        draw_frame(&controller, &mut recorder).unwrap();

        assert_eq!(recorder.clears, 1);
        assert!(recorder
            .texts
            .iter()
            .any(|(text, color)| text == "New Game" && *color == HIGHLIGHT_COLOR));
        assert!(recorder
            .texts
            .iter()
            .any(|(text, color)| text == "Exit" && *color == BUTTON_COLOR));
    }

    #[test]
    fn head_is_drawn_on_flipped_row() {
        let mut controller = controller();
        controller.apply(MenuAction::NewGame, Duration::ZERO);
        let mut recorder = Recorder::default();
        draw_frame(&controller, &mut recorder).unwrap();

        let sim = controller.play().unwrap().simulation();
        let head = cell_rect(sim, sim.head());
        // head at grid row 5 of 10 sits on screen row 4
        assert_eq!(head.y, BOARD_TOP + 4.0 * 30.0);
        assert!(recorder
            .rects
            .iter()
            .any(|(rect, color)| *rect == head && *color == HEAD_COLOR));
        assert!(recorder.has_text("Press an arrow key"));
    }

    #[test]
    fn paused_game_shows_only_the_pause_menu() {
        let mut controller = controller();
        controller.apply(MenuAction::NewGame, Duration::ZERO);
        controller.tick(&FrameInput::new().with_press(Key::Escape), Duration::ZERO);

        let mut recorder = Recorder::default();
        draw_frame(&controller, &mut recorder).unwrap();
        assert!(recorder.has_text("Paused"));
        assert!(!recorder.rects.iter().any(|(_, color)| *color == HEAD_COLOR));
    }

    #[test]
    fn suspended_menus_are_not_drawn() {
        let mut controller = controller();
        controller.apply(MenuAction::Push(crate::menu::MenuId::Options), Duration::ZERO);
        let mut recorder = Recorder::default();
        draw_frame(&controller, &mut recorder).unwrap();

        assert!(recorder.has_text("Sound: On"));
        assert!(!recorder.has_text("New Game"));
    }
}
