use ggez::graphics::{Color, Rect};

use crate::config::{MAX_NAME_LEN, WINDOW_WIDTH};
use crate::input::{InputSource, Key};

pub const NEW_GAME: &str = "New Game";
pub const LEADERBOARD: &str = "Leaderboard";
pub const OPTIONS: &str = "Options";
pub const EXIT: &str = "Exit";
pub const PAUSED: &str = "Paused";
pub const RESUME: &str = "Resume";
pub const RESTART: &str = "Restart";
pub const RETRY: &str = "Retry";
pub const PLAY_AGAIN: &str = "Play Again";
pub const BACK: &str = "Back";
pub const MAIN_MENU: &str = "Main Menu";
pub const CANCEL: &str = "Cancel";
pub const CONFIRM: &str = "Confirm";

const BUTTON_WIDTH: f32 = 140.0;
const BUTTON_HEIGHT: f32 = 30.0;
const BUTTON_SPACING: f32 = 40.0;

const TITLE_COLOR: Color = Color::new(0.0, 0.8, 0.0, 1.0);
const WIN_COLOR: Color = Color::new(1.0, 0.2, 0.2, 1.0);
const RANKING_COLOR: Color = Color::new(0.68, 1.0, 0.18, 1.0);
const ERROR_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuId {
    Main,
    Leaderboard,
    Options,
    Pause,
    GameOver,
    Win,
    InputName,
}

/// What activating a button asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// New Game, Restart, Retry and Play Again.
    NewGame,
    Push(MenuId),
    /// Pop the top menu.
    Back,
    Resume,
    MainMenu,
    Exit,
    ToggleSound,
    ConfirmName(String),
    CancelName,
}

#[derive(Debug, Clone)]
pub struct RectButton {
    pub label: String,
    pub rect: Rect,
    pub disabled: bool,
    action: Option<MenuAction>,
}

impl RectButton {
    pub fn new(label: &str, rect: Rect, action: MenuAction) -> Self {
        RectButton {
            label: label.to_string(),
            rect,
            disabled: false,
            action: Some(action),
        }
    }

    /// A caption drawn like a button that never fires.
    pub fn disabled(label: &str, rect: Rect) -> Self {
        RectButton {
            label: label.to_string(),
            rect,
            disabled: true,
            action: None,
        }
    }

    pub fn action(&self) -> Option<&MenuAction> {
        self.action.as_ref()
    }

    fn activate(&self) -> Option<MenuAction> {
        if self.disabled {
            return None;
        }
        self.action.clone()
    }
}

/// Single-line text entry.
#[derive(Debug, Clone)]
pub struct InputBox {
    pub rect: Rect,
    text: String,
    cursor: usize,
    caps_lock: bool,
    active: bool,
}

impl InputBox {
    pub fn new(rect: Rect) -> Self {
        InputBox {
            rect,
            text: String::new(),
            cursor: 0,
            caps_lock: false,
            active: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Applies at most one edit for this frame's keys.
    pub fn handle(&mut self, input: &impl InputSource) {
        if input.just_pressed(Key::CapsLock) {
            self.caps_lock = !self.caps_lock;
        } else if input.just_pressed(Key::Home) {
            self.cursor = 0;
        } else if input.just_pressed(Key::End) {
            self.cursor = self.text.len();
        } else if input.just_pressed(Key::Left) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if input.just_pressed(Key::Right) {
            self.cursor = (self.cursor + 1).min(self.text.len());
        } else if input.just_pressed(Key::Backspace) || input.just_pressed(Key::Delete) {
            self.delete_before_cursor();
        } else if let Some(c) = read_char(input, self.caps_lock) {
            self.insert(c);
        }
    }

    fn insert(&mut self, c: char) {
        if self.text.len() >= MAX_NAME_LEN {
            return;
        }
        // only ASCII gets in, so byte offsets are char offsets
        self.text.insert(self.cursor, c);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        self.text.remove(self.cursor);
    }
}

fn read_char(input: &impl InputSource, caps_lock: bool) -> Option<char> {
    if input.just_pressed(Key::Space) {
        return Some(' ');
    }
    for digit in 0..=9u8 {
        if input.just_pressed(Key::Digit(digit)) {
            return Some((b'0' + digit) as char);
        }
    }
    let shift = input.pressed(Key::LeftShift) || input.pressed(Key::RightShift);
    let upper = caps_lock != shift;
    for letter in 'A'..='Z' {
        if input.just_pressed(Key::Letter(letter)) {
            return Some(if upper { letter } else { letter.to_ascii_lowercase() });
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub color: Color,
}

impl TextLine {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        TextLine {
            text: text.into(),
            color,
        }
    }
}

/// One screen of buttons, an optional input box row and static text.
///
/// `focus` indexes `buttons`; `-1` means the active input box has it.
#[derive(Debug, Clone)]
pub struct Menu {
    pub id: MenuId,
    pub buttons: Vec<RectButton>,
    pub input_boxes: Vec<InputBox>,
    pub texts: Vec<TextLine>,
    focus: i32,
    initial_focus: i32,
}

impl Menu {
    pub fn new(id: MenuId) -> Self {
        Menu {
            id,
            buttons: Vec::new(),
            input_boxes: Vec::new(),
            texts: Vec::new(),
            focus: 0,
            initial_focus: 0,
        }
    }

    pub fn add_button(&mut self, button: RectButton) {
        self.buttons.push(button);
    }

    /// Adds an input box and makes it the initial focus.
    pub fn add_input_box(&mut self, input_box: InputBox) {
        self.input_boxes.push(input_box);
        self.initial_focus = -1;
        self.reset();
    }

    pub fn add_text(&mut self, line: TextLine) {
        self.texts.push(line);
    }

    pub fn focus(&self) -> i32 {
        self.focus
    }

    pub fn focused_button(&self) -> Option<&RectButton> {
        usize::try_from(self.focus)
            .ok()
            .and_then(|i| self.buttons.get(i))
    }

    pub fn active_input(&self) -> Option<&InputBox> {
        self.input_boxes.iter().find(|b| b.active)
    }

    pub fn input_text(&self) -> String {
        self.input_boxes
            .first()
            .map(|b| b.text().to_string())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.focus = self.initial_focus;
        self.deactivate_inputs();
        if self.focus == -1 {
            self.activate_input(0);
        }
    }

    pub fn reset_inputs(&mut self) {
        for input_box in &mut self.input_boxes {
            input_box.reset();
        }
    }

    fn min_focus(&self) -> i32 {
        if self.input_boxes.is_empty() {
            0
        } else {
            -1
        }
    }

    fn activate_input(&mut self, index: usize) {
        for (i, input_box) in self.input_boxes.iter_mut().enumerate() {
            input_box.active = i == index;
        }
    }

    fn deactivate_inputs(&mut self) {
        for input_box in &mut self.input_boxes {
            input_box.active = false;
        }
    }

    fn set_focus(&mut self, focus: i32) {
        let last = self.buttons.len() as i32 - 1;
        let focus = focus.min(last).max(self.min_focus());
        if focus == self.focus {
            return;
        }
        self.focus = focus;
        if focus == -1 {
            let index = self
                .input_boxes
                .iter()
                .position(|b| b.active)
                .unwrap_or(0);
            self.activate_input(index);
        } else {
            self.deactivate_inputs();
        }
    }

    fn fire(&self, index: usize) -> Option<MenuAction> {
        match self.buttons.get(index)?.activate()? {
            MenuAction::ConfirmName(_) => Some(MenuAction::ConfirmName(self.input_text())),
            action => Some(action),
        }
    }

    /// Handles one frame of input. Returns the action of the button that
    /// fired, if any.
    pub fn handle(&mut self, input: &impl InputSource) -> Option<MenuAction> {
        if input.just_pressed_mouse_left() {
            let cursor = input.mouse_position();
            if let Some(i) = self.buttons.iter().position(|b| b.rect.contains(cursor)) {
                self.set_focus(i as i32);
                return self.fire(i);
            }
            if let Some(i) = self.input_boxes.iter().position(|b| b.rect.contains(cursor)) {
                self.activate_input(i);
                self.focus = -1;
                return None;
            }
        }

        if input.just_pressed(Key::Down) {
            self.set_focus(self.focus + 1);
        } else if input.just_pressed(Key::Up) {
            self.set_focus(self.focus - 1);
        } else if input.just_pressed(Key::Enter) {
            return usize::try_from(self.focus).ok().and_then(|i| self.fire(i));
        } else if self.focus == -1 {
            if let Some(input_box) = self.input_boxes.iter_mut().find(|b| b.active) {
                input_box.handle(input);
            }
        }
        None
    }
}

fn button_rect(row: usize, top: f32) -> Rect {
    Rect::new(
        (WINDOW_WIDTH - BUTTON_WIDTH) / 2.0,
        top + row as f32 * BUTTON_SPACING,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

fn sound_label(enabled: bool) -> String {
    format!("Sound: {}", if enabled { "On" } else { "Off" })
}

/// Every menu the game uses, built once and reused.
#[derive(Debug, Clone)]
pub struct Menus {
    main: Menu,
    leaderboard: Menu,
    options: Menu,
    pause: Menu,
    game_over: Menu,
    win: Menu,
    input_name: Menu,
}

impl Menus {
    pub fn new(sound_enabled: bool) -> Self {
        Menus {
            main: create_main_menu(),
            leaderboard: create_leaderboard_menu(),
            options: create_options_menu(sound_enabled),
            pause: create_pause_menu(),
            game_over: create_game_over_menu(),
            win: create_win_menu(),
            input_name: create_input_name_menu(),
        }
    }

    pub fn get(&self, id: MenuId) -> &Menu {
        match id {
            MenuId::Main => &self.main,
            MenuId::Leaderboard => &self.leaderboard,
            MenuId::Options => &self.options,
            MenuId::Pause => &self.pause,
            MenuId::GameOver => &self.game_over,
            MenuId::Win => &self.win,
            MenuId::InputName => &self.input_name,
        }
    }

    pub fn get_mut(&mut self, id: MenuId) -> &mut Menu {
        match id {
            MenuId::Main => &mut self.main,
            MenuId::Leaderboard => &mut self.leaderboard,
            MenuId::Options => &mut self.options,
            MenuId::Pause => &mut self.pause,
            MenuId::GameOver => &mut self.game_over,
            MenuId::Win => &mut self.win,
            MenuId::InputName => &mut self.input_name,
        }
    }

    /// Replaces the leaderboard text with fresh rankings or an error.
    pub fn set_rankings(&mut self, lines: Vec<String>, failed: bool) {
        let color = if failed { ERROR_COLOR } else { RANKING_COLOR };
        let menu = &mut self.leaderboard;
        menu.texts.truncate(1);
        menu.texts
            .extend(lines.into_iter().map(|line| TextLine::new(line, color)));
    }

    pub fn set_sound_label(&mut self, enabled: bool) {
        for button in &mut self.options.buttons {
            if button.action() == Some(&MenuAction::ToggleSound) {
                button.label = sound_label(enabled);
            }
        }
    }
}

fn create_main_menu() -> Menu {
    let mut menu = Menu::new(MenuId::Main);
    menu.add_text(TextLine::new("SNAKE", TITLE_COLOR));
    menu.add_button(RectButton::new(NEW_GAME, button_rect(0, 120.0), MenuAction::NewGame));
    menu.add_button(RectButton::new(
        LEADERBOARD,
        button_rect(1, 120.0),
        MenuAction::Push(MenuId::Leaderboard),
    ));
    menu.add_button(RectButton::new(
        OPTIONS,
        button_rect(2, 120.0),
        MenuAction::Push(MenuId::Options),
    ));
    menu.add_button(RectButton::new(EXIT, button_rect(3, 120.0), MenuAction::Exit));
    menu
}

fn create_leaderboard_menu() -> Menu {
    let mut menu = Menu::new(MenuId::Leaderboard);
    menu.add_text(TextLine::new("Leaderboard", TITLE_COLOR));
    menu.add_button(RectButton::new(BACK, button_rect(0, 340.0), MenuAction::Back));
    menu
}

fn create_options_menu(sound_enabled: bool) -> Menu {
    let mut menu = Menu::new(MenuId::Options);
    menu.add_text(TextLine::new("Options", TITLE_COLOR));
    menu.add_button(RectButton::new(
        &sound_label(sound_enabled),
        button_rect(0, 160.0),
        MenuAction::ToggleSound,
    ));
    menu.add_button(RectButton::new(BACK, button_rect(1, 160.0), MenuAction::Back));
    menu
}

fn create_pause_menu() -> Menu {
    let mut menu = Menu::new(MenuId::Pause);
    menu.add_button(RectButton::disabled(PAUSED, button_rect(0, 100.0)));
    menu.add_button(RectButton::new(RESUME, button_rect(1, 100.0), MenuAction::Resume));
    menu.add_button(RectButton::new(RESTART, button_rect(2, 100.0), MenuAction::NewGame));
    menu.add_button(RectButton::new(
        OPTIONS,
        button_rect(3, 100.0),
        MenuAction::Push(MenuId::Options),
    ));
    menu.add_button(RectButton::new(EXIT, button_rect(4, 100.0), MenuAction::Exit));
    menu
}

fn create_game_over_menu() -> Menu {
    let mut menu = Menu::new(MenuId::GameOver);
    menu.add_text(TextLine::new("Game Over", WIN_COLOR));
    menu.add_button(RectButton::new(RETRY, button_rect(0, 120.0), MenuAction::NewGame));
    menu.add_button(RectButton::new(MAIN_MENU, button_rect(1, 120.0), MenuAction::MainMenu));
    menu.add_button(RectButton::new(EXIT, button_rect(3, 120.0), MenuAction::Exit));
    menu
}

fn create_win_menu() -> Menu {
    let mut menu = Menu::new(MenuId::Win);
    menu.add_text(TextLine::new("You Win!", WIN_COLOR));
    menu.add_button(RectButton::new(PLAY_AGAIN, button_rect(0, 160.0), MenuAction::NewGame));
    menu.add_button(RectButton::new(MAIN_MENU, button_rect(1, 160.0), MenuAction::MainMenu));
    menu
}

fn create_input_name_menu() -> Menu {
    let mut menu = Menu::new(MenuId::InputName);
    menu.add_text(TextLine::new("You Win! Your Name:", WIN_COLOR));
    menu.add_input_box(InputBox::new(button_rect(0, 90.0)));
    menu.add_button(RectButton::new(CANCEL, button_rect(2, 90.0), MenuAction::CancelName));
    menu.add_button(RectButton::new(
        CONFIRM,
        button_rect(3, 90.0),
        MenuAction::ConfirmName(String::new()),
    ));
    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FrameInput;

    fn press(key: Key) -> FrameInput {
        FrameInput::new().with_press(key)
    }

    fn center(rect: Rect) -> (f32, f32) {
        (rect.x + rect.w / 2.0, rect.y + rect.h / 2.0)
    }

    #[test]
    fn keyboard_focus_is_clamped() {
        let mut menu = create_main_menu();
        menu.handle(&press(Key::Up));
        assert_eq!(menu.focus(), 0);
        for _ in 0..10 {
            menu.handle(&press(Key::Down));
        }
        assert_eq!(menu.focus(), 3);
        assert_eq!(menu.handle(&press(Key::Enter)), Some(MenuAction::Exit));
    }

    #[test]
    fn disabled_button_never_fires() {
        let mut menu = create_pause_menu();
        assert_eq!(menu.focused_button().map(|b| b.label.as_str()), Some(PAUSED));
        assert_eq!(menu.handle(&press(Key::Enter)), None);

        let (x, y) = center(menu.buttons[0].rect);
        assert_eq!(menu.handle(&FrameInput::new().with_click(x, y)), None);

        menu.handle(&press(Key::Down));
        assert_eq!(menu.handle(&press(Key::Enter)), Some(MenuAction::Resume));
    }

    #[test]
    fn click_activates_button_under_cursor() {
        let mut menu = create_main_menu();
        let (x, y) = center(menu.buttons[2].rect);
        let action = menu.handle(&FrameInput::new().with_click(x, y));
        assert_eq!(action, Some(MenuAction::Push(MenuId::Options)));
        assert_eq!(menu.focus(), 2);

        assert_eq!(menu.handle(&FrameInput::new().with_click(1.0, 1.0)), None);
    }

    #[test]
    fn input_menu_starts_on_input_box() {
        let mut menu = create_input_name_menu();
        assert_eq!(menu.focus(), -1);
        assert!(menu.input_boxes[0].is_active());

        menu.handle(&press(Key::Down));
        assert_eq!(menu.focus(), 0);
        assert!(menu.active_input().is_none());

        menu.handle(&press(Key::Up));
        menu.handle(&press(Key::Up));
        assert_eq!(menu.focus(), -1);
        assert!(menu.input_boxes[0].is_active());
    }

    #[test]
    fn typing_goes_to_the_focused_box_only() {
        let mut menu = create_input_name_menu();
        menu.handle(&press(Key::Letter('A')));
        menu.handle(&press(Key::Down));
        menu.handle(&press(Key::Letter('B')));
        assert_eq!(menu.input_text(), "a");
    }

    #[test]
    fn activating_one_box_deactivates_the_others() {
        let mut menu = Menu::new(MenuId::InputName);
        menu.add_input_box(InputBox::new(Rect::new(0.0, 0.0, 50.0, 20.0)));
        menu.add_input_box(InputBox::new(Rect::new(0.0, 40.0, 50.0, 20.0)));
        menu.add_button(RectButton::new(
            BACK,
            Rect::new(0.0, 80.0, 50.0, 20.0),
            MenuAction::Back,
        ));
        assert!(menu.input_boxes[0].is_active());

        menu.handle(&FrameInput::new().with_click(10.0, 50.0));
        assert!(!menu.input_boxes[0].is_active());
        assert!(menu.input_boxes[1].is_active());
        assert_eq!(menu.focus(), -1);
    }

    #[test]
    fn input_box_edits_at_cursor() {
        let mut input_box = InputBox::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        input_box.handle(&press(Key::Letter('B')));
        input_box.handle(
            &FrameInput::new()
                .with_press(Key::LeftShift)
                .with_press(Key::Letter('O')),
        );
        input_box.handle(&press(Key::Digit(7)));
        input_box.handle(&press(Key::Space));
        assert_eq!(input_box.text(), "bO7 ");
        assert_eq!(input_box.cursor(), 4);

        input_box.handle(&press(Key::Home));
        input_box.handle(&press(Key::Right));
        input_box.handle(&press(Key::Backspace));
        assert_eq!(input_box.text(), "O7 ");
        assert_eq!(input_box.cursor(), 0);

        input_box.handle(&press(Key::Delete));
        assert_eq!(input_box.text(), "O7 ");

        input_box.handle(&press(Key::End));
        input_box.handle(&press(Key::Right));
        assert_eq!(input_box.cursor(), 3);
        input_box.handle(&press(Key::Delete));
        assert_eq!(input_box.text(), "O7");

        input_box.reset();
        assert_eq!(input_box.text(), "");
        assert_eq!(input_box.cursor(), 0);
    }

    #[test]
    fn caps_lock_inverts_shift() {
        let mut input_box = InputBox::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        input_box.handle(&press(Key::CapsLock));
        input_box.handle(&press(Key::Letter('X')));
        input_box.handle(
            &FrameInput::new()
                .with_press(Key::RightShift)
                .with_press(Key::Letter('Y')),
        );
        assert_eq!(input_box.text(), "Xy");
    }

    #[test]
    fn confirm_carries_typed_name() {
        let mut menu = create_input_name_menu();
        menu.handle(&press(Key::Letter('J')));
        menu.handle(&press(Key::Letter('O')));
        let (x, y) = center(menu.buttons[1].rect);
        assert_eq!(
            menu.handle(&FrameInput::new().with_click(x, y)),
            Some(MenuAction::ConfirmName("jo".to_string()))
        );
    }

    #[test]
    fn names_are_capped() {
        let mut input_box = InputBox::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        for _ in 0..MAX_NAME_LEN + 5 {
            input_box.handle(&press(Key::Letter('Z')));
        }
        assert_eq!(input_box.text().len(), MAX_NAME_LEN);
    }

    #[test]
    fn rankings_replace_previous_text() {
        let mut menus = Menus::new(true);
        menus.set_rankings(vec!["1\tann".into(), "2\tbo".into()], false);
        menus.set_rankings(vec!["1\tann".into()], false);
        let texts = &menus.get(MenuId::Leaderboard).texts;
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].text, "Leaderboard");
        assert_eq!(texts[1].text, "1\tann");
    }
}
