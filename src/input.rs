use std::collections::HashSet;

use ggez::input::keyboard::KeyCode;
use ggez::mint::Point2;

/// Keys the game reacts to. Everything else is dropped at the window edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Delete,
    Home,
    End,
    CapsLock,
    LeftShift,
    RightShift,
    Space,
    /// `0..=9`
    Digit(u8),
    /// Always stored upper case; the input box picks the case.
    Letter(char),
}

impl Key {
    pub fn from_keycode(keycode: KeyCode) -> Option<Key> {
        let key = match keycode {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Return | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Escape => Key::Escape,
            KeyCode::Back => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::Capital => Key::CapsLock,
            KeyCode::LShift => Key::LeftShift,
            KeyCode::RShift => Key::RightShift,
            KeyCode::Space => Key::Space,
            KeyCode::Key0 | KeyCode::Numpad0 => Key::Digit(0),
            KeyCode::Key1 | KeyCode::Numpad1 => Key::Digit(1),
            KeyCode::Key2 | KeyCode::Numpad2 => Key::Digit(2),
            KeyCode::Key3 | KeyCode::Numpad3 => Key::Digit(3),
            KeyCode::Key4 | KeyCode::Numpad4 => Key::Digit(4),
            KeyCode::Key5 | KeyCode::Numpad5 => Key::Digit(5),
            KeyCode::Key6 | KeyCode::Numpad6 => Key::Digit(6),
            KeyCode::Key7 | KeyCode::Numpad7 => Key::Digit(7),
            KeyCode::Key8 | KeyCode::Numpad8 => Key::Digit(8),
            KeyCode::Key9 | KeyCode::Numpad9 => Key::Digit(9),
            KeyCode::A => Key::Letter('A'),
            KeyCode::B => Key::Letter('B'),
            KeyCode::C => Key::Letter('C'),
            KeyCode::D => Key::Letter('D'),
            KeyCode::E => Key::Letter('E'),
            KeyCode::F => Key::Letter('F'),
            KeyCode::G => Key::Letter('G'),
            KeyCode::H => Key::Letter('H'),
            KeyCode::I => Key::Letter('I'),
            KeyCode::J => Key::Letter('J'),
            KeyCode::K => Key::Letter('K'),
            KeyCode::L => Key::Letter('L'),
            KeyCode::M => Key::Letter('M'),
            KeyCode::N => Key::Letter('N'),
            KeyCode::O => Key::Letter('O'),
            KeyCode::P => Key::Letter('P'),
            KeyCode::Q => Key::Letter('Q'),
            KeyCode::R => Key::Letter('R'),
            KeyCode::S => Key::Letter('S'),
            KeyCode::T => Key::Letter('T'),
            KeyCode::U => Key::Letter('U'),
            KeyCode::V => Key::Letter('V'),
            KeyCode::W => Key::Letter('W'),
            KeyCode::X => Key::Letter('X'),
            KeyCode::Y => Key::Letter('Y'),
            KeyCode::Z => Key::Letter('Z'),
            _ => return None,
        };
        Some(key)
    }
}

/// Per-frame view of the keyboard and mouse.
pub trait InputSource {
    /// Pressed this frame and not a key-repeat.
    fn just_pressed(&self, key: Key) -> bool;
    /// Held down, including the frame it went down.
    fn pressed(&self, key: Key) -> bool;
    /// The OS fired a key-repeat for a held key this frame.
    fn repeated(&self, key: Key) -> bool;
    fn just_pressed_mouse_left(&self) -> bool;
    /// Cursor in window coordinates, y growing downward.
    fn mouse_position(&self) -> Point2<f32>;
}

/// Snapshot filled from window events between two ticks.
#[derive(Debug, Clone)]
pub struct FrameInput {
    just_pressed: Vec<Key>,
    repeated: HashSet<Key>,
    held: HashSet<Key>,
    mouse_left_clicked: bool,
    mouse: Point2<f32>,
}

impl Default for FrameInput {
    fn default() -> Self {
        FrameInput {
            just_pressed: Vec::new(),
            repeated: HashSet::new(),
            held: HashSet::new(),
            mouse_left_clicked: false,
            mouse: Point2 { x: 0.0, y: 0.0 },
        }
    }
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key, repeat: bool) {
        if repeat {
            self.repeated.insert(key);
        } else if !self.just_pressed.contains(&key) {
            self.just_pressed.push(key);
        }
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn mouse_moved(&mut self, x: f32, y: f32) {
        self.mouse = Point2 { x, y };
    }

    pub fn mouse_left_down(&mut self, x: f32, y: f32) {
        self.mouse = Point2 { x, y };
        self.mouse_left_clicked = true;
    }

    /// Drops the one-frame events; held keys and the cursor carry over.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.repeated.clear();
        self.mouse_left_clicked = false;
    }

    /// Builder used by tests and replays.
    pub fn with_press(mut self, key: Key) -> Self {
        self.key_down(key, false);
        self
    }

    pub fn with_repeat(mut self, key: Key) -> Self {
        self.key_down(key, true);
        self
    }

    pub fn with_click(mut self, x: f32, y: f32) -> Self {
        self.mouse_left_down(x, y);
        self
    }
}

impl InputSource for FrameInput {
    fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    fn pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn repeated(&self, key: Key) -> bool {
        self.repeated.contains(&key)
    }

    fn just_pressed_mouse_left(&self) -> bool {
        self.mouse_left_clicked
    }

    fn mouse_position(&self) -> Point2<f32> {
        self.mouse
    }
}
