//! Snake with a stack of menus.
//!
//! The game logic ([`snake`], [`menu`], [`play`], [`controller`]) runs
//! without a window: it reads a per-frame [`input::InputSource`] and draws
//! through [`render::Renderer`]. [`app`] plugs both into ggez.

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod leaderboard;
pub mod menu;
pub mod play;
pub mod render;
pub mod snake;

pub use controller::{Cue, GameController, GameState};
pub use error::{Error, Result};
