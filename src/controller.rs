use std::time::Duration;

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::input::InputSource;
use crate::leaderboard::{ranking_lines, LeaderboardStore};
use crate::menu::{Menu, MenuAction, MenuId, Menus};
use crate::play::{PlayOutcome, PlayScene};
use crate::snake::{SnakeSimulation, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Exit,
}

/// Something worth a sound effect happened this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Eat,
    LevelUp,
    Win,
    GameOver,
}

/// Owns the menu stack, the play scene and the leaderboard, and moves
/// between them one tick at a time.
pub struct GameController<S: LeaderboardStore> {
    config: GameConfig,
    state: GameState,
    menus: Menus,
    stack: Vec<MenuId>,
    play: Option<PlayScene>,
    store: S,
    sound_enabled: bool,
    seed: Option<u64>,
    games_started: u64,
}

impl<S: LeaderboardStore> GameController<S> {
    /// Opens the leaderboard and shows the main menu. A leaderboard that
    /// fails to open is logged and left in degraded mode.
    pub fn new(config: GameConfig, mut store: S) -> Self {
        if let Err(e) = store.open() {
            warn!("open leaderboard failed: {}", e);
        }
        let sound_enabled = true;
        GameController {
            config,
            state: GameState::Playing,
            menus: Menus::new(sound_enabled),
            stack: vec![MenuId::Main],
            play: None,
            store,
            sound_enabled,
            seed: None,
            games_started: 0,
        }
    }

    /// Makes every new game's apple sequence reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tick(&mut self, input: &impl InputSource, now: Duration) -> Option<Cue> {
        if self.state == GameState::Exit {
            return None;
        }

        if let Some(play) = self.play.as_mut().filter(|play| play.is_active()) {
            return match play.update(input, now) {
                PlayOutcome::Paused => {
                    debug!("game paused");
                    self.push(MenuId::Pause);
                    None
                }
                PlayOutcome::Won => {
                    self.push(MenuId::Win);
                    self.push(MenuId::InputName);
                    Some(Cue::Win)
                }
                PlayOutcome::Died => {
                    self.push(MenuId::GameOver);
                    Some(Cue::GameOver)
                }
                PlayOutcome::Running(StepOutcome::Ate) => Some(Cue::Eat),
                PlayOutcome::Running(StepOutcome::LevelUp) => Some(Cue::LevelUp),
                PlayOutcome::Running(StepOutcome::Won) => Some(Cue::Eat),
                PlayOutcome::Running(_) | PlayOutcome::Inactive => None,
            };
        }

        let top = *self.stack.last()?;
        let action = self.menus.get_mut(top).handle(input)?;
        debug!("{:?} menu fired {:?}", top, action);
        self.apply(action, now);
        None
    }

    pub fn apply(&mut self, action: MenuAction, now: Duration) {
        match action {
            MenuAction::NewGame => self.start_game(now),
            MenuAction::Push(id) => self.push(id),
            MenuAction::Back => self.pop(),
            MenuAction::Resume => {
                self.clear_stack();
                if let Some(play) = self.play.as_mut() {
                    play.resume();
                }
            }
            MenuAction::MainMenu => {
                self.clear_stack();
                self.play = None;
                self.push(MenuId::Main);
            }
            MenuAction::Exit => {
                info!("exit requested");
                self.state = GameState::Exit;
            }
            MenuAction::ToggleSound => {
                self.sound_enabled = !self.sound_enabled;
                self.menus.set_sound_label(self.sound_enabled);
            }
            MenuAction::ConfirmName(name) => {
                let name = name.trim();
                if !name.is_empty() {
                    match self.store.insert(name) {
                        Ok(()) => info!("recorded winner {}", name),
                        Err(e) => warn!("insert into leaderboard failed: {}", e),
                    }
                }
                self.menus.get_mut(MenuId::InputName).reset_inputs();
                self.pop();
            }
            MenuAction::CancelName => {
                self.menus.get_mut(MenuId::InputName).reset_inputs();
                self.pop();
            }
        }
    }

    fn start_game(&mut self, now: Duration) {
        self.clear_stack();
        let simulation = match self.seed {
            Some(seed) => {
                let seed = seed.wrapping_add(self.games_started);
                SnakeSimulation::with_seed(&self.config, now, seed)
            }
            None => SnakeSimulation::new(&self.config, now),
        };
        self.games_started += 1;
        self.play = Some(PlayScene::new(simulation));
        info!("game {} started", self.games_started);
    }

    fn push(&mut self, id: MenuId) {
        debug!("push {:?} menu", id);
        self.stack.push(id);
        self.on_top_changed();
    }

    fn pop(&mut self) {
        if let Some(id) = self.stack.pop() {
            debug!("pop {:?} menu", id);
            self.menus.get_mut(id).reset();
        }
        self.on_top_changed();
    }

    fn clear_stack(&mut self) {
        for id in self.stack.drain(..) {
            self.menus.get_mut(id).reset();
        }
    }

    fn on_top_changed(&mut self) {
        if self.stack.last() == Some(&MenuId::Leaderboard) {
            self.refresh_leaderboard();
        }
    }

    fn refresh_leaderboard(&mut self) {
        let result = self.store.read();
        if let Err(e) = &result {
            warn!("read leaderboard failed: {}", e);
        }
        self.menus
            .set_rankings(ranking_lines(&result), result.is_err());
    }

    /// Closes the leaderboard. Called once when the window goes away.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.store.close() {
            warn!("close leaderboard failed: {}", e);
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn stack(&self) -> &[MenuId] {
        &self.stack
    }

    pub fn top_menu(&self) -> Option<&Menu> {
        self.stack.last().map(|&id| self.menus.get(id))
    }

    pub fn menu(&self, id: MenuId) -> &Menu {
        self.menus.get(id)
    }

    pub fn play(&self) -> Option<&PlayScene> {
        self.play.as_ref()
    }

    pub fn play_mut(&mut self) -> Option<&mut PlayScene> {
        self.play.as_mut()
    }

    /// The play scene, when it is the one receiving input.
    pub fn active_play(&self) -> Option<&PlayScene> {
        self.play.as_ref().filter(|play| play.is_active())
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
