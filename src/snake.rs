use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, INITIAL_SNAKE_LEN};

/// A cell on the board. `y` grows northward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }

    fn moved(self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Clockwise order; opposite directions sit two steps apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        (self.index() + 4 - other.index()) % 4 == 2
    }

    /// Direction actually taken when `action` is requested while heading `self`.
    pub fn resolve(self, action: Direction) -> Direction {
        if self.is_opposite(action) {
            self
        } else {
            action
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Waiting for the first direction key of a level.
    Idle,
    Moving,
}

/// What a call to [`SnakeSimulation::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No direction chosen yet.
    Idle,
    /// Too early for the next move.
    Waiting,
    Moved,
    Ate,
    /// Ate the last apple of a level; the snake was reset.
    LevelUp,
    /// Ate the last apple of the last level.
    Won,
    Died,
    /// Already dead or won; nothing happens anymore.
    Over,
}

pub struct SnakeSimulation {
    config: GameConfig,
    rng: StdRng,
    alive: bool,
    won: bool,
    direction: Direction,
    pending_action: Direction,
    // tail first, head last
    body: Vec<Position>,
    apple: Position,
    score: u32,
    level: u32,
    moves_per_second: u32,
    last_move: Duration,
    motion: MotionState,
}

impl SnakeSimulation {
    pub fn new(config: &GameConfig, now: Duration) -> Self {
        Self::with_rng(config, now, StdRng::from_entropy())
    }

    pub fn with_seed(config: &GameConfig, now: Duration, seed: u64) -> Self {
        Self::with_rng(config, now, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: &GameConfig, now: Duration, rng: StdRng) -> Self {
        let mut sim = SnakeSimulation {
            config: config.clone(),
            rng,
            alive: true,
            won: false,
            direction: Direction::East,
            pending_action: Direction::East,
            body: Vec::new(),
            apple: Position::new(0, 0),
            score: 0,
            level: 1,
            moves_per_second: 1,
            last_move: now,
            motion: MotionState::Idle,
        };
        sim.set_level(1);
        sim.reset_snake();
        sim.generate_apple();
        sim
    }

    /// Queues the direction for the next move and wakes an idle snake.
    pub fn set_action(&mut self, direction: Direction) {
        self.pending_action = direction;
        self.motion = MotionState::Moving;
    }

    pub fn step(&mut self, now: Duration, held_repeat: bool) -> StepOutcome {
        if !self.alive || self.won {
            return StepOutcome::Over;
        }
        if self.motion == MotionState::Idle {
            return StepOutcome::Idle;
        }
        if now.saturating_sub(self.last_move) < self.move_interval(held_repeat) {
            return StepOutcome::Waiting;
        }

        self.direction = self.direction.resolve(self.pending_action);
        let next = self.head().moved(self.direction);

        if !self.in_bounds(next) || self.body.contains(&next) {
            self.alive = false;
            info!("snake died at ({}, {}) with score {}", next.x, next.y, self.score);
            return StepOutcome::Died;
        }

        self.body.push(next);
        let ate = next == self.apple;
        if ate {
            self.score += 1;
            self.generate_apple();
        } else {
            self.body.remove(0);
        }
        self.last_move = now;

        if !ate {
            return StepOutcome::Moved;
        }
        if self.score == self.level * self.config.apples_per_level {
            return self.advance_level();
        }
        StepOutcome::Ate
    }

    fn move_interval(&self, held_repeat: bool) -> Duration {
        let mut freq = self.moves_per_second.max(1);
        if held_repeat {
            freq = freq.saturating_mul(self.config.repeat_multiplier.max(1));
        }
        Duration::from_millis(1000 / u64::from(freq))
    }

    fn advance_level(&mut self) -> StepOutcome {
        if self.level >= self.config.max_level {
            self.won = true;
            info!("level {} cleared, game won with score {}", self.level, self.score);
            return StepOutcome::Won;
        }
        self.set_level(self.level + 1);
        self.reset_snake();
        self.generate_apple();
        info!("advanced to level {}", self.level);
        StepOutcome::LevelUp
    }

    fn set_level(&mut self, level: u32) {
        self.level = level.clamp(1, self.config.max_level);
        self.moves_per_second = self.config.frequency_for(self.level);
    }

    fn reset_snake(&mut self) {
        let row = self.config.grid_height / 2;
        self.body = (0..INITIAL_SNAKE_LEN).map(|x| Position::new(x, row)).collect();
        self.direction = Direction::East;
        self.pending_action = Direction::East;
        self.motion = MotionState::Idle;
    }

    fn generate_apple(&mut self) {
        loop {
            let pos = Position {
                x: self.rng.gen_range(0..self.config.grid_width),
                y: self.rng.gen_range(0..self.config.grid_height),
            };
            if !self.body.contains(&pos) {
                debug!("apple placed at ({}, {})", pos.x, pos.y);
                self.apple = pos;
                break;
            }
        }
    }

    fn in_bounds(&self, pos: Position) -> bool {
        (0..self.config.grid_width).contains(&pos.x)
            && (0..self.config.grid_height).contains(&pos.y)
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn head(&self) -> Position {
        // body is never empty: reset_snake always seeds it and moves add before removing
        self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn apple(&self) -> Position {
        self.apple
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_action(&self) -> Direction {
        self.pending_action
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn moves_per_second(&self) -> u32 {
        self.moves_per_second
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion
    }

    pub fn last_move(&self) -> Duration {
        self.last_move
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[doc(hidden)]
    pub fn set_apple_for_test(&mut self, apple: Position) {
        self.apple = apple;
    }

    #[doc(hidden)]
    pub fn set_body_for_test(&mut self, body: Vec<Position>, direction: Direction) {
        if body.is_empty() {
            return;
        }
        self.body = body;
        self.direction = direction;
        self.pending_action = direction;
    }

    #[doc(hidden)]
    pub fn set_score_for_test(&mut self, score: u32) {
        self.score = score;
    }
}
