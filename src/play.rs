use std::time::Duration;

use crate::input::{InputSource, Key};
use crate::snake::{Direction, SnakeSimulation, StepOutcome};

// Checked in this order when several arrows go down in one frame.
const DIRECTION_KEYS: [(Key, Direction); 4] = [
    (Key::Left, Direction::West),
    (Key::Right, Direction::East),
    (Key::Down, Direction::South),
    (Key::Up, Direction::North),
];

fn key_for(direction: Direction) -> Key {
    match direction {
        Direction::North => Key::Up,
        Direction::East => Key::Right,
        Direction::South => Key::Down,
        Direction::West => Key::Left,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The scene is suspended behind a menu.
    Inactive,
    Running(StepOutcome),
    Paused,
    Won,
    Died,
}

/// The board while a game is in progress.
pub struct PlayScene {
    active: bool,
    simulation: SnakeSimulation,
}

impl PlayScene {
    pub fn new(simulation: SnakeSimulation) -> Self {
        PlayScene {
            active: true,
            simulation,
        }
    }

    pub fn update(&mut self, input: &impl InputSource, now: Duration) -> PlayOutcome {
        if !self.active {
            return PlayOutcome::Inactive;
        }
        if input.just_pressed(Key::Escape) {
            self.active = false;
            return PlayOutcome::Paused;
        }
        if self.simulation.is_won() {
            self.active = false;
            return PlayOutcome::Won;
        }

        if let Some(&(_, direction)) = DIRECTION_KEYS
            .iter()
            .find(|(key, _)| input.just_pressed(*key))
        {
            self.simulation.set_action(direction);
        }
        let held = input.repeated(key_for(self.simulation.pending_action()));

        let outcome = self.simulation.step(now, held);
        if self.simulation.is_dead() {
            self.active = false;
            return PlayOutcome::Died;
        }
        PlayOutcome::Running(outcome)
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn simulation(&self) -> &SnakeSimulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut SnakeSimulation {
        &mut self.simulation
    }
}
