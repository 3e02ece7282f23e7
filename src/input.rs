//! Input state
//!
//! Event handlers only touch this struct: they latch the movement flags or
//! queue a command. The frame loop samples the flags once per tick and
//! applies queued commands before simulating, so nothing an event does can
//! race with the entity collections.

use crate::sim::TickInput;

/// Discrete run commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    /// Pause only if running (focus loss)
    Pause,
    Reset,
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Direction for a keyboard key (arrow keys or A/D)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            k if k.eq_ignore_ascii_case("a") => Some(Direction::Left),
            k if k.eq_ignore_ascii_case("d") => Some(Direction::Right),
            _ => None,
        }
    }

    /// Direction named by an on-screen button (`data-dir`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Latched flags plus pending commands
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pending: Vec<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the movement flags for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.set(direction, true);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.set(direction, false);
        }
    }

    /// Touch steers toward the half of the surface being touched
    pub fn touch_move(&mut self, x: f32, surface_width: f32) {
        let left = x < surface_width / 2.0;
        self.left = left;
        self.right = !left;
    }

    /// A touch on the playfield also starts an idle game
    pub fn touch_start(&mut self, x: f32, surface_width: f32) {
        self.push(Command::Start);
        self.touch_move(x, surface_width);
    }

    pub fn touch_end(&mut self) {
        self.release_all();
    }

    /// On-screen direction button pressed (also starts an idle game)
    pub fn pointer_down(&mut self, direction: Direction) {
        self.push(Command::Start);
        self.set(direction, true);
    }

    /// On-screen direction button released, cancelled or left
    pub fn pointer_up(&mut self, direction: Direction) {
        self.set(direction, false);
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Take queued commands in arrival order
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("A"), Some(Direction::Left));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), None);
    }

    #[test]
    fn test_keys_latch_until_released() {
        let mut input = InputState::new();
        input.key_down("a");
        input.key_down("ArrowRight");
        assert_eq!(
            input.tick_input(),
            TickInput {
                left: true,
                right: true
            }
        );
        input.key_up("A");
        assert!(!input.left);
        assert!(input.right);
    }

    #[test]
    fn test_touch_halves() {
        let mut input = InputState::new();
        input.touch_start(100.0, 400.0);
        assert!(input.left && !input.right);
        input.touch_move(200.0, 400.0);
        assert!(!input.left && input.right);
        input.touch_end();
        assert!(!input.left && !input.right);
        assert_eq!(input.take_commands(), vec![Command::Start]);
        assert!(input.take_commands().is_empty());
    }

    #[test]
    fn test_pointer_buttons() {
        let mut input = InputState::new();
        input.pointer_down(Direction::Right);
        assert!(input.right);
        input.pointer_up(Direction::Right);
        assert!(!input.right);
        assert_eq!(Direction::parse("left"), Some(Direction::Left));
        assert_eq!(Direction::parse("up"), None);
    }
}
