use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::grid::Direction;

/// Logical input for one simulation tick: the direction currently held
/// (most recently pressed still-held key wins), plus edge-triggered
/// interact and escape signals. Raw device events never reach the
/// simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    held_direction: Option<Direction>,
    interact_pressed: bool,
    escape_pressed: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Option<Direction>) -> Self {
        self.held_direction = direction;
        self
    }

    pub fn with_interact_pressed(mut self, interact_pressed: bool) -> Self {
        self.interact_pressed = interact_pressed;
        self
    }

    pub fn with_escape_pressed(mut self, escape_pressed: bool) -> Self {
        self.escape_pressed = escape_pressed;
        self
    }

    pub fn held_direction(&self) -> Option<Direction> {
        self.held_direction
    }

    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn escape_pressed(&self) -> bool {
        self.escape_pressed
    }
}

/// Accumulates raw keyboard events between ticks. Direction keys form a
/// stack so that pressing a second arrow takes over immediately and
/// releasing it falls back to the still-held one; interact and escape
/// latch a single edge that the next tick consumes.
#[derive(Debug, Default)]
pub(crate) struct InputCollector {
    held_directions: Vec<Direction>,
    interact_is_down: bool,
    interact_pressed_edge: bool,
    escape_is_down: bool,
    escape_pressed_edge: bool,
}

impl InputCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        self.handle_physical_key(key_event.physical_key, key_event.state);
    }

    fn handle_physical_key(&mut self, key: PhysicalKey, state: ElementState) {
        if let Some(direction) = direction_for_key(key) {
            self.handle_direction_key(direction, state);
            return;
        }
        if is_interact_key(key) {
            self.handle_interact_key_state(state);
        }
        if is_escape_key(key) {
            self.handle_escape_key_state(state);
        }
    }

    fn handle_direction_key(&mut self, direction: Direction, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.held_directions.contains(&direction) {
                    self.held_directions.push(direction);
                }
            }
            ElementState::Released => {
                self.held_directions.retain(|held| *held != direction);
            }
        }
    }

    fn handle_interact_key_state(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.interact_is_down {
                    self.interact_pressed_edge = true;
                }
                self.interact_is_down = true;
            }
            ElementState::Released => self.interact_is_down = false,
        }
    }

    fn handle_escape_key_state(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.escape_is_down {
                    self.escape_pressed_edge = true;
                }
                self.escape_is_down = true;
            }
            ElementState::Released => self.escape_is_down = false,
        }
    }

    pub(crate) fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::empty()
            .with_direction(self.held_directions.last().copied())
            .with_interact_pressed(self.interact_pressed_edge)
            .with_escape_pressed(self.escape_pressed_edge);
        self.interact_pressed_edge = false;
        self.escape_pressed_edge = false;
        snapshot
    }

    /// Consumes a pending interact or escape edge while the loop is
    /// halted on the pause surface.
    pub(crate) fn take_pause_dismiss_pressed(&mut self) -> bool {
        let pressed = self.interact_pressed_edge || self.escape_pressed_edge;
        self.interact_pressed_edge = false;
        self.escape_pressed_edge = false;
        pressed
    }
}

fn direction_for_key(key: PhysicalKey) -> Option<Direction> {
    match key {
        PhysicalKey::Code(KeyCode::KeyW) | PhysicalKey::Code(KeyCode::ArrowUp) => {
            Some(Direction::Up)
        }
        PhysicalKey::Code(KeyCode::KeyS) | PhysicalKey::Code(KeyCode::ArrowDown) => {
            Some(Direction::Down)
        }
        PhysicalKey::Code(KeyCode::KeyA) | PhysicalKey::Code(KeyCode::ArrowLeft) => {
            Some(Direction::Left)
        }
        PhysicalKey::Code(KeyCode::KeyD) | PhysicalKey::Code(KeyCode::ArrowRight) => {
            Some(Direction::Right)
        }
        _ => None,
    }
}

fn is_interact_key(key: PhysicalKey) -> bool {
    matches!(
        key,
        PhysicalKey::Code(KeyCode::Enter) | PhysicalKey::Code(KeyCode::Space)
    )
}

fn is_escape_key(key: PhysicalKey) -> bool {
    matches!(key, PhysicalKey::Code(KeyCode::Escape))
}
