use super::grid::{CellPx, Direction};
use super::input::InputSnapshot;

/// What the simulation asks the loop to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCommand {
    Continue,
    /// Halt the scheduling chain and show the pause surface. The loop
    /// calls [`Simulation::resume_from_pause`] when the surface is
    /// dismissed and only then restarts ticking.
    EnterPause,
    Quit,
}

/// One drawable actor: interpolated pixel position plus facing. The
/// renderer sorts these ascending by `y_px`, stable on ties, so a lower
/// actor occludes a higher one regardless of spawn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSprite {
    pub x_px: i32,
    pub y_px: i32,
    pub facing: Direction,
    pub is_player: bool,
}

/// Draw-surface query answered by the simulation every frame: the two
/// static background layer references, the camera-anchor position, the
/// actor sprites, and the dialog line currently awaiting
/// acknowledgement, if any.
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub lower_layer: String,
    pub upper_layer: String,
    pub camera_px: (i32, i32),
    pub sprites: Vec<ActorSprite>,
    pub wall_cells: Vec<CellPx>,
    pub dialog: Option<String>,
}

impl FrameSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The seam between the loop runner and whatever it drives. One
/// implementor at a time; the loop owns it.
pub trait Simulation {
    /// Per-tick entry point. Runs once per gate pass with the logical
    /// input collected since the previous tick.
    fn advance(&mut self, input: &InputSnapshot) -> SimCommand;

    /// Draw-surface query. Called once per rendered frame, including
    /// while paused.
    fn frame(&self) -> FrameSnapshot;

    /// The pause surface was dismissed; the in-flight pause event (if
    /// any) is now complete and ticking resumes.
    fn resume_from_pause(&mut self);
}
