pub mod clock;
pub mod grid;
pub mod input;
pub mod loop_runner;
pub(crate) mod metrics;
pub mod rendering;
pub mod sim;
pub mod walls;

pub use clock::{TickGate, TARGET_TICK_INTERVAL};
pub use grid::{is_tile_aligned, step, with_grid, CellPx, Direction, TILE_SIZE_PX};
pub use input::InputSnapshot;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::Renderer;
pub use sim::{ActorSprite, FrameSnapshot, SimCommand, Simulation};
pub use walls::WallMap;
