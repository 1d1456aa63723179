use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use engine::{
    is_tile_aligned, step, with_grid, ActorSprite, CellPx, Direction, FrameSnapshot, InputSnapshot,
    SimCommand, Simulation, WallMap, TILE_SIZE_PX,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const MS_PER_TICK: u64 = 1000 / 60;
const WALK_SPEED_PX_PER_TICK: i32 = 1;
const PROGRESS_FILE_NAME: &str = "progress.json";
const PROGRESS_SAVE_VERSION: u32 = 1;

include!("types.rs");
include!("actor.rs");
include!("map.rs");
include!("cutscene.rs");
include!("overworld.rs");
include!("progress.rs");
include!("content.rs");

pub(crate) fn build_world_sim(save_dir: &Path) -> Result<Box<dyn Simulation>, ConfigError> {
    let world = Overworld::new(demo_world(), save_dir)?;
    Ok(Box::new(world))
}
