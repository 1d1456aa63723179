pub mod app;

use std::path::PathBuf;

use thiserror::Error;

pub use app::{
    is_tile_aligned, run_app, step, with_grid, ActorSprite, AppError, CellPx, Direction,
    FrameSnapshot, InputSnapshot, LoopConfig, LoopMetricsSnapshot, SimCommand, Simulation,
    TickGate, WallMap, TARGET_TICK_INTERVAL, TILE_SIZE_PX,
};

pub const ROOT_ENV_VAR: &str = "OVERWORLD_ROOT";
const SAVE_DIR_NAME: &str = "save";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not locate repository root; set {ROOT_ENV_VAR} to the checkout directory")]
    RootNotFound,
    #[error("failed to create save directory {path}: {source}")]
    CreateSaveDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Filesystem anchors resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub save_dir: PathBuf,
}

/// Resolves the repository root from `OVERWORLD_ROOT` or by walking up
/// from the current directory, then ensures the save directory exists.
pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = match std::env::var_os(ROOT_ENV_VAR) {
        Some(value) => PathBuf::from(value),
        None => find_repo_root().ok_or(StartupError::RootNotFound)?,
    };
    let save_dir = root.join(SAVE_DIR_NAME);
    std::fs::create_dir_all(&save_dir).map_err(|source| StartupError::CreateSaveDir {
        path: save_dir.clone(),
        source,
    })?;
    Ok(AppPaths { root, save_dir })
}

fn find_repo_root() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn is_repo_root(dir: &std::path::Path) -> bool {
    dir.join("Cargo.toml").is_file() && dir.join("crates").is_dir()
}
