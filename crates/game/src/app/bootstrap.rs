use engine::{resolve_app_paths, LoopConfig, Simulation, StartupError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::overworld::{self, ConfigError};

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) sim: Box<dyn Simulation>,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Overworld Startup ===");

    let paths = resolve_app_paths()?;
    info!(save_dir = %paths.save_dir.display(), "paths_resolved");
    let sim = overworld::build_world_sim(&paths.save_dir)?;
    let config = LoopConfig {
        window_title: "Overworld".to_string(),
        ..LoopConfig::default()
    };
    Ok(AppWiring { config, sim })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
