// Application state module
// Per-process state shared across connections; built once at startup

use std::path::PathBuf;

use crate::config::Config;

/// Shared application state
///
/// The two front-end roots are fixed for the lifetime of the process. Which of
/// them serves a given request is decided per request by the resolver, so a
/// build produced while the server is running is picked up without a restart.
pub struct AppState {
    pub config: Config,
    pub source_root: PathBuf,
    pub built_root: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            source_root: PathBuf::from(&config.frontend.source_dir),
            built_root: PathBuf::from(&config.frontend.built_dir),
        }
    }
}
