// Configuration module entry point
// Loads layered configuration and builds the per-process application state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, FrontendConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

impl Config {
    /// Load configuration from an optional `config.toml` in the working
    /// directory, with `SERVER_*` environment variables layered on top of
    /// built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("frontend.source_dir", "frontend")?
            .set_default("frontend.built_dir", "frontend/dist")?
            .set_default("frontend.index_file", "index.html")?
            .set_default("logging.access_log", true)?
            .set_default("logging.log_format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "SPA-Server/0.1")?
            .set_default("http.enable_cors", false)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
