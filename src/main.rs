use std::sync::Arc;

use tokio::sync::Notify;

use spa_server::config::{AppState, Config};
use spa_server::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(&cfg));
    let shutdown = Arc::new(Notify::new());

    logger::log_server_start(&addr, &cfg);
    server::start_signal_handler(Arc::clone(&shutdown));

    server::run_server(listener, state, shutdown).await
}
