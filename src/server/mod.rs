// Server module entry point
// Listener setup, connection handling, accept loop, and shutdown signals

pub mod connection;
pub mod listener;
pub mod run;
pub mod signal;

pub use listener::create_listener;
pub use run::run_server;
pub use signal::start_signal_handler;
