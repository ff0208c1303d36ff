// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the shutdown signal handler (Unix)
///
/// Spawns a background task that waits for SIGTERM or SIGINT and notifies
/// `shutdown` so the accept loop can stop.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            crate::logger::log_error("Failed to register SIGTERM handler");
            return;
        };
        let Ok(mut sigint) = signal(SignalKind::interrupt()) else {
            crate::logger::log_error("Failed to register SIGINT handler");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                println!("\n[Signal] SIGTERM received, shutting down");
            }
            _ = sigint.recv() => {
                println!("\n[Signal] SIGINT received, shutting down");
            }
        }

        shutdown.notify_waiters();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[Signal] Ctrl+C received, shutting down");
            shutdown.notify_waiters();
        }
    });
}
