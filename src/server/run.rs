// Accept loop module
// Runs the listener until a shutdown signal arrives

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;
use crate::server::connection;

/// How often the drain loop re-checks the active connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` is notified.
///
/// Each accepted connection is handed off to its own task; the loop itself
/// only accepts and dispatches. On shutdown the loop stops accepting, then
/// waits for in-flight connections to finish before returning, so the runtime
/// is not torn down under them. The wait is bounded by the connection
/// read/write timeout: any connection still open past that is already being
/// timed out by its own task.
pub async fn run_server(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown(active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    // Stop accepting before draining so the backlog does not refill the counter
    drop(listener);

    let grace = Duration::from_secs(std::cmp::max(
        state.config.performance.read_timeout,
        state.config.performance.write_timeout,
    ));
    drain_connections(&active_connections, grace).await;

    Ok(())
}

/// Wait for the active connection counter to reach zero, up to `grace`.
///
/// Connection tasks decrement the counter as they finish; polling it is
/// enough here since shutdown happens once per process.
async fn drain_connections(conn_counter: &Arc<AtomicUsize>, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 {
            println!("[Shutdown] All connections finished");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {active} connections still active"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
