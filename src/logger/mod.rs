//! Logger module
//!
//! Logging utilities for the HTTP server: lifecycle messages and formatted
//! access log lines to stdout, warnings and errors to stderr.

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Front-end server started");
    println!("Listening on: http://{addr}");
    println!("Source directory: {}", config.frontend.source_dir);
    println!(
        "Built output directory: {} (served when present)",
        config.frontend.built_dir
    );
    println!("Index document: {}", config.frontend.index_file);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    println!("\n[Shutdown] Stopping accept loop ({active_connections} connections still active)");
}
