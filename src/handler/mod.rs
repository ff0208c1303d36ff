//! Request handler module
//!
//! Dispatches incoming requests through the path resolver and serves the
//! resolved file.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
