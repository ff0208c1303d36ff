//! Thin HTTP server for a single-page front-end.
//!
//! Serves the built output directory when a build exists, falls back to the
//! unbuilt source directory otherwise, and answers every unmatched path with
//! the index document so client-side routing works across full page loads.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod resolver;
pub mod server;
