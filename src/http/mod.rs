//! HTTP protocol layer module
//!
//! Base protocol functionality shared by the request handlers: MIME type
//! inference and status-code response builders.

pub mod mime;
pub mod response;

pub use response::{build_404_response, build_405_response, build_options_response};
