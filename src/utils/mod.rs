//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code generation for all shortening methods
//! - [`client_ip`] - Client IP extraction from HTTP headers

pub mod client_ip;
pub mod code_generator;
