//! Lexflow HTTP API
//!
//! Library target for the `lexflow-api` binary so integration tests can build
//! the router without binding a socket.

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod utils;
