//! Clio matter lookup
//!
//! Client-credentials token exchange followed by a fetch of active matters.
//! One attempt per call, no retries.

mod client;
mod error;

pub use client::ClioClient;
pub use error::ClioError;
