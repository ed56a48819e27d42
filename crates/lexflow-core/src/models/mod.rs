//! Data models for the application
//!
//! Organized by domain: the workflow catalog, Clio matters, form submissions,
//! stored objects and webhook delivery results.

mod delivery;
mod matter;
mod storage;
mod submission;
mod workflow;

// Re-export all models for convenient imports
pub use delivery::*;
pub use matter::*;
pub use storage::*;
pub use submission::*;
pub use workflow::*;
