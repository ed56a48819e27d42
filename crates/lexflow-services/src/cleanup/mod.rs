//! Expired-object reaper

mod service;

pub use service::{CleanupService, ReapReport};
