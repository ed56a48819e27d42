//! Workflow submission: validate, upload attachments, deliver the payload

mod service;

pub use service::{SubmissionReceipt, SubmissionService};
