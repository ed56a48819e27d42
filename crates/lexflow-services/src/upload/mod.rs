//! Attachment upload to the workflow bucket

mod service;

pub use service::{Attachment, AttachmentUploader};
