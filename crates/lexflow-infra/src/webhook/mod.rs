//! Workflow webhook delivery

mod dispatcher;

pub use dispatcher::{validate_destination, WebhookDispatcher, WebhookDispatcherConfig};
