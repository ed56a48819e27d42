//! Credential gate
//!
//! The intranet is protected by a single fixed credential pair. There is no
//! hashing, lockout or token issuance; a successful check yields a `Session`
//! that lives as long as the interactive shell keeps it.

use serde::Serialize;

const USERNAME: &str = "test";
const PASSWORD: &str = "pass";

/// Exact, case-sensitive comparison against the configured pair.
pub fn authenticate(username: &str, password: &str) -> bool {
    username == USERNAME && password == PASSWORD
}

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    username: String,
}

impl Session {
    /// Open a session if the credentials match.
    pub fn open(username: &str, password: &str) -> Option<Self> {
        authenticate(username, password).then(|| Session {
            username: username.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
