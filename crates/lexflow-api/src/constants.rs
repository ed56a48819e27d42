//! Route prefixes and header names used by the HTTP layer.

/// Prefix for every JSON endpoint.
pub const API_PREFIX: &str = "/api";

/// Realm advertised on 401 responses from Basic-authenticated routes.
pub const AUTH_REALM: &str = "Basic realm=\"lexflow\"";
