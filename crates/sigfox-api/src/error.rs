use thiserror::Error;

/// Top-level error type for the `sigfox-api` crate.
///
/// Status-bearing variants (`Auth`, `NotFound`, `Conflict`, `Api`) are
/// produced exclusively by [`classify`](crate::classify::classify), so every
/// operation reports a given HTTP status the same way. Client-side failures
/// (`InvalidFormat`, `DeviceTypeNotFound`) never touch the network.
#[derive(Debug, Error)]
pub enum Error {
    // ── Taxonomy (HTTP status) ──────────────────────────────────────
    /// Credentials rejected by the API (HTTP 403).
    #[error("Authentication rejected (HTTP {status})")]
    Auth { status: u16, body: String },

    /// Referenced contract or device does not exist (HTTP 404).
    #[error("Resource not found (HTTP {status})")]
    NotFound { status: u16, body: String },

    /// Device identifier already provisioned (HTTP 409, creation only).
    #[error("Conflict (HTTP {status}): device already exists")]
    Conflict { status: u16, body: String },

    /// Any other non-2xx status.
    #[error("Sigfox API error (HTTP {status}): {}", preview(.body))]
    Api { status: u16, body: String },

    // ── Client-side ─────────────────────────────────────────────────
    /// No device type matches the given identifier or name.
    #[error("No device type matches '{reference}'")]
    DeviceTypeNotFound { reference: String },

    /// Provisioning input failed validation before any request was made.
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidFormat {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Username/password could not be turned into an auth header.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Response body is malformed or misses a required field.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

impl Error {
    /// HTTP status that produced this error, if it came from the API.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::NotFound { status, .. }
            | Self::Conflict { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body attached to the error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Auth { body, .. }
            | Self::NotFound { body, .. }
            | Self::Conflict { body, .. }
            | Self::Api { body, .. }
            | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` if the API rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Returns `true` if this is a "not found" error, either a missing
    /// remote resource or an unresolvable device type.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::DeviceTypeNotFound { .. })
    }

    /// Returns `true` if the device identifier is already provisioned.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
