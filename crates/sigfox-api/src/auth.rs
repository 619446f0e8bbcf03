use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// API login and password for the Sigfox backend.
///
/// Sigfox issues these per API user (Group > API access). They are sent as
/// HTTP Basic auth on every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build the `Authorization: Basic ...` header value.
    ///
    /// The value is marked sensitive so it never shows up in `Debug` output
    /// of request builders or header maps.
    pub fn authorization(&self) -> Result<HeaderValue, Error> {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        let mut value = HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(raw)))
            .map_err(|e| Error::InvalidCredentials(format!("invalid auth header value: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }
}
