// Status-code classification shared by every operation.

use reqwest::StatusCode;

use crate::error::Error;

/// What kind of request produced a response.
///
/// Only creation requests can legitimately conflict; a 409 anywhere else is
/// reported as a generic API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Read,
    Create,
}

/// Map an HTTP status (and its raw body) onto the error taxonomy.
///
/// Returns `Ok(())` for any 2xx status.
pub fn classify(status: StatusCode, body: &str, kind: RequestKind) -> Result<(), Error> {
    if status.is_success() {
        return Ok(());
    }

    let code = status.as_u16();
    let body = body.to_owned();

    Err(match (status, kind) {
        (StatusCode::FORBIDDEN, _) => Error::Auth { status: code, body },
        (StatusCode::NOT_FOUND, _) => Error::NotFound { status: code, body },
        (StatusCode::CONFLICT, RequestKind::Create) => Error::Conflict { status: code, body },
        _ => Error::Api { status: code, body },
    })
}
