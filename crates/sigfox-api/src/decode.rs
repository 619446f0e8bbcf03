// Response body decoding.
//
// Required-vs-nullable is declared on the model types; this module only turns
// serde failures into `Error::Decode` with a body preview attached.

use serde::de::DeserializeOwned;

use crate::error::Error;

/// Decode a raw response body into `T`.
///
/// A missing required field is a data-contract violation and fails here
/// instead of defaulting to an empty value.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Decode {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}
