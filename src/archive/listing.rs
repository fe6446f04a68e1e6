//! Wire types for the archive's file-listing response.

use serde::Deserialize;

use crate::archive::error::ArchiveError;

/// The JSON body answered by the `query` endpoint: a status flag plus the
/// matching filenames, in archive order.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListing {
    pub status: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl FileListing {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Interprets a raw response body.
///
/// Credential problems come back as an HTML login page rather than JSON; the
/// upstream toolkit sniffs a fixed offset of the body for the doctype, and
/// any other body that is not JSON gets the same treatment. A JSON `null`
/// payload means the webservice is up but not serving listings, which is a
/// degenerate result (`Ok(None)`) rather than an error.
pub(crate) fn interpret_body(body: &str) -> Result<Option<FileListing>, ArchiveError> {
    if body.get(1..14) == Some("!DOCTYPE html") {
        return Err(ArchiveError::InvalidCredentials);
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| ArchiveError::InvalidCredentials)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(ArchiveError::ListingParse)
}
