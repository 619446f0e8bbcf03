// Device type endpoints and reference resolution
//
// A device type can be referred to either by its opaque id or by its display
// name. Resolution always walks every page, since a match may sit anywhere.

use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{DeviceType, Page};
use crate::paginate::PageMode;

/// Find the first device type whose id or name equals `reference` and that
/// carries an id to return.
///
/// Scans in list order; null fields never match. Duplicate names are not
/// detected, the earliest entry wins.
pub fn match_device_type<'a>(types: &'a [DeviceType], reference: &str) -> Option<&'a str> {
    types
        .iter()
        .filter(|dt| {
            dt.id.as_deref() == Some(reference) || dt.name.as_deref() == Some(reference)
        })
        .find_map(|dt| dt.id.as_deref())
}

impl SigfoxClient {
    /// List device types visible to the API user.
    ///
    /// `GET /device-types/`
    pub async fn get_device_types(&self, mode: PageMode) -> Result<Page<DeviceType>, Error> {
        let url = self.endpoint(&["device-types", ""])?;
        debug!(?mode, "listing device types");
        self.get_paged(url, mode).await
    }

    /// Map a device type id or name to its canonical id.
    pub async fn resolve_device_type_id(&self, reference: &str) -> Result<String, Error> {
        let types = self.get_device_types(PageMode::All).await?;

        match match_device_type(&types.data, reference) {
            Some(id) => {
                debug!(reference, id, "resolved device type");
                Ok(id.to_owned())
            }
            None => Err(Error::DeviceTypeNotFound {
                reference: reference.to_owned(),
            }),
        }
    }
}
