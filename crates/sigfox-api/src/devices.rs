// Device endpoints
//
// Single-device lookup and raw device creation. Validated, type-resolving
// creation lives in `provision`.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::{BaseDevice, Device};
use crate::provision::NewDevice;

/// Wire shape of `POST /devices/`.
#[derive(Serialize)]
struct CreateDeviceBody<'a> {
    id: &'a str,
    name: &'a str,
    pac: &'a str,
    lat: f64,
    lng: f64,
    automatic_renewal: bool,
    activable: bool,
    prototype: bool,
    #[serde(rename = "deviceTypeId")]
    device_type_id: &'a str,
    #[serde(rename = "productCertificate", skip_serializing_if = "Option::is_none")]
    product_certificate: Option<&'a Map<String, Value>>,
}

impl<'a> From<&'a NewDevice> for CreateDeviceBody<'a> {
    fn from(dev: &'a NewDevice) -> Self {
        Self {
            id: &dev.id,
            name: &dev.name,
            pac: &dev.pac,
            lat: dev.lat,
            lng: dev.lng,
            automatic_renewal: dev.automatic_renewal,
            activable: dev.activable,
            prototype: dev.prototype,
            device_type_id: &dev.device_type_id,
            // A certificate without a `key` entry is not sent at all.
            product_certificate: dev
                .product_certificate
                .as_ref()
                .filter(|cert| cert.contains_key("key")),
        }
    }
}

impl SigfoxClient {
    /// Fetch a single device.
    ///
    /// `GET /devices/{id}`
    pub async fn get_device_info(&self, dev_id: &str) -> Result<Device, Error> {
        let url = self.endpoint(&["devices", dev_id])?;
        debug!(dev_id, "fetching device");
        self.get(url).await
    }

    /// Register a device against an already-known device type id.
    ///
    /// `POST /devices/`. No input validation is done here; see
    /// [`provision_device`](Self::provision_device) for the checked path.
    pub async fn create_device(&self, device: &NewDevice) -> Result<BaseDevice, Error> {
        let url = self.endpoint(&["devices", ""])?;
        debug!(dev_id = %device.id, device_type_id = %device.device_type_id, "creating device");
        self.create(url, &CreateDeviceBody::from(device)).await
    }
}
