// Device provisioning
//
// Validates the device id and PAC locally, resolves the device type
// reference, then registers the device. Nothing here retries or wraps the
// creation errors; they reach the caller exactly as `create_device` reports
// them.

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::SigfoxClient;
use crate::error::Error;
use crate::models::BaseDevice;

const DEV_ID_MIN_LEN: usize = 3;
const DEV_ID_MAX_LEN: usize = 16;
const PAC_LEN: usize = 16;

/// Fully specified device creation request, with a resolved device type id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDevice {
    pub id: String,
    pub name: String,
    pub pac: String,
    pub device_type_id: String,
    pub activable: bool,
    pub lat: f64,
    pub lng: f64,
    /// Sent as `productCertificate` only when it contains a `key` entry.
    pub product_certificate: Option<Map<String, Value>>,
    pub prototype: bool,
    pub automatic_renewal: bool,
}

/// Input to [`SigfoxClient::provision_device`].
///
/// `device_type` may be a device type id or name. Defaults: name = device id,
/// activable, automatic renewal, not a prototype, location `(0.0, 0.0)`, no
/// product certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionRequest {
    pub dev_id: String,
    pub pac: String,
    pub device_type: String,
    pub name: Option<String>,
    pub activable: bool,
    pub lat: f64,
    pub lng: f64,
    pub product_certificate: Option<Map<String, Value>>,
    pub prototype: bool,
    pub automatic_renewal: bool,
}

impl ProvisionRequest {
    pub fn new(
        dev_id: impl Into<String>,
        pac: impl Into<String>,
        device_type: impl Into<String>,
    ) -> Self {
        Self {
            dev_id: dev_id.into(),
            pac: pac.into(),
            device_type: device_type.into(),
            name: None,
            activable: true,
            lat: 0.0,
            lng: 0.0,
            product_certificate: None,
            prototype: false,
            automatic_renewal: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn activable(mut self, activable: bool) -> Self {
        self.activable = activable;
        self
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }

    pub fn product_certificate(mut self, cert: Map<String, Value>) -> Self {
        self.product_certificate = Some(cert);
        self
    }

    pub fn prototype(mut self, prototype: bool) -> Self {
        self.prototype = prototype;
        self
    }

    pub fn automatic_renewal(mut self, automatic_renewal: bool) -> Self {
        self.automatic_renewal = automatic_renewal;
        self
    }

    /// Check the device id and PAC formats.
    pub fn validate(&self) -> Result<(), Error> {
        validate_dev_id(&self.dev_id)?;
        validate_pac(&self.pac)
    }

    /// Pair this request with a resolved device type id.
    pub fn into_new_device(self, device_type_id: String) -> NewDevice {
        NewDevice {
            name: self.name.unwrap_or_else(|| self.dev_id.clone()),
            id: self.dev_id,
            pac: self.pac,
            device_type_id,
            activable: self.activable,
            lat: self.lat,
            lng: self.lng,
            product_certificate: self.product_certificate,
            prototype: self.prototype,
            automatic_renewal: self.automatic_renewal,
        }
    }
}

/// Device ids are 3 to 16 uppercase hexadecimal digits.
pub fn validate_dev_id(dev_id: &str) -> Result<(), Error> {
    let invalid = |reason| Error::InvalidFormat {
        field: "dev_id",
        value: dev_id.to_owned(),
        reason,
    };

    if !(DEV_ID_MIN_LEN..=DEV_ID_MAX_LEN).contains(&dev_id.len()) {
        return Err(invalid("must be 3 to 16 characters long"));
    }
    if !dev_id
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    {
        return Err(invalid("must contain only uppercase hexadecimal digits"));
    }
    Ok(())
}

/// PACs are exactly 16 hexadecimal digits, either case.
pub fn validate_pac(pac: &str) -> Result<(), Error> {
    if pac.len() != PAC_LEN || !pac.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidFormat {
            field: "pac",
            value: pac.to_owned(),
            reason: "must be exactly 16 hexadecimal digits",
        });
    }
    Ok(())
}

impl SigfoxClient {
    /// Validate, resolve the device type, and register the device.
    ///
    /// Fails with [`Error::InvalidFormat`] before any request if the id or
    /// PAC is malformed, with [`Error::DeviceTypeNotFound`] if the type
    /// reference matches nothing, and otherwise with whatever
    /// [`create_device`](Self::create_device) returns.
    pub async fn provision_device(&self, request: &ProvisionRequest) -> Result<BaseDevice, Error> {
        request.validate()?;

        let device_type_id = self.resolve_device_type_id(&request.device_type).await?;
        debug!(
            dev_id = %request.dev_id,
            reference = %request.device_type,
            device_type_id = %device_type_id,
            "provisioning device"
        );

        let device = request.clone().into_new_device(device_type_id);
        self.create_device(&device).await
    }
}
