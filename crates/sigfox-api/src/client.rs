// Sigfox API v2 HTTP client
//
// Wraps `reqwest::Client` with base-URL handling and Basic-auth stamping.
// Endpoint groups (contracts, devices, device types, messages, provisioning)
// are implemented as inherent methods in separate files; this module only
// deals with transport mechanics.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::classify::{RequestKind, classify};
use crate::decode::decode;
use crate::error::Error;
use crate::models::Page;
use crate::paginate::{PageMode, paginate};
use crate::transport::{RawResponse, TransportConfig};

/// Public Sigfox backend API root.
pub const DEFAULT_BASE_URL: &str = "https://api.sigfox.com/v2/";

/// Async client for the Sigfox device-management API.
///
/// Holds no mutable state: the auth header is derived once at construction
/// and every operation is an independent request chain, so a single instance
/// can be shared across tasks.
pub struct SigfoxClient {
    http: reqwest::Client,
    base_url: Url,
    authorization: HeaderValue,
}

impl SigfoxClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Client for the public Sigfox API.
    pub fn new(credentials: &Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials, transport)
    }

    /// Client for a custom API root (proxy, mock server).
    pub fn with_base_url(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: &Credentials,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            authorization: credentials.authorization()?,
        })
    }

    /// Ensure the base URL ends with `/` so relative joins append to it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// An empty final segment yields a trailing slash (`["devices", ""]` ->
    /// `.../devices/`), which is how the collection endpoints are addressed.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Transport ────────────────────────────────────────────────────

    /// Single authenticated GET, body left undecoded.
    pub(crate) async fn get_raw(&self, url: Url) -> Result<RawResponse, Error> {
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;
        RawResponse::read(resp).await
    }

    /// Single authenticated POST with a JSON body, response left undecoded.
    pub(crate) async fn post_raw<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<RawResponse, Error> {
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .json(body)
            .send()
            .await?;
        RawResponse::read(resp).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a single record, classified as a read.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let resp = self.get_raw(url).await?;
        classify(resp.status, &resp.body, RequestKind::Read)?;
        decode(&resp.body)
    }

    /// GET a list endpoint through the paginator.
    pub(crate) async fn get_paged<T: DeserializeOwned>(
        &self,
        url: Url,
        mode: PageMode,
    ) -> Result<Page<T>, Error> {
        paginate(url, mode, |url| self.get_raw(url)).await
    }

    /// POST a creation request, classified as a create.
    pub(crate) async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.post_raw(url, body).await?;
        classify(resp.status, &resp.body, RequestKind::Create)?;
        decode(&resp.body)
    }
}
