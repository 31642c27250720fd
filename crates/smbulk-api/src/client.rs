// Security Manager HTTP client
//
// Wraps `reqwest::Client` with API-root URL construction, basic auth on
// every request and JSON decoding. Endpoint groups (authentication,
// plugins, device groups, devices) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Path of the REST API below the server root.
const API_ROOT: &str = "securitymanager/api/";

/// Domain every endpoint is scoped to unless configured otherwise.
pub const DEFAULT_DOMAIN_ID: u32 = 1;

/// Turn operator host input into a server root URL.
///
/// A bare host (`fmserver`, `10.0.0.5:8443`) is served over HTTPS. Input
/// that already names a scheme is taken as-is, which lets lab setups and
/// test servers use plain HTTP.
pub fn base_url_from_host(host: &str) -> Result<Url, Error> {
    let host = host.trim().trim_end_matches('/');
    let full = if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}/")
    } else {
        format!("https://{host}/")
    };
    Ok(Url::parse(&full)?)
}

/// Raw HTTP client for the Security Manager REST API.
///
/// Holds the session's basic-auth credentials and attaches them to every
/// request. All methods are `&self`; the client is created once and used
/// for the lifetime of the process.
pub struct SecurityManagerClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    domain_id: u32,
}

impl SecurityManagerClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `https://fmserver/`); the
    /// `/securitymanager/api/` prefix is added per request.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            domain_id: DEFAULT_DOMAIN_ID,
        }
    }

    /// Scope all domain-bound endpoints to a different domain.
    pub fn with_domain(mut self, domain_id: u32) -> Self {
        self.domain_id = domain_id;
        self
    }

    /// The server root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The domain endpoints are scoped to.
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/securitymanager/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let root = self.base_url.join(API_ROOT)?;
        Ok(root.join(path.trim_start_matches('/'))?)
    }

    /// Build a domain-scoped URL: `{base}/securitymanager/api/domain/{id}/{path}`.
    pub(crate) fn domain_url(&self, path: &str) -> Result<Url, Error> {
        self.api_url(&format!("domain/{}/{}", self.domain_id, path))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with the session's basic-auth credentials attached.
    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http.request(method, url).basic_auth(
            &self.credentials.username,
            Some(self.credentials.password.expose_secret()),
        )
    }

    /// Send a GET request and decode the JSON body of a 2xx response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = Self::check_status(resp).await?;
        Self::decode(resp).await
    }

    /// Send a PUT request with a JSON body, returning the success status.
    pub(crate) async fn put<B: serde::Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<reqwest::StatusCode, Error> {
        debug!("PUT {}", url);

        let resp = self
            .request(reqwest::Method::PUT, url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = Self::check_status(resp).await?;
        Ok(resp.status())
    }

    /// Turn a non-2xx response into [`Error::Status`], keeping the body.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        trace!(status = status.as_u16(), body = %body.as_str(), "request failed");
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Read the body and deserialize it, keeping the raw text on failure.
    pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> SecurityManagerClient {
        SecurityManagerClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Credentials::new("admin", "secret"),
        )
    }

    #[test]
    fn bare_host_defaults_to_https() {
        let url = base_url_from_host("localhost").unwrap();
        assert_eq!(url.as_str(), "https://localhost/");
    }

    #[test]
    fn explicit_scheme_and_port_are_kept() {
        let url = base_url_from_host("http://127.0.0.1:8080/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn api_url_is_rooted_under_securitymanager() {
        let url = client("https://fmserver/")
            .api_url("authentication/validate")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fmserver/securitymanager/api/authentication/validate"
        );
    }

    #[test]
    fn domain_url_uses_configured_domain() {
        let url = client("https://fmserver")
            .with_domain(3)
            .domain_url("device/17")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fmserver/securitymanager/api/domain/3/device/17"
        );
    }
}
