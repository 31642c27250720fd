// Authentication
//
// Security Manager uses HTTP basic auth on every request. The validate
// endpoint confirms the credentials up front and reports an `authStatus`
// so the caller can tell a rejected login from a locked-out or
// unauthorized account.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::SecurityManagerClient;
use crate::error::Error;

/// `authStatus` value that marks a usable session.
pub const AUTHORIZED: &str = "AUTHORIZED";

/// Basic-auth credentials shared by every request of a session.
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
}

/// Response body of `POST /authentication/validate`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthValidation {
    #[serde(default, rename = "authStatus")]
    pub auth_status: Option<String>,
}

impl AuthValidation {
    /// `true` only for an explicit `AUTHORIZED` status.
    pub fn is_authorized(&self) -> bool {
        self.auth_status.as_deref() == Some(AUTHORIZED)
    }
}

impl SecurityManagerClient {
    /// Validate the session credentials.
    ///
    /// `POST /securitymanager/api/authentication/validate` with
    /// `{username, password}`. Anything but HTTP 200 is an
    /// [`Error::Authentication`]; a 200 is parsed and returned so the caller
    /// can inspect `authStatus`.
    pub async fn validate_credentials(&self) -> Result<AuthValidation, Error> {
        let url = self.api_url("authentication/validate")?;
        debug!("validating credentials at {}", url);

        let body = json!({
            "username": self.credentials().username,
            "password": self.credentials().password.expose_secret(),
        });

        let resp = self
            .request(reqwest::Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "credential validation rejected");
            return Err(Error::Authentication {
                message: format!("validate returned HTTP {}: {body}", status.as_u16()),
            });
        }

        Self::decode(resp).await
    }
}
