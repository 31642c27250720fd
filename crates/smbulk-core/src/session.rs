// ── Session bootstrap ──
//
// Collects host and credentials, builds the HTTP client and validates the
// credentials once. The resulting `Session` is the only way later stages
// reach the server.

use tracing::{debug, info};

use smbulk_api::{Credentials, SecurityManagerClient, base_url_from_host};

use crate::config::SessionConfig;
use crate::console::Console;
use crate::error::CoreError;

/// Host used when the operator answers the host prompt with nothing.
pub const DEFAULT_HOST: &str = "localhost";

/// An authenticated connection to one Security Manager server.
pub struct Session {
    client: SecurityManagerClient,
}

impl Session {
    /// Prompt for whatever `config` does not pre-fill, then authenticate.
    ///
    /// The password is always prompted.
    pub async fn open<C: Console>(
        config: &SessionConfig,
        console: &mut C,
    ) -> Result<Self, CoreError> {
        let host = match &config.host {
            Some(host) => host.clone(),
            None => {
                let answer =
                    console.prompt("FireMon app server IP or FQDN (default: localhost)")?;
                let answer = answer.trim();
                if answer.is_empty() {
                    DEFAULT_HOST.to_owned()
                } else {
                    answer.to_owned()
                }
            }
        };
        let username = match &config.username {
            Some(username) => username.clone(),
            None => console.prompt("Username for FireMon UI account")?.trim().to_owned(),
        };
        let password = console.prompt_secret("Password for FireMon UI account")?;

        let base_url = base_url_from_host(&host)?;
        debug!(%base_url, username = username.as_str(), "connecting");
        let client = SecurityManagerClient::new(
            base_url,
            Credentials::new(username, password),
            &config.transport(),
        )?
        .with_domain(config.domain_id);

        let session = Self::authenticate(client).await?;
        console.success("Authenticated successfully.");
        Ok(session)
    }

    /// Validate the credentials carried by an existing client.
    pub async fn authenticate(client: SecurityManagerClient) -> Result<Self, CoreError> {
        let validation = client.validate_credentials().await.map_err(|err| {
            if err.is_transport() {
                CoreError::ConnectionFailed {
                    url: client.base_url().to_string(),
                    reason: err.to_string(),
                }
            } else {
                CoreError::from(err)
            }
        })?;

        if !validation.is_authorized() {
            return Err(CoreError::AuthorizationDenied {
                status: validation
                    .auth_status
                    .unwrap_or_else(|| "<missing>".to_owned()),
            });
        }

        info!(base_url = %client.base_url(), "session authenticated");
        Ok(Self { client })
    }

    pub fn client(&self) -> &SecurityManagerClient {
        &self.client
    }
}
