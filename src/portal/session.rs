use async_trait::async_trait;
use log::{debug, warn};
use reqwest::cookie::Jar;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::PortalError;
use super::{PortalResponse, PortalTransport};

/// Options for building a portal session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Skip certificate validation for the priming call only
    pub accept_invalid_certs_on_priming: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            accept_invalid_certs_on_priming: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Cookie-bearing HTTP session with the portal
///
/// Two reqwest clients share one cookie jar. The priming client may be
/// configured to accept the portal's certificate as-is; every other call
/// goes through the validating client.
pub struct PortalSession {
    /// Cookie jar shared by both clients
    jar: Arc<Jar>,
    /// Client used for the cookie priming call
    priming_client: Client,
    /// Client used for login and selection
    client: Client,
}

impl PortalSession {
    /// Create a new session with the given options
    pub fn new(options: &SessionOptions) -> Result<Self, PortalError> {
        let jar = Arc::new(Jar::default());

        if options.accept_invalid_certs_on_priming {
            warn!("Certificate validation is disabled for the priming request");
        }

        let priming_client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .danger_accept_invalid_certs(options.accept_invalid_certs_on_priming)
            .timeout(options.timeout)
            .build()
            .map_err(|e| PortalError::ClientBuild(e.to_string()))?;

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(options.timeout)
            .build()
            .map_err(|e| PortalError::ClientBuild(e.to_string()))?;

        Ok(Self {
            jar,
            priming_client,
            client,
        })
    }

    /// Cookie header the session would present to `url`, if any
    pub fn cookies_for(&self, url: &str) -> Option<String> {
        use reqwest::cookie::CookieStore;

        let url = reqwest::Url::parse(url).ok()?;
        self.jar
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    async fn into_portal_response(response: Response) -> Result<PortalResponse, PortalError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(PortalResponse { status, body })
    }
}

impl std::fmt::Debug for PortalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalSession").finish_non_exhaustive()
    }
}

#[async_trait]
impl PortalTransport for PortalSession {
    async fn prime(&self, url: &str) -> Result<PortalResponse, PortalError> {
        debug!("Requesting session cookie from {}", url);
        let response = self.priming_client.post(url).send().await?;
        Self::into_portal_response(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&'static str, String)]) -> Result<PortalResponse, PortalError> {
        let field_names: Vec<&str> = form.iter().map(|(name, _)| *name).collect();
        debug!("Posting form fields {:?} to {}", field_names, url);

        let response = self.client.post(url).form(form).send().await?;
        Self::into_portal_response(response).await
    }
}
