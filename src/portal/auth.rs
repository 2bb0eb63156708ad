use log::{debug, info, warn};

use crate::errors::PortalError;
use super::{Credentials, PortalResponse, PortalTransport};

/// Marker that only appears in the portal's login form
///
/// Seeing it in the login response means the portal sent the form back.
pub const DEFAULT_LOGIN_FORM_MARKER: &str = "auth_un";

/// Result of inspecting the login response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The portal accepted the credentials
    Authenticated,
    /// The portal answered, but not with a logged-in page
    Rejected(String),
}

impl LoginOutcome {
    /// Classify a login response
    pub fn from_response(response: &PortalResponse, login_form_marker: &str) -> Self {
        if !response.is_success() {
            return Self::Rejected(format!("login returned HTTP {}", response.status));
        }

        if !login_form_marker.is_empty() && response.body.contains(login_form_marker) {
            return Self::Rejected("portal returned the login form, credentials rejected".to_string());
        }

        Self::Authenticated
    }
}

/// Transport that has completed the priming and login steps
///
/// Station selection only accepts this type.
#[derive(Debug)]
pub struct AuthenticatedSession<T: PortalTransport> {
    transport: T,
    user: String,
    outcome: LoginOutcome,
}

impl<T: PortalTransport> AuthenticatedSession<T> {
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// How the login response was classified
    pub fn outcome(&self) -> &LoginOutcome {
        &self.outcome
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}

/// Two-step session authenticator
///
/// The first POST carries no body and only exists to receive the session
/// cookie; the second POST sends the credentials on the same session.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    auth_url: String,
    credentials: Credentials,
    strict: bool,
    login_form_marker: String,
}

impl SessionAuthenticator {
    /// Create a strict authenticator for the given endpoint
    pub fn new(auth_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            auth_url: auth_url.into(),
            credentials,
            strict: true,
            login_form_marker: DEFAULT_LOGIN_FORM_MARKER.to_string(),
        }
    }

    /// Whether a rejected login is an error (true) or only a warning (false)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the text that identifies the login form in a response body
    pub fn login_form_marker(mut self, marker: impl Into<String>) -> Self {
        self.login_form_marker = marker.into();
        self
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Prime the session, log in and hand back the authenticated session
    pub async fn authenticate<T: PortalTransport>(&self, transport: T) -> Result<AuthenticatedSession<T>, PortalError> {
        // The login call must present the cookie set here
        let primed = transport.prime(&self.auth_url).await?;
        debug!("Priming request answered with HTTP {}", primed.status);

        let response = transport
            .post_form(&self.auth_url, &self.credentials.to_form())
            .await?;

        let outcome = LoginOutcome::from_response(&response, &self.login_form_marker);
        match &outcome {
            LoginOutcome::Authenticated => {
                info!("Logged in as {}", self.credentials.user());
            }
            LoginOutcome::Rejected(reason) if self.strict => {
                return Err(PortalError::AuthenticationError(format!(
                    "{} (user '{}')",
                    reason,
                    self.credentials.user()
                )));
            }
            LoginOutcome::Rejected(reason) => {
                warn!("Login as {} may have failed: {}", self.credentials.user(), reason);
            }
        }

        Ok(AuthenticatedSession {
            transport,
            user: self.credentials.user().to_string(),
            outcome,
        })
    }
}
