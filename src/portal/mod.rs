/*!
 * Portal client for the NIED Hi-net web site.
 *
 * This module contains everything needed to change the station selection:
 * - `session`: cookie-bearing HTTP session backed by reqwest
 * - `auth`: the two-step priming and login handshake
 * - `select`: the station selection form and its submission
 */

use async_trait::async_trait;
use std::fmt;

use crate::errors::PortalError;

pub mod auth;
pub mod select;
pub mod session;

pub use auth::{AuthenticatedSession, SessionAuthenticator};
pub use select::{SelectionCount, SelectionPayload, SelectionReport, StationSelectionRequest};
pub use session::PortalSession;

/// Form fields in the order they are sent
pub type FormFields = Vec<(&'static str, String)>;

/// Response data the portal workflow looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl PortalResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status code is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by the portal workflow
///
/// Implementations must keep cookie state across calls: the login call has
/// to present whatever cookie the priming call received.
#[async_trait]
pub trait PortalTransport: Send + Sync {
    /// POST with an empty body, only to collect session cookies
    ///
    /// # Arguments
    /// * `url` - The authentication endpoint
    async fn prime(&self, url: &str) -> Result<PortalResponse, PortalError>;

    /// POST form-encoded fields
    ///
    /// # Arguments
    /// * `url` - The endpoint to post to
    /// * `form` - Field names and values, sent in order
    async fn post_form(&self, url: &str, form: &[(&'static str, String)]) -> Result<PortalResponse, PortalError>;
}

/// Portal account credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Form field carrying the user name
    pub const USER_FIELD: &'static str = "auth_un";
    /// Form field carrying the password
    pub const PASSWORD_FIELD: &'static str = "auth_pw";

    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Login form fields
    pub fn to_form(&self) -> FormFields {
        vec![
            (Self::USER_FIELD, self.user.clone()),
            (Self::PASSWORD_FIELD, self.password.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}
