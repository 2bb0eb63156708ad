/*!
 * Tests for the priming and login handshake
 */

use hinet_selector::errors::PortalError;
use hinet_selector::portal::auth::LoginOutcome;
use hinet_selector::portal::{Credentials, SessionAuthenticator};
use crate::common::{self, mock_portal::{FailAt, MockPortal, RecordedCall}};

fn authenticator() -> SessionAuthenticator {
    SessionAuthenticator::new(common::AUTH_URL, Credentials::new("tester", "hunter2"))
}

/// Priming comes first, then the login form, both on the auth URL
#[tokio::test]
async fn test_authenticate_withWorkingPortal_shouldPrimeThenLogin() {
    common::init_logging();
    let portal = MockPortal::working(common::AUTH_URL);

    let session = authenticator()
        .authenticate(portal.clone())
        .await
        .expect("login should succeed");

    assert_eq!(session.outcome(), &LoginOutcome::Authenticated);
    assert_eq!(session.user(), "tester");

    let calls = portal.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], RecordedCall::Prime { url: common::AUTH_URL.to_string() });
    assert_eq!(
        calls[1],
        RecordedCall::Form {
            url: common::AUTH_URL.to_string(),
            fields: vec![
                ("auth_un".to_string(), "tester".to_string()),
                ("auth_pw".to_string(), "hunter2".to_string()),
            ],
        }
    );
}

/// The returned session wraps the very transport that was primed
#[tokio::test]
async fn test_authenticate_shouldReturnSameTransport() {
    let portal = MockPortal::working(common::AUTH_URL);
    let session = authenticator().authenticate(portal.clone()).await.unwrap();

    let inner = session.into_inner();
    assert_eq!(inner.call_count(), 2);
    assert_eq!(portal.call_count(), 2);
}

#[tokio::test]
async fn test_authenticate_withRejectedLogin_shouldFailWhenStrict() {
    let portal = MockPortal::rejecting_login(common::AUTH_URL);

    let result = authenticator().authenticate(portal.clone()).await;

    match result {
        Err(PortalError::AuthenticationError(message)) => assert!(message.contains("tester")),
        other => panic!("expected AuthenticationError, got {:?}", other.map(|_| ())),
    }
    assert_eq!(portal.call_count(), 2);
}

/// Non-strict mode keeps the legacy behaviour: warn and carry on
#[tokio::test]
async fn test_authenticate_withRejectedLogin_shouldContinueWhenLenient() {
    common::init_logging();
    let portal = MockPortal::rejecting_login(common::AUTH_URL);

    let session = authenticator()
        .strict(false)
        .authenticate(portal)
        .await
        .expect("lenient login never fails on the outcome");

    assert!(matches!(session.outcome(), LoginOutcome::Rejected(_)));
}

/// A failed priming call stops the handshake before credentials are sent
#[tokio::test]
async fn test_authenticate_withPrimingFailure_shouldNotSendCredentials() {
    let portal = MockPortal::working(common::AUTH_URL).failing_at(FailAt::Prime);

    let result = authenticator().authenticate(portal.clone()).await;

    assert!(matches!(result, Err(PortalError::ConnectionError(_))));
    let calls = portal.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls.iter().all(|call| call.field("auth_pw").is_none()));
}

#[tokio::test]
async fn test_authenticate_withLoginTransportFailure_shouldPropagate() {
    let portal = MockPortal::working(common::AUTH_URL).failing_at(FailAt::Login);

    let result = authenticator().authenticate(portal).await;
    assert!(matches!(result, Err(PortalError::ConnectionError(_))));
}

/// A custom marker replaces the default login form detection
#[tokio::test]
async fn test_authenticate_withCustomMarker_shouldUseIt() {
    let portal = MockPortal::rejecting_login(common::AUTH_URL);

    let session = authenticator()
        .login_form_marker("Login Failed")
        .authenticate(portal)
        .await;

    assert!(session.is_ok());
}
