/*!
 * Tests for building and submitting the station selection
 */

use hinet_selector::errors::PortalError;
use hinet_selector::network::NetworkCode;
use hinet_selector::portal::{Credentials, SelectionCount, SessionAuthenticator, StationSelectionRequest};
use hinet_selector::station_list::StationList;
use crate::common::{self, mock_portal::{FailAt, MockPortal}};

async fn logged_in(portal: &MockPortal) -> hinet_selector::portal::AuthenticatedSession<MockPortal> {
    SessionAuthenticator::new(common::AUTH_URL, Credentials::new("tester", "hunter2"))
        .authenticate(portal.clone())
        .await
        .expect("mock login succeeds")
}

/// The mode field never changes, whatever else is selected
#[test]
fn test_payload_mode_shouldAlwaysBeOne() {
    let lists = [
        None,
        Some(StationList::parse("N.AAAA")),
        Some(StationList::parse("N.AAAA\nN.BBBB\nN.CCCC")),
    ];

    for network in NetworkCode::ALL {
        for list in lists.iter().cloned() {
            let payload = StationSelectionRequest::new(network, list).payload();
            assert_eq!(payload.mode, "1");
            assert_eq!(payload.net, network.code());
        }
    }
}

#[tokio::test]
async fn test_submit_withoutList_shouldOmitStcds() {
    common::init_logging();
    let portal = MockPortal::working(common::AUTH_URL);
    let session = logged_in(&portal).await;

    let report = StationSelectionRequest::new(NetworkCode::HiNet, None)
        .submit(&session, common::SELECT_URL)
        .await
        .expect("selection succeeds");

    assert_eq!(report.count, SelectionCount::All);
    assert_eq!(report.to_string(), "All stations selected for Hi-net.");

    let calls = portal.calls();
    let select = calls.last().unwrap();
    assert_eq!(select.url(), common::SELECT_URL);
    assert_eq!(select.field("net"), Some("0101"));
    assert_eq!(select.field("stcds"), None);
    assert_eq!(select.field("mode"), Some("1"));
}

#[tokio::test]
async fn test_submit_withList_shouldSendJoinedStations() {
    let portal = MockPortal::working(common::AUTH_URL);
    let session = logged_in(&portal).await;
    let list = StationList::parse("X.1111\nY.2222\n");

    let report = StationSelectionRequest::new(NetworkCode::FNet, Some(list))
        .submit(&session, common::SELECT_URL)
        .await
        .expect("selection succeeds");

    assert_eq!(report.count, SelectionCount::Stations(2));
    assert_eq!(report.to_string(), "2 stations selected for F-net.");

    let calls = portal.calls();
    let select = calls.last().unwrap();
    assert_eq!(select.field("net"), Some("0103"));
    assert_eq!(select.field("stcds"), Some("X.1111:Y.2222"));
    assert_eq!(select.field("mode"), Some("1"));
}

/// An empty list is not "all": stcds is sent, but empty
#[tokio::test]
async fn test_submit_withEmptyList_shouldSendEmptyStations() {
    let portal = MockPortal::working(common::AUTH_URL);
    let session = logged_in(&portal).await;

    let report = StationSelectionRequest::new(NetworkCode::HiNet, Some(StationList::parse("# none\n")))
        .submit(&session, common::SELECT_URL)
        .await
        .expect("selection succeeds");

    assert_eq!(report.count, SelectionCount::Stations(0));
    assert_eq!(report.to_string(), "0 stations selected for Hi-net.");

    let calls = portal.calls();
    let select = calls.last().unwrap();
    assert_eq!(select.field("stcds"), Some(""));
    assert_eq!(select.field("mode"), Some("1"));
}

#[tokio::test]
async fn test_submit_withServerError_shouldReportApiError() {
    let portal = MockPortal::working(common::AUTH_URL).with_select_status(500, "Internal Server Error");
    let session = logged_in(&portal).await;

    let result = StationSelectionRequest::new(NetworkCode::HiNet, None)
        .submit(&session, common::SELECT_URL)
        .await;

    match result {
        Err(PortalError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_withTransportFailure_shouldPropagate() {
    let portal = MockPortal::working(common::AUTH_URL).failing_at(FailAt::Select);
    let session = logged_in(&portal).await;

    let result = StationSelectionRequest::new(NetworkCode::HiNet, None)
        .submit(&session, common::SELECT_URL)
        .await;

    assert!(matches!(result, Err(PortalError::ConnectionError(_))));
    assert_eq!(portal.call_count(), 3);
}
