use log::{debug, error, info};
use serde::Serialize;
use std::fmt;

use crate::errors::PortalError;
use crate::network::NetworkCode;
use crate::station_list::StationList;
use super::{AuthenticatedSession, FormFields, PortalTransport};

/// Value of the `mode` field: select stations by the given filter
pub const SELECT_MODE: &str = "1";

/// Number of stations a selection covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCount {
    /// Every station of the network
    All,
    /// An explicit list of this many stations
    Stations(usize),
}

impl fmt::Display for SelectionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Stations(n) => write!(f, "{}", n),
        }
    }
}

/// Station selection form body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionPayload {
    /// Network code
    pub net: String,

    /// Colon-joined station codes, absent to select all stations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stcds: Option<String>,

    /// Selection mode, always "1"
    pub mode: String,
}

impl SelectionPayload {
    /// Form fields in wire order; `stcds` is left out when absent
    pub fn to_form(&self) -> FormFields {
        let mut form = vec![("net", self.net.clone())];
        if let Some(stcds) = &self.stcds {
            form.push(("stcds", stcds.clone()));
        }
        form.push(("mode", self.mode.clone()));
        form
    }
}

/// Outcome of a submitted selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionReport {
    pub network: NetworkCode,
    pub count: SelectionCount,
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stations selected for {}.",
            self.count,
            self.network.display_name()
        )
    }
}

/// Station selection request for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSelectionRequest {
    network: NetworkCode,
    stations: Option<StationList>,
}

impl StationSelectionRequest {
    /// Create a request; `None` selects all stations of the network
    pub fn new(network: NetworkCode, stations: Option<StationList>) -> Self {
        Self { network, stations }
    }

    pub fn network(&self) -> NetworkCode {
        self.network
    }

    pub fn count(&self) -> SelectionCount {
        match &self.stations {
            Some(list) => SelectionCount::Stations(list.len()),
            None => SelectionCount::All,
        }
    }

    /// Build the form body for this request
    pub fn payload(&self) -> SelectionPayload {
        SelectionPayload {
            net: self.network.code().to_string(),
            stcds: self.stations.as_ref().map(StationList::joined),
            mode: SELECT_MODE.to_string(),
        }
    }

    /// Report this request would produce, without sending anything
    pub fn report(&self) -> SelectionReport {
        SelectionReport {
            network: self.network,
            count: self.count(),
        }
    }

    /// Submit the selection on an authenticated session
    pub async fn submit<T: PortalTransport>(
        &self,
        session: &AuthenticatedSession<T>,
        select_url: &str,
    ) -> Result<SelectionReport, PortalError> {
        let payload = self.payload();
        debug!(
            "Selecting {} stations for {} as {}",
            self.count(),
            self.network.display_name(),
            session.user()
        );

        let response = session
            .transport()
            .post_form(select_url, &payload.to_form())
            .await?;

        if !response.is_success() {
            error!("Station selection failed with HTTP {}", response.status);
            return Err(PortalError::ApiError {
                status_code: response.status,
                message: response.body,
            });
        }

        let report = self.report();
        info!("{}", report);
        Ok(report)
    }
}
