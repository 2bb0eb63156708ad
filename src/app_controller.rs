use log::{debug, info};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::network::NetworkCode;
use crate::portal::{PortalSession, PortalTransport, SelectionReport, SessionAuthenticator, StationSelectionRequest};
use crate::station_list::StationList;

// @module: Application controller for station selection

/// Options for a single selection run
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Network code as given on the command line
    pub network_code: String,
    /// Optional station list file; absent selects every station
    pub station_list: Option<PathBuf>,
    /// Build and log the request without contacting the portal
    pub dry_run: bool,
}

/// Main application controller for station selection
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    // The account is checked later, dry runs do not need one
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate_endpoints()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a selection against the configured portal
    pub async fn run(&self, options: &SelectOptions) -> Result<SelectionReport, AppError> {
        // Validate inputs before a connection exists
        let request = self.prepare(options)?;
        if options.dry_run {
            return Ok(Self::dry_run(&request));
        }

        self.config.validate_account()?;
        let session = PortalSession::new(&self.config.session_options())?;
        self.execute(session, &request).await
    }

    /// Run a selection over the given transport
    pub async fn run_with_transport<T: PortalTransport>(
        &self,
        transport: T,
        options: &SelectOptions,
    ) -> Result<SelectionReport, AppError> {
        let request = self.prepare(options)?;
        if options.dry_run {
            return Ok(Self::dry_run(&request));
        }

        self.config.validate_account()?;
        self.execute(transport, &request).await
    }

    /// Validate the network code and load the station list
    pub fn prepare(&self, options: &SelectOptions) -> Result<StationSelectionRequest, AppError> {
        let network: NetworkCode = options.network_code.parse()?;

        let stations = match &options.station_list {
            Some(path) => {
                let list = StationList::load(path)?;
                debug!("Loaded {} stations from {}", list.len(), path.display());
                Some(list)
            }
            None => None,
        };

        Ok(StationSelectionRequest::new(network, stations))
    }

    fn dry_run(request: &StationSelectionRequest) -> SelectionReport {
        let payload = request.payload();
        info!(
            "Dry run, not contacting the portal: net={} stcds={} mode={}",
            payload.net,
            payload.stcds.as_deref().unwrap_or("<all>"),
            payload.mode
        );
        request.report()
    }

    async fn execute<T: PortalTransport>(
        &self,
        transport: T,
        request: &StationSelectionRequest,
    ) -> Result<SelectionReport, AppError> {
        let authenticator = SessionAuthenticator::new(self.config.urls.auth.clone(), self.config.credentials())
            .strict(self.config.auth.strict)
            .login_form_marker(self.config.auth.login_form_marker.clone());

        let session = authenticator.authenticate(transport).await?;
        let report = request.submit(&session, &self.config.urls.select).await?;

        Ok(report)
    }
}
