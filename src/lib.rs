/*!
 * # hinet-selector - Hi-net/F-net station selector
 *
 * A Rust library for choosing which NIED Hi-net or F-net stations are
 * enabled for continuous waveform download on the Hi-net web portal.
 *
 * ## Features
 *
 * - Session based login: a cookie priming request followed by the
 *   credentialed login on the same session
 * - Login outcome checking, strict by default
 * - Station selection for Hi-net (`0101`) and F-net (`0103`) from a plain
 *   text station list, or all stations of the network
 * - Certificate relaxation scoped to the priming request only
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `network`: Network codes and names
 * - `station_list`: Station list file parsing
 * - `portal`: Portal client:
 *   - `portal::session`: Cookie-bearing HTTP session
 *   - `portal::auth`: Priming and login handshake
 *   - `portal::select`: Station selection request
 * - `app_controller`: Main application controller
 * - `file_utils`: Reading list and config files, writing the config template
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod network;
pub mod portal;
pub mod station_list;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, SelectOptions};
pub use errors::{AppError, PortalError, SelectionError};
pub use network::NetworkCode;
pub use portal::{Credentials, PortalSession, PortalTransport, SelectionReport, SessionAuthenticator, StationSelectionRequest};
pub use station_list::StationList;
