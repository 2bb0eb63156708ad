use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SelectionError;

/// Seismic networks whose station selection can be changed on the portal
///
/// Only two networks are driven through the selection page; any other
/// code is rejected before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkCode {
    // @network: 0101
    #[serde(rename = "0101")]
    HiNet,
    // @network: 0103
    #[serde(rename = "0103")]
    FNet,
}

impl NetworkCode {
    /// All network codes accepted by the selection page
    pub const ALL: [NetworkCode; 2] = [NetworkCode::HiNet, NetworkCode::FNet];

    // @returns: Code sent as the `net` form field
    pub fn code(&self) -> &'static str {
        match self {
            Self::HiNet => "0101",
            Self::FNet => "0103",
        }
    }

    // @returns: Human readable network name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HiNet => "Hi-net",
            Self::FNet => "F-net",
        }
    }
}

impl fmt::Display for NetworkCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for NetworkCode {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact match only, padded codes are not the same code
        match s {
            "0101" => Ok(Self::HiNet),
            "0103" => Ok(Self::FNet),
            other => Err(SelectionError::InvalidNetworkCode(other.to_string())),
        }
    }
}
