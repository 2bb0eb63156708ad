use std::path::Path;

use crate::errors::SelectionError;
use crate::file_utils::FileManager;

/// Station list module
/// This module reads the plain text list of stations to enable on the portal.
/// One station code per line in the `X.XXXX` form, lines starting with `#`
/// are comments. Codes are not checked against any network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StationList {
    /// Station codes in file order
    stations: Vec<String>,
}

impl StationList {
    /// Parse list file contents
    ///
    /// A line is a comment only when `#` is its very first character. Other
    /// lines are trimmed and dropped when nothing is left.
    pub fn parse(content: &str) -> Self {
        let stations = content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self { stations }
    }

    /// Load and parse a list file
    ///
    /// A file with no station in it yields an empty list; the portal then
    /// receives an empty `stcds` and selects nothing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SelectionError> {
        let path = path.as_ref();
        let content = FileManager::read_text(path).map_err(|e| {
            SelectionError::StationListUnreadable {
                path: path.display().to_string(),
                reason: format!("{:#}", e),
            }
        })?;

        Ok(Self::parse(&content))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Join station codes the way the selection form expects them
    pub fn joined(&self) -> String {
        self.stations.join(":")
    }
}

impl<S: Into<String>> FromIterator<S> for StationList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            stations: iter.into_iter().map(Into::into).collect(),
        }
    }
}
