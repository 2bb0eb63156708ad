use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: Station list and configuration file access

// Editors on Windows like to prepend this to plain text files
const UTF8_BOM: char = '\u{feff}';

// @struct: File helpers for list and config files
pub struct FileManager;

impl FileManager {
    /// Read a station list or config file as text
    ///
    /// A leading UTF-8 byte order mark is dropped, otherwise it would stick
    /// to the first station code or break the JSON parser.
    pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        Ok(match content.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => content,
        })
    }

    // @returns: First candidate that is an existing regular file
    pub fn first_existing<I>(candidates: I) -> Option<PathBuf>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        candidates.into_iter().find(|path| path.is_file())
    }

    /// Write `content` to `path` unless the file exists and `overwrite` is off
    ///
    /// Missing parent directories are created, since the per-user config
    /// directory usually does not exist before the first `init-config`.
    /// Returns whether the file was written.
    pub fn write_new<P: AsRef<Path>>(path: P, content: &str, overwrite: bool) -> Result<bool> {
        let path = path.as_ref();
        if path.is_file() && !overwrite {
            return Ok(false);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(true)
    }
}
