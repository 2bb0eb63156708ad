/*!
 * Common test utilities for the hinet-selector test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use hinet_selector::app_config::Config;


pub const AUTH_URL: &str = "https://portal.example.test/auth/";
pub const SELECT_URL: &str = "https://portal.example.test/auth/select_stations.php";

/// Route library logs through env_logger once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Valid configuration pointing at the mock portal URLs
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.urls.auth = AUTH_URL.to_string();
    config.urls.select = SELECT_URL.to_string();
    config.account.user = "tester".to_string();
    config.account.password = "hunter2".to_string();
    config
}
