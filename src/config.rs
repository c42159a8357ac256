/// Application settings
///
/// Endpoints are literal constants. `Config` gathers them with the
/// storage location so the app and tests can pass their own values.
use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the portfolio API
pub const API_BASE_URL: &str = "http://localhost:5678";

/// How long the "photo added" indicator stays before the modal closes
pub const SUCCESS_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub success_delay: Duration,
}

impl Config {
    /// Default settings, with the store in the user's data directory:
    /// - Linux: ~/.local/share/portfolio-editor/storage.db
    /// - macOS: ~/Library/Application Support/portfolio-editor/storage.db
    /// - Windows: %APPDATA%\portfolio-editor\storage.db
    pub fn new() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            storage_path: Self::default_storage_path(),
            success_delay: SUCCESS_DELAY,
        }
    }

    fn default_storage_path() -> PathBuf {
        // Fall back to the working directory when no home can be found
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("portfolio-editor");
        path.push("storage.db");
        path
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
