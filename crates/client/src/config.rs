//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::SaveFormat;

const APPLICATION: &str = "adventure";

/// Where the client keeps saves and logs, and how it names this session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    pub session_id: String,
    pub save_format: SaveFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
            log_dir: default_log_dir(),
            session_id: default_session_id(),
            save_format: SaveFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ADVENTURE_SAVE_DIR` - Directory for save slots (default: platform data dir)
    /// - `ADVENTURE_LOG_DIR` - Directory for session logs (default: platform cache dir)
    /// - `ADVENTURE_SESSION_ID` - Session name, also the default save slot
    ///   (default: `session_<timestamp>`)
    /// - `ADVENTURE_SAVE_FORMAT` - `json` or `binary` (default: json)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("ADVENTURE_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os("ADVENTURE_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(id) = env::var("ADVENTURE_SESSION_ID")
            .ok()
            .filter(|id| runtime::repository::is_valid_slot(id))
        {
            config.session_id = id;
        }
        match env::var("ADVENTURE_SAVE_FORMAT").ok().map(|v| v.parse()) {
            Some(Ok(format)) => config.save_format = format,
            Some(Err(message)) => tracing::warn!("ignoring ADVENTURE_SAVE_FORMAT: {message}"),
            None => {}
        }

        config
    }
}

/// Platform data directory, e.g. `~/.local/share/adventure/saves`.
fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("saves")
}

/// Platform cache directory, e.g. `~/.cache/adventure/logs`.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| env::temp_dir().join(APPLICATION))
        .join("logs")
}

fn default_session_id() -> String {
    format!("session_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}
