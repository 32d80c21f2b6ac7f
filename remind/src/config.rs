//! Configuration for the remind CLI.
//!
//! Every value has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable.

use std::path::PathBuf;

const DEFAULT_CONFIG_DIR: &str = ".config/remind/data";
const DEV_DATA_DIR: &str = "./data";

/// Default HTTP timeout for backend calls (in seconds).
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// Get the data directory for persistence.
///
/// Priority:
/// 1. `REMIND_DATA_DIR` env variable if set
/// 2. `$HOME/.config/remind/data` if HOME is set
/// 3. `./data` as fallback
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("REMIND_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DEFAULT_CONFIG_DIR);
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Base URL of the remote backend. `None` disables mirroring.
pub fn get_backend_url() -> Option<String> {
    std::env::var("REMIND_BACKEND_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Get the backend HTTP timeout in seconds.
///
/// Priority:
/// 1. `REMIND_BACKEND_TIMEOUT_SECS` env variable if set (falls back to default
///    if the value cannot be parsed as a `u64`)
/// 2. `10` seconds as fallback
pub fn get_backend_timeout_secs() -> u64 {
    if let Ok(timeout) = std::env::var("REMIND_BACKEND_TIMEOUT_SECS") {
        return timeout.parse().unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS);
    }

    DEFAULT_BACKEND_TIMEOUT_SECS
}

/// Directory for the rolling log files. Defaults to `<data dir>/logs`.
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("REMIND_LOG_DIR") {
        return PathBuf::from(dir);
    }

    get_data_dir().join("logs")
}

/// File holding the logged-in actor. Defaults to `<data dir>/session.json`.
pub fn get_session_path() -> PathBuf {
    if let Ok(path) = std::env::var("REMIND_SESSION_PATH") {
        return PathBuf::from(path);
    }

    get_data_dir().join("session.json")
}
