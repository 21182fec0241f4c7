// Runtime configuration

use std::path::{Path, PathBuf};

const APP_NAME: &str = "tasktrack";
const STORE_FILE: &str = "tasks.json";

/// Environment variable naming the store file
pub const STORE_ENV: &str = "TASKTRACK_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
}

impl Config {
    /// Use `store_path` if given, otherwise the per-user default
    pub fn resolve(store_path: Option<&Path>) -> Self {
        Self {
            store_path: store_path
                .map(Path::to_path_buf)
                .unwrap_or_else(default_store_path),
        }
    }
}

/// `<data dir>/tasktrack/tasks.json`, or `./tasks.json` without a data dir
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME).join(STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE))
}
