// Runtime configuration. The only setting is where the roster is persisted.

use std::path::{Path, PathBuf};

/// File used when `ENROLLMENTS_FILE` is not set.
pub const DEFAULT_FILE_NAME: &str = "Enrollments.json";

/// Environment variable that overrides the data file location.
pub const FILE_ENV_VAR: &str = "ENROLLMENTS_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_file: PathBuf,
}

impl Config {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Create a Config from the environment variable `ENROLLMENTS_FILE`
    /// or fall back to `Enrollments.json` in the working directory.
    pub fn from_env() -> Self {
        let data_file = std::env::var_os(FILE_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));
        Self { data_file }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}
