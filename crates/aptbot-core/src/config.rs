use std::path::PathBuf;

pub const SOURCE_ENV: &str = "APTBOT_SOURCE";
pub const SNAPSHOT_ENV: &str = "APTBOT_SNAPSHOT";

/// Environment-supplied defaults for the build and serve paths. Callers
/// (the CLI) let explicit flags take precedence.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub source_path: Option<PathBuf>,
    pub snapshot_path: Option<PathBuf>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            source_path: non_empty(std::env::var(SOURCE_ENV).ok()).map(PathBuf::from),
            snapshot_path: non_empty(std::env::var(SNAPSHOT_ENV).ok()).map(PathBuf::from),
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
