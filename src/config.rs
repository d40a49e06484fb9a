use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub const DEFAULT_STORE_PATH: &str = "projects_info.json";
pub const DEFAULT_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:1b";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
pub const API_KEY_ENV: &str = "OLLAMA_API_KEY";

/// Everything a scan needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub store_path: PathBuf,
    pub host: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Upper bound on projects analyzed at the same time.
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            host: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            concurrency: default_concurrency(),
            show_progress: true,
        }
    }
}

impl ScanConfig {
    /// Reads the API key from the process environment, treating blank as unset.
    pub fn api_key_from_env() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

pub fn default_concurrency() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
