use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use find_projects::config::{self, ScanConfig};
use find_projects::error::Result;
use find_projects::{ChatClient, ChatClientConfig, ProjectAnalyzer, ProjectRecord, ProjectScanner};

pub const COMPLETION_MESSAGE: &str = "Project information updated in JSON.";

/// Scans all project directories inside the specified parent directory and
/// uses a local language model to summarize each project.
#[derive(Parser, Debug)]
#[command(name = "find-projects")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Replace projects_info.json with a fresh catalogue of ~/code
    find-projects ~/code

    # Add another folder's projects to the existing catalogue
    find-projects ~/work --append

    # Use a different model and store file
    find-projects ~/code --model llama3.1:8b --store catalogue.json
"#)]
pub struct Cli {
    /// Directory whose immediate subdirectories are the projects to scan
    #[arg(value_parser = existing_dir)]
    pub parent_directory: PathBuf,

    /// Append to the existing JSON file instead of replacing it
    #[arg(long)]
    pub append: bool,

    /// Path to the JSON store
    #[arg(long, env = "FIND_PROJECTS_STORE", default_value = config::DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Base URL of the Ollama server
    #[arg(long, env = "OLLAMA_HOST", default_value = config::DEFAULT_HOST)]
    pub host: String,

    /// Model used for summaries
    #[arg(long, env = "FIND_PROJECTS_MODEL", default_value = config::DEFAULT_MODEL)]
    pub model: String,

    /// Maximum number of projects analyzed at once (defaults to available CPUs)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Timeout for each model request, in seconds
    #[arg(long, default_value = "300")]
    pub timeout_secs: u64,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn existing_dir(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else if path.exists() {
        Err(format!("'{}' is not a directory", value))
    } else {
        Err(format!("Path '{}' does not exist", value))
    }
}

impl Cli {
    pub fn scan_config(&self) -> ScanConfig {
        let defaults = ScanConfig::default();
        ScanConfig {
            store_path: self.store.clone(),
            host: self.host.clone(),
            model: self.model.clone(),
            api_key: ScanConfig::api_key_from_env(),
            timeout: Duration::from_secs(self.timeout_secs),
            concurrency: self.concurrency.unwrap_or(defaults.concurrency).max(1),
            show_progress: !self.no_progress,
        }
    }
}

pub async fn analyze_projects(cli: &Cli) -> Result<Vec<ProjectRecord>> {
    let config = cli.scan_config();
    let client = ChatClient::new(ChatClientConfig::from(&config))?;
    tracing::info!("Using model {} at {}", client.model(), config.host);

    let analyzer = ProjectAnalyzer::new(Arc::new(client));
    let mut scanner = ProjectScanner::new(analyzer, &config);
    let records = scanner.scan(&cli.parent_directory, cli.append).await?;

    println!("{}", COMPLETION_MESSAGE);
    Ok(records)
}
