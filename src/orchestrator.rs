use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::analyzer::ProjectAnalyzer;
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::record::ProjectRecord;
use crate::scanner::ScanProgress;
use crate::store::JsonStore;

/// Immediate subdirectories of `parent`, in enumeration order.
pub fn list_project_dirs(parent: &Path) -> Result<Vec<PathBuf>> {
    if !parent.is_dir() {
        return Err(ScanError::InvalidInput(format!(
            "{} is not a directory",
            parent.display()
        )));
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(parent).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => ScanError::Io(io),
            None => ScanError::InvalidInput("filesystem loop while listing projects".to_string()),
        })?;
        // `path().is_dir()` follows symlinked project folders
        if entry.path().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Scans every project folder under a parent directory and persists one
/// record per project.
pub struct ProjectScanner {
    analyzer: ProjectAnalyzer,
    store: JsonStore,
    concurrency: usize,
    progress: ScanProgress,
}

impl ProjectScanner {
    pub fn new(analyzer: ProjectAnalyzer, config: &ScanConfig) -> Self {
        let progress = if config.show_progress {
            ScanProgress::visible()
        } else {
            ScanProgress::hidden()
        };

        Self {
            analyzer,
            store: JsonStore::new(config.store_path.clone()),
            concurrency: config.concurrency.max(1),
            progress,
        }
    }

    pub fn progress(&self) -> &ScanProgress {
        &self.progress
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Runs one scan. Records are persisted and returned in completion order.
    ///
    /// Without `append` the store is cleared first. Per-project failures are
    /// recorded, not returned; only enumeration and store errors abort.
    pub async fn scan(&mut self, parent: &Path, append: bool) -> Result<Vec<ProjectRecord>> {
        let project_dirs = list_project_dirs(parent)?;

        if !append {
            self.store.reset()?;
        }

        info!(
            "Scanning {} project directories under {}",
            project_dirs.len(),
            parent.display()
        );
        self.progress.start(project_dirs.len());

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut task_dirs = HashMap::new();
        for dir in project_dirs {
            let analyzer = self.analyzer.clone();
            let semaphore = semaphore.clone();
            let task_dir = dir.clone();
            let handle = tasks.spawn(async move {
                // The semaphore is never closed
                let _permit = semaphore.acquire_owned().await.ok();
                analyzer.analyze(&task_dir).await
            });
            task_dirs.insert(handle.id(), dir);
        }

        let mut results = Vec::new();
        while let Some(joined) = tasks.join_next_with_id().await {
            let record = match joined {
                Ok((id, record)) => {
                    task_dirs.remove(&id);
                    record
                }
                Err(e) => {
                    let Some(dir) = task_dirs.remove(&e.id()) else {
                        warn!("Project analysis task failed: {}", e);
                        self.progress.inc_failed();
                        continue;
                    };
                    warn!("Analysis of {} failed: {}", dir.display(), e);
                    ProjectRecord::failed(&dir, format!("An error occurred: {}", e))
                }
            };

            // Only this loop writes to the store, one record at a time
            self.store.append(&record)?;
            if record.is_failure() {
                self.progress.inc_failed();
            } else {
                self.progress.inc_analyzed();
            }
            results.push(record);
        }

        self.progress.finish();
        let snapshot = self.progress.snapshot();
        info!(
            "Scan finished: {} analyzed, {} failed in {} ms",
            snapshot.analyzed, snapshot.failed, snapshot.elapsed_ms
        );

        Ok(results)
    }
}
