//! Per-project analysis: gather the description and tree, ask the model
//! for a summary, and fold every failure into a [`ProjectRecord`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Result, ScanError};
use crate::llm::{ChatMessage, ChatModel};
use crate::record::{ProjectRecord, ProjectSummary, NO_PURPOSE, NO_SUMMARY, NO_TECH_STACK};
use crate::scanner::{read_description, IgnorePatterns, ProjectDescription, ProjectTree};

const PROMPT_PREAMBLE: &str = "Analyze the following project description and provide a summary including project name, technology stack, and its purpose:";

/// Description and rendered tree of one project, ready to be sent.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub directory: PathBuf,
    pub description: ProjectDescription,
    pub tree_text: String,
}

impl ProjectContext {
    /// Collects the context for `directory`. Returns `None` when the project
    /// has no usable description file.
    ///
    /// Blocking: performs all filesystem reads. The rendered tree goes
    /// through a temporary file that is removed before returning.
    pub fn collect(directory: &Path) -> Result<Option<Self>> {
        Self::collect_in(directory, &std::env::temp_dir())
    }

    /// Same as [`collect`](Self::collect), with the temporary tree file
    /// created under `temp_root`.
    pub fn collect_in(directory: &Path, temp_root: &Path) -> Result<Option<Self>> {
        let patterns = IgnorePatterns::load(directory)?;
        let tree = ProjectTree::build(directory, &patterns)?;

        let mut tree_file = tempfile::Builder::new()
            .prefix("find-projects-tree-")
            .suffix(".txt")
            .tempfile_in(temp_root)?;
        tree_file.write_all(tree.render().as_bytes())?;
        tree_file.flush()?;

        let description = match read_description(directory)? {
            Some(description) if !description.is_empty() => description,
            _ => return Ok(None),
        };

        let tree_text = fs::read_to_string(tree_file.path())?;
        tree_file.close()?;

        debug!(
            "Collected {} tree lines for {} (description from {})",
            tree.len(),
            directory.display(),
            description.source.display()
        );

        Ok(Some(Self {
            directory: directory.to_path_buf(),
            description,
            tree_text,
        }))
    }

    pub fn prompt(&self) -> String {
        format!(
            "{}\n{}\n\nAdditionally, here is the project's directory structure:\n{}",
            PROMPT_PREAMBLE, self.description.content, self.tree_text
        )
    }
}

#[derive(Clone)]
pub struct ProjectAnalyzer {
    model: Arc<dyn ChatModel>,
}

impl ProjectAnalyzer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Analyzes one project. Never fails: errors become a failed record.
    pub async fn analyze(&self, directory: &Path) -> ProjectRecord {
        match self.try_analyze(directory).await {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to analyze {}: {}", directory.display(), e);
                ProjectRecord::failed(directory, format!("An error occurred: {}", e))
            }
        }
    }

    async fn try_analyze(&self, directory: &Path) -> Result<ProjectRecord> {
        let owned = directory.to_path_buf();
        let context = tokio::task::spawn_blocking(move || ProjectContext::collect(&owned))
            .await
            .map_err(|e| ScanError::Task(e.to_string()))??;

        let Some(context) = context else {
            debug!("No description found in {}", directory.display());
            return Ok(ProjectRecord::missing_description(directory));
        };

        let reply = self
            .model
            .chat(&[ChatMessage::user(context.prompt())])
            .await?;

        Ok(ProjectRecord::analyzed(
            directory,
            ProjectSummary {
                summary: reply.content.unwrap_or_else(|| NO_SUMMARY.to_string()),
                tech_stack: reply.tech_stack.unwrap_or_else(|| NO_TECH_STACK.to_string()),
                purpose: reply.purpose.unwrap_or_else(|| NO_PURPOSE.to_string()),
            },
        ))
    }
}
