use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const MISSING_DESCRIPTION: &str = "README or similar file not found";
pub const NO_SUMMARY: &str = "No summary provided";
pub const NO_TECH_STACK: &str = "No tech stack identified";
pub const NO_PURPOSE: &str = "No purpose identified";

/// Result of analyzing one project directory, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub directory: PathBuf,
    #[serde(flatten)]
    pub outcome: ProjectOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectOutcome {
    Analyzed(ProjectSummary),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub summary: String,
    pub tech_stack: String,
    pub purpose: String,
}

impl ProjectRecord {
    pub fn analyzed(directory: &Path, summary: ProjectSummary) -> Self {
        Self {
            title: title_for(directory),
            directory: directory.to_path_buf(),
            outcome: ProjectOutcome::Analyzed(summary),
        }
    }

    pub fn failed(directory: &Path, error: impl Into<String>) -> Self {
        Self {
            title: title_for(directory),
            directory: directory.to_path_buf(),
            outcome: ProjectOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn missing_description(directory: &Path) -> Self {
        Self::failed(directory, MISSING_DESCRIPTION)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, ProjectOutcome::Failed { .. })
    }

    pub fn summary(&self) -> Option<&ProjectSummary> {
        match &self.outcome {
            ProjectOutcome::Analyzed(summary) => Some(summary),
            ProjectOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProjectOutcome::Analyzed(_) => None,
            ProjectOutcome::Failed { error } => Some(error),
        }
    }
}

/// Last path component, or the whole path when there is none (e.g. `/`).
pub fn title_for(directory: &Path) -> String {
    directory
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| directory.to_string_lossy().to_string())
}
