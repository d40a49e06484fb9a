use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Files consulted for a project description, highest priority first.
pub const DESCRIPTION_CANDIDATES: [&str; 5] = [
    "README.md",
    "readme.md",
    "README.txt",
    "readme.txt",
    "pyproject.toml",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescription {
    pub source: PathBuf,
    pub content: String,
}

impl ProjectDescription {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Returns the full text of the first candidate present in `dir`.
pub fn read_description(dir: &Path) -> Result<Option<ProjectDescription>> {
    for name in DESCRIPTION_CANDIDATES {
        let path = dir.join(name);
        if path.is_file() {
            let content = fs::read_to_string(&path)?;
            return Ok(Some(ProjectDescription {
                source: path,
                content,
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_none_when_no_candidate_exists() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Cargo.toml"), "[package]").unwrap();

        assert!(read_description(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_readme_md_wins_over_manifest() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pyproject.toml"), "[project]").unwrap();
        fs::write(temp_dir.path().join("README.md"), "A tiny calculator").unwrap();

        let description = read_description(temp_dir.path()).unwrap().unwrap();
        assert_eq!(description.content, "A tiny calculator");
        assert_eq!(description.source, temp_dir.path().join("README.md"));
    }

    #[test]
    fn test_falls_back_to_pyproject() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("pyproject.toml"),
            "[project]\nname = \"demo\"\n",
        )
        .unwrap();

        let description = read_description(temp_dir.path()).unwrap().unwrap();
        assert!(description.content.contains("name = \"demo\""));
    }

    #[test]
    fn test_plain_text_readme() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "notes").unwrap();

        let description = read_description(temp_dir.path()).unwrap().unwrap();
        assert_eq!(description.content, "notes");
    }

    #[test]
    fn test_directory_named_like_candidate_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("README.md")).unwrap();
        fs::write(temp_dir.path().join("README.txt"), "text readme").unwrap();

        let description = read_description(temp_dir.path()).unwrap().unwrap();
        assert_eq!(description.content, "text readme");
    }

    #[test]
    fn test_only_zero_length_content_is_empty() {
        let mut description = ProjectDescription {
            source: PathBuf::from("README.md"),
            content: String::new(),
        };
        assert!(description.is_empty());

        description.content = " \n\t".to_string();
        assert!(!description.is_empty());
    }
}
