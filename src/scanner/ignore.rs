use std::fs;
use std::path::Path;

use glob::Pattern;

use crate::error::Result;

pub const IGNORE_FILENAME: &str = ".gitignore";

/// Ordered glob patterns matched against bare entry names.
///
/// This is intentionally not a gitignore implementation: there is no
/// negation, no directory anchoring, and a pattern only ever sees the
/// entry's own name, never its path.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<IgnorePattern>,
}

#[derive(Debug, Clone)]
struct IgnorePattern {
    raw: String,
    compiled: Option<Pattern>,
}

impl IgnorePattern {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            compiled: Pattern::new(&collapse_stars(raw)).ok(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match &self.compiled {
            Some(pattern) => pattern.matches(name),
            // Not valid glob syntax, compare literally
            None => self.raw == name,
        }
    }
}

/// Reduces runs of `*` to one. On a bare name `**` means the same as `*`,
/// while `glob` reserves it for whole path components.
fn collapse_stars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

impl IgnorePatterns {
    /// Reads `.gitignore` from `dir`. A missing file yields an empty set.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(IGNORE_FILENAME);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let patterns = content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(IgnorePattern::new)
            .collect();

        Self { patterns }
    }

    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| IgnorePattern::new(p.as_ref()))
                .collect(),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    pub fn as_strings(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.raw.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let patterns = IgnorePatterns::load(temp_dir.path()).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_load_skips_comments_and_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(IGNORE_FILENAME),
            "# build output\ntarget\n\n   \n*.log\n  node_modules  \n",
        )
        .unwrap();

        let patterns = IgnorePatterns::load(temp_dir.path()).unwrap();
        assert_eq!(patterns.as_strings(), vec!["target", "*.log", "node_modules"]);
    }

    #[test]
    fn test_indented_hash_is_a_pattern() {
        // Only lines starting with '#' are comments
        let patterns = IgnorePatterns::parse("  #notes\n");
        assert_eq!(patterns.as_strings(), vec!["#notes"]);
    }

    #[test]
    fn test_glob_matching_on_bare_names() {
        let patterns = IgnorePatterns::from_patterns(["*.pyc", "build", "temp?"]);

        assert!(patterns.is_ignored("module.pyc"));
        assert!(patterns.is_ignored("build"));
        assert!(patterns.is_ignored("temp1"));
        assert!(!patterns.is_ignored("temp12"));
        assert!(!patterns.is_ignored("src"));
    }

    #[test]
    fn test_directory_suffix_is_not_anchored() {
        // "target/" never matches a bare name
        let patterns = IgnorePatterns::from_patterns(["target/"]);
        assert!(!patterns.is_ignored("target"));
    }

    #[test]
    fn test_invalid_glob_matches_literally() {
        let patterns = IgnorePatterns::from_patterns(["[abc"]);
        assert!(patterns.is_ignored("[abc"));
        assert!(!patterns.is_ignored("a"));
    }

    #[test]
    fn test_double_star_behaves_like_single_star() {
        let patterns = IgnorePatterns::from_patterns(["**.log", "foo**"]);
        assert!(patterns.is_ignored("debug.log"));
        assert!(patterns.is_ignored("foobar"));
        assert!(!patterns.is_ignored("debug.txt"));
    }

    #[test]
    fn test_double_star_prefix_needs_a_separator() {
        let patterns = IgnorePatterns::from_patterns(["**/node_modules"]);
        assert!(!patterns.is_ignored("node_modules"));
        assert_eq!(patterns.as_strings(), vec!["**/node_modules"]);
    }

    #[test]
    fn test_collapse_stars() {
        assert_eq!(collapse_stars("a***b*"), "a*b*");
        assert_eq!(collapse_stars("plain"), "plain");
    }

    #[test]
    fn test_negation_is_not_supported() {
        let patterns = IgnorePatterns::from_patterns(["*.txt", "!keep.txt"]);
        assert!(patterns.is_ignored("keep.txt"));
    }
}
