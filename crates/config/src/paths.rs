use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project directory layout, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLayout {
    /// Compiled artifact output
    pub artifacts: PathBuf,
    /// Contract sources
    pub sources: PathBuf,
    /// Test sources
    pub tests: PathBuf,
}

impl Default for PathLayout {
    fn default() -> Self {
        Self {
            artifacts: PathBuf::from("./artifacts"),
            sources: PathBuf::from("src"),
            tests: PathBuf::from("./test"),
        }
    }
}

impl PathLayout {
    /// Absolute-ish layout with every directory joined onto `root`.
    pub fn under(&self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            artifacts: root.join(&self.artifacts),
            sources: root.join(&self.sources),
            tests: root.join(&self.tests),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = PathLayout::default();
        assert_eq!(paths.artifacts, Path::new("./artifacts"));
        assert_eq!(paths.sources, Path::new("src"));
        assert_eq!(paths.tests, Path::new("./test"));
    }

    #[test]
    fn test_under_root() {
        let paths = PathLayout::default().under("/work/project");
        assert_eq!(paths.sources, Path::new("/work/project/src"));
        assert!(paths.artifacts.starts_with("/work/project"));
        assert!(paths.tests.ends_with("test"));
    }
}
