use crate::error::{AnalyzerError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Exclusion rules for source tree walks, matched against root-relative paths
#[derive(Debug, Clone, Default)]
pub struct SourceFilter {
    exclude: Option<GlobSet>,
}

impl SourceFilter {
    /// Build from glob patterns such as `**/generated/**`
    pub fn new<S: AsRef<str>>(exclude: &[S]) -> Result<Self> {
        if exclude.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(Self {
            exclude: Some(builder.build()?),
        })
    }

    #[must_use]
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|set| set.is_match(rel_path))
    }
}

/// All `.java` files under `root`, sorted by path.
///
/// Entries that cannot be read are skipped; only a missing root is an error.
pub fn java_files(root: &Path, filter: &SourceFilter) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(AnalyzerError::InvalidPath(format!(
            "Source directory does not exist: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("java") {
            continue;
        }

        let rel_path = path.strip_prefix(root).unwrap_or(path);
        if filter.is_excluded(rel_path) {
            log::debug!("Excluded {}", rel_path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walks_java_files_and_applies_excludes() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("com/acme/generated")).unwrap();
        fs::write(root.join("com/acme/Order.java"), "class Order {}").unwrap();
        fs::write(root.join("com/acme/notes.txt"), "x").unwrap();
        fs::write(root.join("com/acme/generated/Stub.java"), "class Stub {}").unwrap();

        let all = java_files(root, &SourceFilter::default()).unwrap();
        assert_eq!(all.len(), 2);

        let filter = SourceFilter::new(&["**/generated/**"]).unwrap();
        let kept = java_files(root, &filter).unwrap();
        assert_eq!(kept, vec![root.join("com/acme/Order.java")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = java_files(&tmp.path().join("nope"), &SourceFilter::default()).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPath(_)));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(SourceFilter::new(&["a/{b"]).is_err());
    }
}
