use crate::error::Result;
use crate::files::{java_files, SourceFilter};
use crate::source::{JavaParser, JavaSource};
use std::collections::HashSet;
use std::path::Path;

/// Simple names of every class-like type declared in the project.
///
/// Case-sensitive; built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectClassIndex {
    names: HashSet<String>,
}

impl ProjectClassIndex {
    /// Scan every Java file under `source_root`. Files that cannot be read or
    /// parsed are skipped.
    pub fn build(source_root: &Path, filter: &SourceFilter) -> Result<Self> {
        let mut parser = JavaParser::new()?;
        let mut index = Self::default();
        let files = java_files(source_root, filter)?;

        for path in &files {
            match parser.parse_file(path) {
                Ok(source) => index.add_source(&source),
                Err(err) => log::debug!("Skipping {} while indexing: {err}", path.display()),
            }
        }

        log::info!(
            "Indexed {} project types from {} files",
            index.len(),
            files.len()
        );
        Ok(index)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add every declaration of one compilation unit, nested ones included
    pub fn add_source(&mut self, source: &JavaSource) {
        for decl in source.type_declarations() {
            let name = decl.name();
            if !name.is_empty() {
                self.names.insert(name.to_string());
            }
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
