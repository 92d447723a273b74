use crate::error::Result;
use crate::report::ValidationReport;
use graphdoc_analyzer::{
    find_used_project_types, DocEntry, EntryLevel, JavaParser, ProjectClassIndex, SourceFilter,
    TagKind,
};
use graphdoc_notation::documented_uses;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Where to find sources for one validation run
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// Root scanned for the project class index
    pub source_dir: PathBuf,
    /// Fallback root for entry file paths that do not resolve as given
    pub base_dir: Option<PathBuf>,
    /// Glob patterns excluded from the index
    pub exclude: Vec<String>,
}

/// Checks type-level graph entries against the dependencies the code has.
///
/// Undocumented dependencies are errors; documented but unused ones are
/// warnings. Names in the matching ignore entry are exempt from both.
pub struct GraphValidator {
    config: ValidatorConfig,
}

impl GraphValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate every graph entry. Findings never make this return `Err`; use
    /// [`ValidationReport::into_verdict`] to turn errors into a failure.
    pub fn validate(&self, entries: &[DocEntry]) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        let graph_entries: Vec<&DocEntry> = entries
            .iter()
            .filter(|e| e.level == EntryLevel::Architectural && e.kind == TagKind::Graph)
            .collect();
        if graph_entries.is_empty() {
            return Ok(report);
        }

        let mut ignore_by_location: HashMap<&str, &str> = HashMap::new();
        for entry in entries
            .iter()
            .filter(|e| e.level == EntryLevel::Architectural && e.kind == TagKind::GraphIgnore)
        {
            ignore_by_location
                .entry(entry.location.as_str())
                .or_insert(entry.content.as_str());
        }

        let filter = SourceFilter::new(self.config.exclude.as_slice())?;
        let project_classes = match ProjectClassIndex::build(&self.config.source_dir, &filter) {
            Ok(index) => index,
            Err(err) => {
                log::warn!("Could not build project class set for graph validation: {err}");
                report.skipped = graph_entries.len();
                return Ok(report);
            }
        };

        let mut parser = JavaParser::new()?;
        for entry in graph_entries {
            let class_name = class_name_of(&entry.location);

            let Some(path) = self.resolve_path(&entry.file_path) else {
                log::debug!(
                    "Skipping graph validation for {}: file not found {}",
                    entry.location,
                    entry.file_path
                );
                report.skipped += 1;
                continue;
            };

            let source = match parser.parse_file(&path) {
                Ok(source) => source,
                Err(err) => {
                    log::warn!("Could not parse {} for graph validation: {err}", path.display());
                    report.skipped += 1;
                    continue;
                }
            };
            let Some(decl) = source.find_type(class_name) else {
                log::debug!(
                    "Skipping graph validation for {}: no declaration in {}",
                    entry.location,
                    path.display()
                );
                report.skipped += 1;
                continue;
            };

            let actual = find_used_project_types(&decl, &project_classes);
            let documented = documented_uses(&entry.content, Some(class_name));
            let ignored = parse_ignore_list(
                ignore_by_location
                    .get(entry.location.as_str())
                    .copied()
                    .unwrap_or_default(),
            );

            for dep in &actual {
                if !documented.contains(dep) && !ignored.contains(dep) {
                    report.missing_dependency(&entry.file_path, entry.line_number, dep);
                }
            }
            for doc in &documented {
                if !actual.contains(doc) && !ignored.contains(doc) {
                    report.unused_documented(&entry.file_path, entry.line_number, doc);
                }
            }
            report.checked += 1;
        }

        for err in &report.errors {
            log::error!("{err}");
        }
        log::info!(
            "Graph validation: {} checked, {} skipped, {} errors, {} warnings",
            report.checked,
            report.skipped,
            report.errors.len(),
            report.warnings.len()
        );

        Ok(report)
    }

    /// The path as given if it is a file, else relative to the base directory
    fn resolve_path(&self, file_path: &str) -> Option<PathBuf> {
        let direct = Path::new(file_path);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        self.config
            .base_dir
            .as_ref()
            .map(|base| base.join(file_path))
            .filter(|path| path.is_file())
    }
}

/// Simple class name of a documented location: text after the last `.`
#[must_use]
pub fn class_name_of(location: &str) -> &str {
    location
        .rsplit_once('.')
        .map_or(location, |(_, name)| name)
}

/// Comma separated ignore list, trimmed, blanks dropped
#[must_use]
pub fn parse_ignore_list(content: &str) -> HashSet<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
