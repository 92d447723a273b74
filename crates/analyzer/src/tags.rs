use crate::error::Result;
use crate::files::{java_files, SourceFilter};
use crate::source::{JavaParser, JavaSource};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const TAG_PREFIX: &str = "@aicontext-";

static TAG_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@aicontext-(graph-ignore|graph|rule|decision|context)\s+").expect("tag pattern")
});

static DATE_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d{4}-\d{2}-\d{2})\]\s*").expect("date pattern"));

/// Where a tag was written: on a type or on a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryLevel {
    Architectural,
    Implementation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagKind {
    Rule,
    Decision,
    Context,
    Graph,
    GraphIgnore,
}

impl TagKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "rule" => Some(Self::Rule),
            "decision" => Some(Self::Decision),
            "context" => Some(Self::Context),
            "graph" => Some(Self::Graph),
            "graph-ignore" => Some(Self::GraphIgnore),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Decision => "decision",
            Self::Context => "context",
            Self::Graph => "graph",
            Self::GraphIgnore => "graph-ignore",
        }
    }
}

/// One tag as found in a doc comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub kind: TagKind,
    pub content: String,
    pub timestamp: Option<String>,
}

/// One tag occurrence with its source coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// `com.example.Foo`, or `com.example.Foo.bar()` for method tags
    pub location: String,
    pub file_path: String,
    pub line_number: usize,
    pub level: EntryLevel,
    pub kind: TagKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl DocEntry {
    /// A type-level `@aicontext-graph` entry
    pub fn graph(
        location: impl Into<String>,
        file_path: impl Into<String>,
        line_number: usize,
        content: impl Into<String>,
    ) -> Self {
        Self::architectural(TagKind::Graph, location, file_path, line_number, content)
    }

    /// A type-level `@aicontext-graph-ignore` entry
    pub fn graph_ignore(
        location: impl Into<String>,
        file_path: impl Into<String>,
        line_number: usize,
        content: impl Into<String>,
    ) -> Self {
        Self::architectural(TagKind::GraphIgnore, location, file_path, line_number, content)
    }

    fn architectural(
        kind: TagKind,
        location: impl Into<String>,
        file_path: impl Into<String>,
        line_number: usize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            file_path: file_path.into(),
            line_number,
            level: EntryLevel::Architectural,
            kind,
            content: content.into(),
            timestamp: None,
        }
    }
}

/// Pull `@aicontext-*` tags out of a doc comment body.
///
/// A tag's content runs to the next `@aicontext-` marker or the end of the
/// comment. The first `[YYYY-MM-DD]` stamp becomes the timestamp.
#[must_use]
pub fn extract_tags(comment: &str) -> Vec<DocTag> {
    let starts: Vec<usize> = comment.match_indices(TAG_PREFIX).map(|(i, _)| i).collect();
    let mut tags = Vec::new();

    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(comment.len());
        let region = &comment[start..end];
        let Some(caps) = TAG_START.captures(region) else {
            continue;
        };
        let Some(kind) = TagKind::from_tag(&caps[1]) else {
            continue;
        };

        let body = &region[caps[0].len()..];
        if body.is_empty() {
            continue;
        }

        let mut content = body.trim().to_string();
        let mut timestamp = None;
        if let Some(stamp) = DATE_STAMP.captures(&content) {
            timestamp = Some(stamp[1].to_string());
            let range = stamp.get(0).map(|m| m.range()).unwrap_or_default();
            content.replace_range(range, "");
        }

        tags.push(DocTag {
            kind,
            content,
            timestamp,
        });
    }

    tags
}

/// Entries for every tagged type and method of one parsed file.
///
/// Type-level entries come first, then method-level ones.
#[must_use]
pub fn extract_entries(source: &JavaSource, file_path: &str) -> Vec<DocEntry> {
    let package = source.package_name().unwrap_or_default();
    let qualify = |name: &str| {
        if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        }
    };

    let mut entries = Vec::new();

    for decl in source.type_declarations() {
        let Some(comment) = decl.doc_comment() else {
            continue;
        };
        for tag in extract_tags(comment) {
            entries.push(DocEntry {
                location: qualify(decl.name()),
                file_path: file_path.to_string(),
                line_number: decl.start_line(),
                level: EntryLevel::Architectural,
                kind: tag.kind,
                content: tag.content,
                timestamp: tag.timestamp,
            });
        }
    }

    for method in source.method_declarations() {
        let Some(comment) = method.doc_comment() else {
            continue;
        };
        let owner = method.enclosing_type().unwrap_or("Unknown");
        for tag in extract_tags(comment) {
            entries.push(DocEntry {
                location: qualify(&format!("{owner}.{}()", method.name())),
                file_path: file_path.to_string(),
                line_number: method.start_line(),
                level: EntryLevel::Implementation,
                kind: tag.kind,
                content: tag.content,
                timestamp: tag.timestamp,
            });
        }
    }

    entries
}

/// Scan a source tree for tag entries. Unparseable files are skipped with a
/// warning. All type-level entries precede method-level ones.
pub fn scan_source_tree(root: &Path, filter: &SourceFilter) -> Result<Vec<DocEntry>> {
    let mut parser = JavaParser::new()?;
    let mut entries = Vec::new();

    for path in java_files(root, filter)? {
        match parser.parse_file(&path) {
            Ok(source) => entries.extend(extract_entries(&source, &path.to_string_lossy())),
            Err(err) => log::warn!("Failed to parse {}: {err}", path.display()),
        }
    }

    entries.sort_by_key(|entry| entry.level == EntryLevel::Implementation);
    Ok(entries)
}
