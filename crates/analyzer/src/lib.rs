//! # graphdoc Analyzer
//!
//! Syntactic analysis of Java sources with tree-sitter.
//!
//! ## Architecture
//!
//! ```text
//! source tree
//!     │
//!     ├──> Project Class Index
//!     │      └─ simple names of every class/interface/enum/record
//!     │
//!     ├──> Dependency Extractor (per class)
//!     │      ├─ field types, constructor and method parameters, return types
//!     │      ├─ generic arguments and qualifying scopes
//!     │      └─ filtered to project types, self excluded
//!     │
//!     └──> Doc Tag Extractor
//!            └─ @aicontext-* tags from /** */ comments on types and methods
//! ```
//!
//! Matching is by simple name only; no type resolution is attempted.

mod class_index;
mod dependencies;
mod error;
mod files;
mod source;
mod tags;

pub use class_index::ProjectClassIndex;
pub use dependencies::{find_used_project_types, UsedTypes};
pub use error::{AnalyzerError, Result};
pub use files::{java_files, SourceFilter};
pub use source::{JavaParser, JavaSource, MethodDecl, TypeDecl, TypeKind};
pub use tags::{extract_entries, extract_tags, scan_source_tree, DocEntry, DocTag, EntryLevel, TagKind};
