use crate::error::Result;
use graphdoc_analyzer::{
    find_used_project_types, java_files, JavaParser, ProjectClassIndex, SourceFilter, UsedTypes,
};
use std::fs;
use std::path::Path;

pub const SUGGESTION_HEADER: &str = "# Suggested @aicontext-graph for this class.\n\
# Review and copy the block below into class-level Javadoc.\n\
# Add [calls], [db], [events], [by] as needed.\n\n";

/// Starter notation for one class: its `[uses]` edge plus a reminder line
#[must_use]
pub fn render_suggested_graph(class_name: &str, used: &UsedTypes) -> String {
    let mut out = format!("{class_name}\n");
    if used.is_empty() {
        out.push_str("  # ├─[uses]→ (none detected)\n");
    } else {
        let names: Vec<&str> = used.iter().map(String::as_str).collect();
        out.push_str(&format!("  ├─[uses]→ {}\n", names.join(", ")));
    }
    out.push_str("  # Add more edges: [calls], [db], [events], [by]←, [external], [config]\n");
    out
}

/// Write `<ClassName>.txt` suggestions for every type under `source_dir`.
///
/// Returns the number of files written. A missing source directory is logged
/// and yields zero.
pub fn suggest_graphs(source_dir: &Path, out_dir: &Path, filter: &SourceFilter) -> Result<usize> {
    if !source_dir.is_dir() {
        log::warn!("Source directory does not exist: {}", source_dir.display());
        return Ok(0);
    }

    log::info!("Generating suggested graphs from {}", source_dir.display());

    let project_classes = ProjectClassIndex::build(source_dir, filter)?;
    let mut parser = JavaParser::new()?;
    fs::create_dir_all(out_dir)?;

    let mut count = 0;
    for path in java_files(source_dir, filter)? {
        let source = match parser.parse_file(&path) {
            Ok(source) => source,
            Err(err) => {
                log::warn!("Failed to parse {}: {err}", path.display());
                continue;
            }
        };

        for decl in source.type_declarations() {
            let class_name = decl.name();
            if class_name.is_empty() {
                continue;
            }
            let used = find_used_project_types(&decl, &project_classes);
            let content = render_suggested_graph(class_name, &used);
            fs::write(
                out_dir.join(format!("{class_name}.txt")),
                format!("{SUGGESTION_HEADER}{content}"),
            )?;
            count += 1;
        }
    }

    log::info!("Wrote {count} suggested graph(s) to {}", out_dir.display());
    Ok(count)
}
