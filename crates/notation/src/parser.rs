use crate::types::{Direction, GraphEdge, GraphNode, RELATION_USES};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

// optional spaces, ├ or └, ─, [relation], → or ←, targets
static EDGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[├└]─\s*\[([^\]]+)\]\s*(→|←)\s*(.+)$").expect("edge line pattern")
});

/// Strip a Javadoc line prefix so ` *   └─[uses]→ X` reads as `└─[uses]→ X`.
fn strip_doc_prefix(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix('*').map_or(line, str::trim)
}

fn parse_edge(line: &str) -> Option<GraphEdge> {
    let caps = EDGE_LINE.captures(line)?;
    let relation = caps[1].trim();
    let direction = if &caps[2] == "→" {
        Direction::Outbound
    } else {
        Direction::Inbound
    };
    Some(GraphEdge::new(relation, direction, split_targets(&caps[3])))
}

/// Parse one block: the first non-edge line names the node, edge lines follow.
///
/// Blank input yields an empty-named node. Edge lines without any target and
/// stray prose after the name are dropped.
#[must_use]
pub fn parse_block(block: &str) -> GraphNode {
    let mut name: Option<&str> = None;
    let mut edges = Vec::new();

    for line in block.lines() {
        let line = strip_doc_prefix(line);
        if line.is_empty() {
            continue;
        }

        match parse_edge(line) {
            Some(edge) if edge.targets.is_empty() => {}
            Some(edge) => edges.push(edge),
            None if name.is_none() => name = Some(line),
            None => {}
        }
    }

    GraphNode::new(name.unwrap_or_default(), edges)
}

/// Parse every block in `content`; blocks are separated by whitespace-only
/// lines. Blocks that never named a node are dropped.
#[must_use]
pub fn parse_blocks(content: &str) -> Vec<GraphNode> {
    let mut nodes = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines().chain(std::iter::once("")) {
        if !line.trim().is_empty() {
            block.push(line);
            continue;
        }
        if block.is_empty() {
            continue;
        }
        let node = parse_block(&block.join("\n"));
        if !node.is_empty() {
            nodes.push(node);
        }
        block.clear();
    }

    nodes
}

/// Simple names of the outbound `[uses]` targets documented for `node_name`.
///
/// Falls back to the first parsed node when `node_name` is `None` or matches
/// nothing. Targets are reduced to the text after their last `.`.
#[must_use]
pub fn documented_uses(content: &str, node_name: Option<&str>) -> IndexSet<String> {
    let nodes = parse_blocks(content);
    let Some(first) = nodes.first() else {
        return IndexSet::new();
    };

    let node = node_name
        .filter(|name| !name.is_empty())
        .and_then(|name| nodes.iter().find(|n| n.name == name))
        .unwrap_or(first);

    node.edges_of(RELATION_USES)
        .filter(|edge| edge.is_outbound())
        .flat_map(|edge| edge.targets.iter())
        .map(|target| simple_name(target).to_string())
        .collect()
}

/// Text after the last `.`, trimmed.
#[must_use]
pub fn simple_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, tail)| tail).trim()
}

/// Split on commas outside `()`, `[]` and `{}`; empty segments are dropped.
fn split_targets(targets: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in targets.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                push_segment(&mut result, &targets[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    push_segment(&mut result, &targets[start..]);

    result
}

fn push_segment(out: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment.to_string());
    }
}
