use serde::{Deserialize, Serialize};
use std::fmt;

/// Relation type validated against extracted dependencies
pub const RELATION_USES: &str = "uses";

/// Edge direction relative to the documented node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// node → targets (uses, calls, db, events, external, config)
    Outbound,
    /// callers → node (`[by]←`)
    Inbound,
}

impl Direction {
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Outbound => "→",
            Self::Inbound => "←",
        }
    }
}

/// A single edge: relation type, direction and ordered targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub relation_type: String,
    pub direction: Direction,
    pub targets: Vec<String>,
}

impl GraphEdge {
    pub fn new(relation_type: impl Into<String>, direction: Direction, targets: Vec<String>) -> Self {
        Self {
            relation_type: relation_type.into(),
            direction,
            targets,
        }
    }

    #[must_use]
    pub fn is_outbound(&self) -> bool {
        self.direction == Direction::Outbound
    }

    #[must_use]
    pub fn is_inbound(&self) -> bool {
        self.direction == Direction::Inbound
    }
}

/// A documented node and its edges, in declaration order.
///
/// An empty name marks a block that never named its node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub name: String,
    pub edges: Vec<GraphEdge>,
}

impl GraphNode {
    pub fn new(name: impl AsRef<str>, edges: Vec<GraphEdge>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            edges,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Edges with the given relation type, any direction
    pub fn edges_of<'a>(&'a self, relation: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.relation_type == relation)
    }
}

/// Renders the node back into notation, `└─` on the last edge.
impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        let last = self.edges.len().saturating_sub(1);
        for (i, edge) in self.edges.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            writeln!(
                f,
                "  {branch}[{}]{} {}",
                edge.relation_type,
                edge.direction.arrow(),
                edge.targets.join(", ")
            )?;
        }
        Ok(())
    }
}
