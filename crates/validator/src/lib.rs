//! # graphdoc Validator
//!
//! Verifies that `@aicontext-graph` documentation lists every project type a
//! class actually depends on.
//!
//! ## Flow
//!
//! ```text
//! DocEntry[] (graph, graph-ignore)
//!     │
//!     ├──> no graph entries ─> PASS
//!     │
//!     ├──> Project Class Index (built once)
//!     │
//!     └──> per graph entry
//!            ├─ resolve file (as given, then under base dir), else skip
//!            ├─ find class declaration, else skip
//!            ├─ actual     = used project types
//!            ├─ documented = [uses]→ targets of the class's node
//!            ├─ actual - documented - ignored ─> error   (strict)
//!            └─ documented - actual - ignored ─> warning (lenient)
//! ```
//!
//! Errors from all entries are collected before the run fails, so every
//! omission can be fixed in one pass.

mod error;
mod report;
mod suggest;
mod validator;

pub use error::{Result, ValidatorError};
pub use report::{ValidationReport, GRAPH_IGNORE_TAG, GRAPH_TAG};
pub use suggest::{render_suggested_graph, suggest_graphs, SUGGESTION_HEADER};
pub use validator::{class_name_of, parse_ignore_list, GraphValidator, ValidatorConfig};
