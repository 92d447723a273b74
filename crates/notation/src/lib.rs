//! # Graph Notation
//!
//! Parser for the compact relationship notation developers write inside class
//! documentation.
//!
//! ## Syntax
//!
//! ```text
//! PaymentService
//!   ├─[uses]→ StripeClient, PaymentRepository
//!   ├─[calls]→ StripeClient.charge()
//!   ├─[db]→ W:payment_transactions(id,user_id,amount)
//!   └─[by]← OrderService.checkout()
//! ```
//!
//! - The first line that is not an edge names the node
//! - `├─` / `└─` start an edge, `[relation]` types it
//! - `→` points outbound (node to targets), `←` inbound (callers to node)
//! - Targets are comma separated; commas inside `()`, `[]`, `{}` do not split
//!
//! Relation types are free text. `uses`, `calls`, `db`, `events`, `by`,
//! `external` and `config` are conventional; anything else still parses.
//!
//! Lines may carry a Javadoc ` * ` prefix, so tag content can be fed in as-is.
//! The parser never fails: lines it does not understand are skipped.

mod parser;
mod types;

pub use parser::{documented_uses, parse_block, parse_blocks, simple_name};
pub use types::{Direction, GraphEdge, GraphNode, RELATION_USES};
