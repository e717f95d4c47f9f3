//! Rulex IR - the canonical expression tree.
//!
//! This crate holds the data model every other Rulex crate operates on:
//! - [`Value`]: the dynamic runtime value flowing through evaluation
//! - [`Node`]: the immutable expression tree (literal, variable, operator)
//! - [`Span`]: optional source location attached to nodes
//!
//! # Design
//!
//! Nodes are values. Children live behind an `Arc<[Node]>`, so cloning a
//! node is cheap and a rewrite that keeps a subtree shares it instead of
//! copying. Nothing in this crate mutates a node after construction; the
//! optimizer builds new nodes around the children it keeps.
//!
//! Operators are identified by name only. The tree never constrains arity:
//! whether `-` takes one or two arguments is decided by the operator
//! implementation at evaluation time.

mod node;
mod span;
mod value;

pub use node::{Node, NodeKind};
pub use span::Span;
pub use value::{quote_string, Value};
