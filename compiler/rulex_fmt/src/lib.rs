//! Rulex Fmt - renders expression trees back to source text.
//!
//! # Architecture
//!
//! - [`Printer`]: output buffer plus the first failure; rendering stops
//!   appending once anything failed
//! - [`NodeHandler`]: renders one node into a printer, recursing through
//!   [`Printer::append_node`]
//! - [`PrintConfig`]: the default handler, driven by literal formatters,
//!   operator renaming, infix overrides, a precedence table and custom
//!   operator renderers
//!
//! Parentheses are inserted from precedence alone: a left operand is
//! wrapped when it binds looser than its operator, a right operand when it
//! binds looser or equally loose. Every infix operator therefore prints as
//! left-associative.

mod config;
mod precedence;
mod printer;

use rulex_ir::Node;

pub use config::{OperatorMapper, OperatorRenderer, PrecedenceFn, PrintConfig};
pub use precedence::{default_precedence, LEAF_PRECEDENCE};
pub use printer::{NodeHandler, Printer};

/// Printing failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrintError {
    /// Literal of a kind with no source form (`null`, lists).
    #[error("unsupported literal type: {type_name}")]
    UnsupportedLiteral { type_name: &'static str },
    /// Failure raised by a custom renderer or node handler.
    #[error("{message}")]
    Custom { message: String },
}

impl PrintError {
    pub fn custom(message: impl Into<String>) -> Self {
        PrintError::Custom {
            message: message.into(),
        }
    }
}

/// Render `node` with `config`.
pub fn print(node: &Node, config: &PrintConfig) -> Result<String, PrintError> {
    print_with_handler(node, config)
}

/// Render `node` with a custom handler for every node.
///
/// The handler is called for the root and for every node appended through
/// [`Printer::append_node`]. A [`PrintConfig`] is itself a handler, so a
/// custom handler can delegate the nodes it does not care about.
pub fn print_with_handler(node: &Node, handler: &dyn NodeHandler) -> Result<String, PrintError> {
    let mut printer = Printer::new(handler);
    printer.append_node(node);
    printer.finish()
}
