//! Rulex Stage - conversion of the legacy stage tree into [`Node`](rulex_ir::Node)s.
//!
//! The legacy parser produces a binary tree of evaluation stages: every
//! stage has a symbol, up to two children and an accessor closure that
//! either reads a parameter (`Value` stages) or yields a constant
//! (`Literal` stages). This crate is the only place that knows that
//! encoding. [`bridge`] turns it into the canonical tree:
//!
//! - parentheses (`Noop`) disappear
//! - variable names are recovered by running the accessor against a probe
//!   that records which parameter it asked for
//! - the two-stage ternary `c ? a : b` (a `:` stage whose left child is a
//!   `?` stage) becomes a single `if(c, a, b)`

mod bridge;
mod stage;

pub use bridge::bridge;
pub use stage::{accessor, Parameters, Stage, StageAccessor, StageSymbol};

/// Failure raised by a stage accessor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("no parameter named `{name}`")]
    MissingParameter { name: String },
    #[error("{message}")]
    Custom { message: String },
}

/// Why a stage tree could not be converted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// A symbol with no tree equivalent (function calls, accessors, ...).
    #[error("unknown symbol: {symbol:?}")]
    UnknownSymbol { symbol: StageSymbol },
    #[error("`{symbol}` stage has no {side} child")]
    MissingChild {
        symbol: StageSymbol,
        side: &'static str,
    },
    #[error("`{symbol}` stage has no accessor")]
    MissingAccessor { symbol: StageSymbol },
    /// A value stage whose accessor never asked for a parameter.
    #[error("value stage did not query any parameter")]
    NoParameterQueried,
    /// A `:` stage whose left side is not a `?` stage.
    #[error("unexpected ternary: {found}")]
    MalformedTernary { found: String },
    #[error("accessor failed: {0}")]
    Accessor(#[from] StageError),
}
