//! Rulex - evaluation core of an embeddable expression language.
//!
//! Hosts build (or bridge from the legacy stage tree) a [`Node`], then
//! evaluate it against an [`Environment`] of variables and operators,
//! simplify it with [`optimize`], and render it back to text with
//! [`print`].
//!
//! ```
//! use rulex::{evaluate, optimize, print, Environment, Node, PrintConfig, Value};
//!
//! let tree = Node::operator(
//!     "&&",
//!     [
//!         Node::operator(">", [Node::variable("age"), Node::literal(18)]),
//!         Node::literal(true),
//!     ],
//! );
//! let env = Environment::new().with_variable("age", 21.0);
//! assert_eq!(evaluate(&tree, &env), Ok(Value::Bool(true)));
//!
//! let simpler = optimize(&tree);
//! assert_eq!(print(&simpler, &PrintConfig::new()).as_deref(), Ok("age > 18"));
//! ```
//!
//! # Crates
//!
//! - `rulex_ir`: [`Node`], [`Value`], [`Span`]
//! - `rulex_eval`: [`evaluate`], [`Environment`], operator constructors
//! - `rulex_opt`: [`Optimizer`]
//! - `rulex_fmt`: [`PrintConfig`], [`Printer`]
//! - `rulex_stage`: [`Stage`] and [`bridge`]

mod limits;

use std::sync::Once;

pub use limits::{check_depth, DepthError};
pub use rulex_eval::{errors, operators};
pub use rulex_eval::{
    evaluate, evaluate_batch, evaluate_batch_in, Arity, Environment, EvalError, EvalErrorKind,
    EvalResult, LazyArg, Operator, OperatorRegistry,
};
pub use rulex_fmt::{
    default_precedence, print, print_with_handler, NodeHandler, PrintConfig, PrintError, Printer,
};
pub use rulex_ir::{Node, NodeKind, Span, Value};
pub use rulex_opt::{optimize, rule, Optimizer, Rule};
pub use rulex_stage::{bridge, BridgeError, Parameters, Stage, StageError, StageSymbol};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=rulex_eval=trace`
/// for operator dispatch or `RUST_LOG=rulex_opt=trace` for rewrites. Safe
/// to call more than once; a subscriber installed by the host is kept.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
