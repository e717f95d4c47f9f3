//! Rulex Eval - evaluation engine and operator library.
//!
//! # Architecture
//!
//! - [`evaluate`]: walks a [`Node`](rulex_ir::Node) against an [`Environment`]
//! - [`Environment`]: variable bindings plus an [`OperatorRegistry`]
//! - [`LazyArg`]: an unevaluated operator argument, forced on demand
//! - [`operators`]: generic constructors (`binary_op`, `boolean_fold`, ...)
//!   shared by the built-in table and host-defined operators
//!
//! The engine never decides evaluation order. Every operator receives its
//! arguments deferred and forces only what it needs, which is how `&&`,
//! `||`, `if` and `??` short-circuit.

mod batch;
mod builtins;
mod engine;
mod environment;
pub mod errors;
mod lazy;
pub mod operators;

pub use batch::{evaluate_batch, evaluate_batch_in};
pub use engine::evaluate;
pub use environment::{Environment, OperatorRegistry};
pub use errors::{Arity, EvalError, EvalErrorKind, EvalResult};
pub use lazy::LazyArg;
pub use operators::Operator;

#[cfg(test)]
mod tests;
