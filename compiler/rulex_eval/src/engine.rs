//! Tree-walking evaluation.

use rulex_ir::{Node, NodeKind};
use rulex_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::errors::{undefined_operator, undefined_variable, EvalResult};
use crate::{Environment, LazyArg};

/// Evaluate `node` against `env`.
///
/// Literals return their value. Variables are looked up in the
/// environment; a name bound to an expression evaluates that expression
/// against the same environment. Operators are looked up by name and invoked with one
/// [`LazyArg`] per child, in order; the operator decides what to force.
#[tracing::instrument(level = "trace", skip_all)]
pub fn evaluate(node: &Node, env: &Environment) -> EvalResult {
    eval_node(node, env)
}

pub(crate) fn eval_node(node: &Node, env: &Environment) -> EvalResult {
    ensure_sufficient_stack(|| match node.kind() {
        NodeKind::Literal(value) => Ok(value.clone()),
        NodeKind::Variable(name) => {
            if let Some(value) = env.variable(name) {
                return Ok(value.clone());
            }
            let Some(expression) = env.expression(name) else {
                return Err(undefined_variable(name).or_span(node.span()));
            };
            eval_node(expression, env)
                .map_err(|err| err.or_span(node.span()).in_context(format!("value of {name}")))
        }
        NodeKind::Operator { name, args } => {
            let Some(operator) = env.operator(name) else {
                return Err(undefined_operator(name).or_span(node.span()));
            };
            tracing::trace!(operator = &**name, arity = args.len(), "dispatch");
            let count = args.len();
            let lazy: SmallVec<[LazyArg<'_>; 4]> = args
                .iter()
                .enumerate()
                .map(|(position, arg)| LazyArg::new(arg, env, name, position, count))
                .collect();
            operator(lazy.as_slice()).map_err(|err| err.or_span(node.span()))
        }
    })
}
