//! Deferred operator arguments.

use rulex_ir::{Node, Value};

use crate::engine::eval_node;
use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::Environment;

/// An operator argument that has not been evaluated yet.
///
/// Forcing evaluates the bound child in the bound environment every time;
/// nothing is memoized, so an operator forces each argument at most once
/// unless it wants the side effects of re-evaluation.
///
/// Failures coming out of a forced argument are annotated with its
/// position (`lhs of +`, `argument #3 of max`) before they reach the
/// operator.
#[derive(Clone, Copy)]
pub struct LazyArg<'a> {
    node: &'a Node,
    env: &'a Environment,
    operator: &'a str,
    position: usize,
    count: usize,
}

impl<'a> LazyArg<'a> {
    pub(crate) fn new(
        node: &'a Node,
        env: &'a Environment,
        operator: &'a str,
        position: usize,
        count: usize,
    ) -> Self {
        Self {
            node,
            env,
            operator,
            position,
            count,
        }
    }

    /// The unevaluated child node.
    #[inline]
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Evaluate the argument now.
    pub fn force(&self) -> EvalResult {
        eval_node(self.node, self.env).map_err(|err| self.annotate(err))
    }

    /// Evaluate and require a number.
    pub fn get_numeric(&self) -> Result<f64, EvalError> {
        match self.force()? {
            Value::Number(n) => Ok(n),
            other => Err(self.mismatch("number", &other)),
        }
    }

    /// Evaluate and require a boolean.
    pub fn get_boolean(&self) -> Result<bool, EvalError> {
        match self.force()? {
            Value::Bool(b) => Ok(b),
            other => Err(self.mismatch("bool", &other)),
        }
    }

    /// Evaluate and require a list.
    pub fn get_list(&self) -> Result<Value, EvalError> {
        match self.force()? {
            list @ Value::List(_) => Ok(list),
            other => Err(self.mismatch("list", &other)),
        }
    }

    #[cold]
    fn mismatch(&self, expected: &'static str, got: &Value) -> EvalError {
        self.annotate(type_mismatch(expected, got.type_name()).or_span(self.node.span()))
    }

    fn annotate(&self, err: EvalError) -> EvalError {
        let op = self.operator;
        let note = match (self.count, self.position) {
            (1, _) => format!("operand of {op}"),
            (2, 0) => format!("lhs of {op}"),
            (2, 1) => format!("rhs of {op}"),
            (_, i) => format!("argument #{} of {op}", i + 1),
        };
        err.in_context(note)
    }
}
