//! Evaluator tests, grouped by component.

mod engine_tests;

use rulex_ir::{Node, Value};

use crate::{evaluate, Environment, EvalError, EvalResult};

/// Evaluate with the default environment.
fn eval(node: &Node) -> EvalResult {
    evaluate(node, &Environment::new())
}

fn eval_ok(node: &Node) -> Value {
    match eval(node) {
        Ok(value) => value,
        Err(err) => panic!("evaluation of {node} failed: {err}"),
    }
}

fn eval_err(node: &Node) -> EvalError {
    match eval(node) {
        Ok(value) => panic!("evaluation of {node} unexpectedly produced {value}"),
        Err(err) => err,
    }
}

fn lit(value: impl Into<Value>) -> Node {
    Node::literal(value)
}

fn var(name: &str) -> Node {
    Node::variable(name)
}

fn op<const N: usize>(name: &str, args: [Node; N]) -> Node {
    Node::operator(name, args)
}

/// An argument that fails with `UndefinedVariable` if it is ever forced.
fn poison() -> Node {
    var("__never_bound__")
}
