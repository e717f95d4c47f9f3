//! Engine dispatch, lookup failures, spans and context notes.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rulex_ir::{Span, Value};

use super::*;
use crate::errors::EvalErrorKind;
use crate::operators::operator;
use crate::OperatorRegistry;

#[test]
fn literal_evaluates_to_itself() {
    for value in [
        Value::Null,
        Value::Bool(true),
        Value::Number(-3.25),
        Value::from("text"),
        Value::from(vec![Value::from(1), Value::Null]),
    ] {
        let env = Environment::with_operators(OperatorRegistry::new());
        assert_eq!(evaluate(&lit(value.clone()), &env), Ok(value));
    }
}

#[test]
fn variable_lookup() {
    let env = Environment::new().with_variable("x", 4.0);
    assert_eq!(evaluate(&var("x"), &env), Ok(Value::Number(4.0)));
}

#[test]
fn host_integers_compare_as_numbers() {
    let env = Environment::new()
        .with_variable("a", 4_i64)
        .with_variable("b", 7_i8)
        .with_variable("c", 9_usize);
    for (name, expected) in [("a", 4), ("b", 7), ("c", 9)] {
        let node = op("==", [var(name), lit(expected)]);
        assert_eq!(evaluate(&node, &env), Ok(Value::Bool(true)), "{name}");
    }
}

#[test]
fn expression_bindings_evaluate_on_lookup() {
    let nine = op("==", [var("a"), lit(9)]);

    let constant = Environment::new()
        .with_expression("a", op("-", [lit(10), lit(1)]))
        .unwrap();
    assert_eq!(evaluate(&nine, &constant), Ok(Value::Bool(true)));

    let dependent = Environment::new()
        .with_variable("b", 10.0)
        .with_expression("a", op("-", [var("b"), lit(1)]))
        .unwrap();
    assert_eq!(evaluate(&nine, &dependent), Ok(Value::Bool(true)));

    let string = Environment::new().with_expression("a", lit("b")).unwrap();
    assert_eq!(
        evaluate(&op("==", [var("a"), lit("b")]), &string),
        Ok(Value::Bool(true))
    );
}

#[test]
fn expression_bindings_are_not_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let env = Environment::new()
        .with_operator(
            "tick",
            operator(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Number(1.0))
            }),
        )
        .with_expression("a", op("tick", []))
        .unwrap();
    assert_eq!(
        evaluate(&op("+", [var("a"), var("a")]), &env),
        Ok(Value::Number(2.0))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn expression_binding_failures_name_the_variable() {
    let env = Environment::new()
        .with_expression("a", op("-", [var("b"), lit(1)]))
        .unwrap();
    let err = evaluate(&var("a").with_span(Span::with_len(0, 1)), &env).unwrap_err();
    assert_eq!(
        err.to_string(),
        "value of a / lhs of - / undefined variable: b [pos=0; len=1]"
    );
}

#[test]
fn undefined_variable_carries_span() {
    let node = var("missing").with_span(Span::with_len(2, 7));
    let err = eval_err(&node);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "missing".to_string()
        }
    );
    assert_eq!(err.to_string(), "undefined variable: missing [pos=2; len=7]");
}

#[test]
fn undefined_operator() {
    let err = eval_err(&op("frobnicate", [lit(1)]));
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedOperator {
            name: "frobnicate".to_string()
        }
    );
}

#[test]
fn operator_errors_take_operator_span() {
    let node = op("-", [lit(5), lit(2), lit(1)]).with_span(Span::with_len(0, 9));
    let err = eval_err(&node);
    assert_eq!(err.span, Some(Span::with_len(0, 9)));
}

#[test]
fn arguments_are_passed_in_order() {
    let env = Environment::new().with_operator(
        "concat",
        operator(|args| {
            let mut out = String::new();
            for arg in args {
                if let Value::Str(s) = arg.force()? {
                    out.push_str(&s);
                }
            }
            Ok(Value::from(out))
        }),
    );
    let node = op("concat", [lit("a"), lit("b"), lit("c")]);
    assert_eq!(evaluate(&node, &env), Ok(Value::from("abc")));
}

#[test]
fn deferred_arguments_are_not_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let env = Environment::new()
        .with_operator(
            "tick",
            operator(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Null)
            }),
        )
        .with_operator(
            "twice",
            operator(|args| {
                args[0].force()?;
                args[0].force()
            }),
        );
    evaluate(&op("twice", [op("tick", [])]), &env).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn lazy_arg_exposes_its_node() {
    let env = Environment::new().with_operator(
        "quote",
        operator(|args| Ok(Value::from(args[0].node().to_string()))),
    );
    let node = op("quote", [op("+", [var("a"), lit(1)])]);
    assert_eq!(evaluate(&node, &env), Ok(Value::from("+(a, 1)")));
}

#[test]
fn type_mismatch_names_position_and_span() {
    // x + y * (z ** 2 > 0)
    let cmp = op(">", [op("**", [var("z"), lit(2)]), lit(0)]).with_span(Span::with_len(8, 10));
    let node = op("+", [var("x"), op("*", [var("y"), cmp])]);
    let env = Environment::from_variables([("x", 1.0), ("y", 2.0), ("z", 3.0)]);
    let err = evaluate(&node, &env).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "number",
            got: "bool"
        }
    );
    assert_eq!(
        err.to_string(),
        "rhs of + / rhs of * / type mismatch: expected number, got bool [pos=8; len=10]"
    );
}

#[test]
fn context_for_unary_and_variadic_positions() {
    let err = eval_err(&op("!", [lit(1)]));
    assert_eq!(err.context, vec!["operand of !".to_string()]);

    let err = eval_err(&op("if", [lit(true), var("nope"), lit(0)]));
    assert_eq!(err.context, vec!["argument #2 of if".to_string()]);
}

#[test]
fn host_errors_propagate_unchanged() {
    let env = Environment::new().with_operator("fail", operator(|_| Err(EvalError::new("nope"))));
    let err = evaluate(&op("fail", []), &env).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "nope".to_string()
        }
    );
    assert!(err.context.is_empty());
}

#[test]
fn deep_tree_evaluates() {
    let mut node = lit(0);
    for _ in 0..20_000 {
        node = op("+", [node, lit(1)]);
    }
    assert_eq!(eval_ok(&node), Value::Number(20_000.0));
}
