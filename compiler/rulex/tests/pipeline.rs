//! Legacy stages through bridge, optimizer, printer and evaluator.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use rulex::{
    bridge, evaluate, optimize, print, BridgeError, Environment, PrintConfig, Span, Stage,
    StageSymbol, Value,
};

fn num(n: f64) -> Stage {
    Stage::literal(n)
}

fn param(name: &str) -> Stage {
    Stage::parameter(name)
}

#[test]
fn bridged_ternary_evaluates_and_prints() {
    // (x > 0 ? x : -x) * 1
    let stage = Stage::binary(
        StageSymbol::Multiply,
        Stage::group(Stage::ternary(
            Stage::binary(StageSymbol::Gt, param("x"), num(0.0)),
            param("x"),
            Stage::unary(StageSymbol::Negate, param("x")),
        )),
        num(1.0),
    );
    let node = bridge(&stage).unwrap();
    let config = PrintConfig::new();
    assert_eq!(print(&node, &config).unwrap(), "(x > 0 ? x : -x) * 1");

    let simpler = optimize(&node);
    assert_eq!(print(&simpler, &config).unwrap(), "x > 0 ? x : -x");

    for x in [-4.0_f64, 0.0, 2.5] {
        let env = Environment::new().with_variable("x", x);
        assert_eq!(evaluate(&node, &env), Ok(Value::Number(x.abs())));
        assert_eq!(evaluate(&simpler, &env), evaluate(&node, &env));
    }
}

#[test]
fn bridged_equality_uses_canonical_name() {
    let stage = Stage::binary(
        StageSymbol::And,
        Stage::binary(StageSymbol::Eq, param("role"), Stage::literal("admin")),
        Stage::literal(true),
    );
    let node = bridge(&stage).unwrap();
    let simpler = optimize(&node);
    assert_eq!(
        print(&simpler, &PrintConfig::new()).unwrap(),
        r#"role == "admin""#
    );
    let env = Environment::new().with_variable("role", "admin");
    assert_eq!(evaluate(&node, &env), Ok(Value::Bool(true)));
}

#[test]
fn spans_reach_evaluation_errors() {
    // a + true, with the `+` token at offset 2
    let stage = Stage::binary(
        StageSymbol::Plus,
        param("a").with_span(Span::new(0, 1)),
        Stage::literal(true).with_span(Span::new(4, 8)),
    )
    .with_span(Span::new(2, 3));
    let node = bridge(&stage).unwrap();
    let env = Environment::new().with_variable("a", 1.0);
    let err = evaluate(&node, &env).unwrap_err();
    assert_eq!(err.span, Some(Span::new(4, 8)));
    assert_eq!(
        err.to_string(),
        "rhs of + / type mismatch: expected number, got bool [pos=4; len=4]"
    );
}

#[test]
fn function_stages_are_rejected() {
    let stage = Stage::binary(
        StageSymbol::Plus,
        num(1.0),
        Stage::new(StageSymbol::Functional).with_right(param("x")),
    );
    assert_eq!(
        bridge(&stage),
        Err(BridgeError::UnknownSymbol {
            symbol: StageSymbol::Functional
        })
    );
}
