//! Built-in rewrite rules.
//!
//! `L`/`R` are the first and second child. Every rule matches on the exact
//! argument count it understands and leaves other arities alone.

use rulex_ir::{Node, Value};
use rustc_hash::FxHashMap;

use crate::{rule, Rule};

/// A literal replacing `node`, keeping its span.
fn literal(node: &Node, value: impl Into<Value>) -> Node {
    let replacement = Node::literal(value);
    match node.span() {
        Some(span) => replacement.with_span(span),
        None => replacement,
    }
}

fn and(node: &Node) -> Node {
    let [left, right] = node.args() else {
        return node.clone();
    };
    if left.is_literal(false) || right.is_literal(false) {
        literal(node, false)
    } else if left.is_literal(true) {
        right.clone()
    } else if right.is_literal(true) {
        left.clone()
    } else {
        node.clone()
    }
}

fn or(node: &Node) -> Node {
    let [left, right] = node.args() else {
        return node.clone();
    };
    if left.is_literal(true) || right.is_literal(true) {
        literal(node, true)
    } else if left.is_literal(false) {
        right.clone()
    } else if right.is_literal(false) {
        left.clone()
    } else {
        node.clone()
    }
}

fn add(node: &Node) -> Node {
    match node.args() {
        [left, right] if left.is_literal(0.0) => right.clone(),
        [left, right] if right.is_literal(0.0) => left.clone(),
        _ => node.clone(),
    }
}

fn subtract(node: &Node) -> Node {
    match node.args() {
        // 0 - x -> -x
        [left, right] if left.is_literal(0.0) => node.with_args([right.clone()]),
        [left, right] if right.is_literal(0.0) => left.clone(),
        _ => node.clone(),
    }
}

fn multiply(node: &Node) -> Node {
    let [left, right] = node.args() else {
        return node.clone();
    };
    if left.is_literal(0.0) || right.is_literal(0.0) {
        literal(node, 0.0)
    } else if left.is_literal(1.0) {
        right.clone()
    } else if right.is_literal(1.0) {
        left.clone()
    } else {
        node.clone()
    }
}

fn divide(node: &Node) -> Node {
    match node.args() {
        [left, right] if right.is_literal(1.0) => left.clone(),
        _ => node.clone(),
    }
}

fn conditional(node: &Node) -> Node {
    match node.args() {
        [cond, then, _] if cond.is_literal(true) => then.clone(),
        [cond, _, otherwise] if cond.is_literal(false) => otherwise.clone(),
        _ => node.clone(),
    }
}

pub(crate) fn table() -> FxHashMap<String, Rule> {
    let entries: [(&str, fn(&Node) -> Node); 7] = [
        ("&&", and),
        ("||", or),
        ("+", add),
        ("-", subtract),
        ("*", multiply),
        ("/", divide),
        ("if", conditional),
    ];
    entries
        .into_iter()
        .map(|(name, f)| (name.to_string(), rule(f)))
        .collect()
}
