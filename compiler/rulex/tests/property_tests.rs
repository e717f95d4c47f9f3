//! Property-based tests over generated, well-typed expression trees.
//!
//! Numeric trees use `+`, `-`, `*`, unary `-` and `if`; conditions use
//! literals, `>`, `&&` and `||`. Every variable a tree can mention is bound
//! with the right type, so evaluation always succeeds and the optimizer's
//! rewrites must not change the result.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use rulex::{evaluate, evaluate_batch, optimize, Environment, Node, Optimizer, Value};

fn op<const N: usize>(name: &str, args: [Node; N]) -> Node {
    Node::operator(name, args)
}

// -- Strategies --

fn number_leaf() -> BoxedStrategy<Node> {
    prop_oneof![
        (-2i32..=2).prop_map(Node::literal),
        prop::sample::select(vec!["a", "b", "c"]).prop_map(Node::variable),
    ]
    .boxed()
}

fn condition(number: BoxedStrategy<Node>) -> BoxedStrategy<Node> {
    let atom = prop_oneof![
        any::<bool>().prop_map(Node::literal),
        Just(Node::variable("p")),
        (number.clone(), number).prop_map(|(l, r)| op(">", [l, r])),
    ]
    .boxed();
    prop_oneof![
        atom.clone(),
        (atom.clone(), atom.clone()).prop_map(|(l, r)| op("&&", [l, r])),
        (atom.clone(), atom).prop_map(|(l, r)| op("||", [l, r])),
    ]
    .boxed()
}

fn number_tree() -> BoxedStrategy<Node> {
    number_leaf()
        .prop_recursive(5, 48, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| op("+", [l, r])),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| op("-", [l, r])),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| op("*", [l, r])),
                inner.clone().prop_map(|x| op("-", [x])),
                (condition(inner.clone()), inner.clone(), inner)
                    .prop_map(|(c, t, e)| op("if", [c, t, e])),
            ]
        })
        .boxed()
}

fn environment() -> impl Strategy<Value = Environment> {
    (-9i32..=9, -9i32..=9, -9i32..=9, any::<bool>()).prop_map(|(a, b, c, p)| {
        Environment::new()
            .with_variable("a", a)
            .with_variable("b", b)
            .with_variable("c", c)
            .with_variable("p", p)
    })
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1e6f64..1e6).prop_map(Value::Number),
        "[a-z ]{0,12}".prop_map(Value::from),
    ]
}

// -- Properties --

proptest! {
    #[test]
    fn literal_evaluates_to_itself(value in scalar()) {
        let result = evaluate(&Node::literal(value.clone()), &Environment::new());
        prop_assert_eq!(result, Ok(value));
    }

    #[test]
    fn optimizer_preserves_semantics(tree in number_tree(), env in environment()) {
        let expected = evaluate(&tree, &env);
        prop_assert!(expected.is_ok(), "generated tree failed: {}", tree);
        prop_assert_eq!(evaluate(&optimize(&tree), &env), expected);
    }

    #[test]
    fn optimized_tree_is_a_fixed_point(tree in number_tree()) {
        let once = optimize(&tree);
        prop_assert_eq!(optimize(&once), once.clone());
        prop_assert_eq!(Optimizer::new().optimize_to_fixpoint(&tree, 16), once);
    }

    #[test]
    fn optimizer_never_grows_the_tree(tree in number_tree()) {
        prop_assert!(optimize(&tree).size() <= tree.size());
    }

    #[test]
    fn batch_matches_sequential(tree in number_tree(), envs in prop::collection::vec(environment(), 0..8)) {
        let sequential: Vec<_> = envs.iter().map(|env| evaluate(&tree, env)).collect();
        prop_assert_eq!(evaluate_batch(&tree, &envs), sequential);
    }
}
