//! Rulex Opt - tree-rewrite optimizer.
//!
//! Rewrites a [`Node`] into a simpler tree with the same meaning.
//!
//! # Scope
//!
//! Identity and annihilator simplification only:
//! - `&&`/`||` with a literal boolean operand
//! - `+`/`-` with a literal `0`, `*` with a literal `0` or `1`, `/` by `1`
//! - dead branch elimination for `if` with a literal condition
//!
//! Does NOT cover:
//! - constant folding of arbitrary literal subtrees
//! - common subexpression elimination
//!
//! A rule runs once per node, after the node's children were optimized, and
//! its result is not submitted again. The built-in rules only ever return an
//! already-optimized child, a literal, or a unary `-`, so one pass leaves
//! nothing for them to do (`x * 1 + 0` becomes `x`). A host rule whose
//! output matches another rule at the same position waits for the next
//! pass; [`Optimizer::optimize_to_fixpoint`] repeats passes until nothing
//! changes.

mod rules;

use std::fmt;
use std::sync::Arc;

use rulex_ir::{Node, NodeKind};
use rulex_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

/// A rewrite for one operator name. Receives the node with its children
/// already optimized and returns the replacement (or a clone of the input).
pub type Rule = Arc<dyn Fn(&Node) -> Node + Send + Sync>;

/// Wrap a closure as a [`Rule`].
pub fn rule<F>(f: F) -> Rule
where
    F: Fn(&Node) -> Node + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Operator name → rewrite rule.
#[derive(Clone)]
pub struct Optimizer {
    rules: FxHashMap<String, Rule>,
}

impl Optimizer {
    /// Optimizer with the built-in rules.
    pub fn new() -> Self {
        Self {
            rules: rules::table(),
        }
    }

    /// Optimizer with no rules; `optimize` returns an equal tree.
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// Add or replace the rule for `name`.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    #[must_use]
    pub fn without_rule(mut self, name: &str) -> Self {
        self.rules.remove(name);
        self
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// One post-order pass over `node`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn optimize(&self, node: &Node) -> Node {
        let mut rewrites = 0;
        let result = self.rewrite(node, &mut rewrites);
        tracing::trace!(rewrites, "optimize pass");
        result
    }

    /// Repeat passes until one makes no rewrite, or `max_passes` ran.
    pub fn optimize_to_fixpoint(&self, node: &Node, max_passes: usize) -> Node {
        let mut current = node.clone();
        for pass in 0..max_passes {
            let mut rewrites = 0;
            let next = self.rewrite(&current, &mut rewrites);
            if rewrites == 0 {
                tracing::debug!(passes = pass, "optimizer reached a fixed point");
                return next;
            }
            current = next;
        }
        current
    }

    fn rewrite(&self, node: &Node, rewrites: &mut usize) -> Node {
        ensure_sufficient_stack(|| {
            let NodeKind::Operator { name, .. } = node.kind() else {
                return node.clone();
            };

            let before = *rewrites;
            let args: Vec<Node> = node
                .args()
                .iter()
                .map(|arg| self.rewrite(arg, rewrites))
                .collect();
            // Keep the original allocation when no child changed.
            let node = if *rewrites == before {
                node.clone()
            } else {
                node.with_args(args)
            };

            let Some(rule) = self.rules.get(&**name) else {
                return node;
            };
            let result = rule(&node);
            if !result.shares_args_with(&node) {
                tracing::trace!(operator = &**name, from = %node, to = %result, "rewrite");
                *rewrites += 1;
            }
            result
        })
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Optimizer").field("rules", &names).finish()
    }
}

/// One pass with the built-in rules.
pub fn optimize(node: &Node) -> Node {
    Optimizer::new().optimize(node)
}
