//! Evaluation environment: variable bindings and the operator registry.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rulex_ir::{Node, NodeKind, Value};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::builtins;
use crate::errors::{cyclic_binding, EvalError};
use crate::operators::Operator;

/// Name → operator mapping consulted for every operator node.
///
/// The table is shared between clones and copied on the first write, so
/// every environment built from the built-in table starts out pointing at
/// the same map.
#[derive(Clone, Default)]
pub struct OperatorRegistry {
    operators: Arc<FxHashMap<String, Operator>>,
}

static BUILTIN: OnceLock<OperatorRegistry> = OnceLock::new();

impl OperatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default operator table. Built once per process, cloned per call.
    pub fn builtin() -> Self {
        BUILTIN.get_or_init(builtins::table).clone()
    }

    /// Register `operator` under `name`, returning the one it replaces.
    pub fn register(&mut self, name: impl Into<String>, operator: Operator) -> Option<Operator> {
        Arc::make_mut(&mut self.operators).insert(name.into(), operator)
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, operator: Operator) -> Self {
        self.register(name, operator);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Operator> {
        if !self.contains(name) {
            return None;
        }
        Arc::make_mut(&mut self.operators).remove(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Operator> {
        self.operators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Everything one `evaluate` call resolves names against.
///
/// Built by the caller right before evaluating and borrowed read-only for
/// the whole walk. `Environment::new()` starts with the built-in operators
/// and no variables.
///
/// A name is bound either to a value or to an expression. Expression
/// bindings are evaluated in this same environment each time the name is
/// looked up, so `a = b - 1` follows whatever `b` is bound to.
#[derive(Clone, Debug)]
pub struct Environment {
    variables: FxHashMap<String, Value>,
    expressions: FxHashMap<String, Node>,
    operators: OperatorRegistry,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Built-in operators, no variables.
    pub fn new() -> Self {
        Self::with_operators(OperatorRegistry::builtin())
    }

    /// Custom operator registry, no variables.
    pub fn with_operators(operators: OperatorRegistry) -> Self {
        Self {
            variables: FxHashMap::default(),
            expressions: FxHashMap::default(),
            operators,
        }
    }

    /// Built-in operators plus the given variables.
    pub fn from_variables<K, V>(variables: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut env = Self::new();
        env.variables.extend(
            variables
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        env
    }

    /// Bind a variable (builder form).
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_variable(name, value);
        self
    }

    /// Register an operator (builder form).
    #[must_use]
    pub fn with_operator(mut self, name: impl Into<String>, operator: Operator) -> Self {
        self.operators.register(name, operator);
        self
    }

    /// Bind an expression (builder form of [`bind_expression`](Self::bind_expression)).
    pub fn with_expression(
        mut self,
        name: impl Into<String>,
        expression: Node,
    ) -> Result<Self, EvalError> {
        self.bind_expression(name, expression)?;
        Ok(self)
    }

    /// Bind a variable, returning the previous value. Replaces an
    /// expression bound to the same name.
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        self.expressions.remove(&name);
        self.variables.insert(name, value.into())
    }

    /// Bind `name` to an expression evaluated on every lookup, returning
    /// the expression it replaces. Replaces a value bound to the same name.
    ///
    /// Fails with `CyclicBinding` if the expression refers back to `name`,
    /// directly or through other expression bindings.
    pub fn bind_expression(
        &mut self,
        name: impl Into<String>,
        expression: Node,
    ) -> Result<Option<Node>, EvalError> {
        let name = name.into();
        if self.reaches(&expression, &name) {
            return Err(cyclic_binding(&name).or_span(expression.span()));
        }
        self.variables.remove(&name);
        Ok(self.expressions.insert(name, expression))
    }

    /// Whether evaluating `root` could look up `target`, following
    /// expression bindings.
    fn reaches(&self, root: &Node, target: &str) -> bool {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node.kind() {
                NodeKind::Literal(_) => {}
                NodeKind::Variable(name) => {
                    if &**name == target {
                        return true;
                    }
                    if let Some(bound) = self.expressions.get(&**name) {
                        if seen.insert(&**name) {
                            stack.push(bound);
                        }
                    }
                }
                NodeKind::Operator { args, .. } => stack.extend(args.iter()),
            }
        }
        false
    }

    /// The value bound to `name`. Expression bindings are not evaluated
    /// here; see [`expression`](Self::expression).
    #[inline]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    #[inline]
    pub fn expression(&self, name: &str) -> Option<&Node> {
        self.expressions.get(name)
    }

    #[inline]
    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.operators.get(name)
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    pub fn operators_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.operators
    }
}
