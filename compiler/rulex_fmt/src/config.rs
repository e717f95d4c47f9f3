//! Print configuration and the default node handler.

use std::borrow::Cow;
use std::sync::Arc;

use rulex_ir::{quote_string, Node, NodeKind, Value};
use rustc_hash::FxHashMap;

use crate::precedence::{default_precedence, LEAF_PRECEDENCE};
use crate::printer::{NodeHandler, Printer};
use crate::PrintError;

type LiteralFormatter<T> = Arc<dyn Fn(T) -> String + Send + Sync>;

/// Maps `(operator name, arity)` to a printed name; `None` keeps the name.
pub type OperatorMapper = Arc<dyn Fn(&str, usize) -> Option<String> + Send + Sync>;

/// Precedence override, called with the mapped operator name and arity.
pub type PrecedenceFn = Arc<dyn Fn(&str, usize) -> i32 + Send + Sync>;

/// Renders an operator's arguments in place of the default layout.
pub type OperatorRenderer =
    Arc<dyn Fn(&[Node], &mut Printer<'_>) -> Result<(), PrintError> + Send + Sync>;

/// How a tree is rendered. Every setting is optional; the default prints
/// the canonical operator names with the built-in precedence table.
#[derive(Clone, Default)]
pub struct PrintConfig {
    format_bool: Option<LiteralFormatter<bool>>,
    format_number: Option<LiteralFormatter<f64>>,
    format_string: Option<Arc<dyn Fn(&str) -> String + Send + Sync>>,
    format_variable: Option<Arc<dyn Fn(&str) -> String + Send + Sync>>,
    operator_map: FxHashMap<String, String>,
    operator_mapper: Option<OperatorMapper>,
    infix_operators: FxHashMap<String, bool>,
    precedence: Option<PrecedenceFn>,
    custom_operators: FxHashMap<String, OperatorRenderer>,
}

impl PrintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn format_bool(mut self, f: impl Fn(bool) -> String + Send + Sync + 'static) -> Self {
        self.format_bool = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn format_number(mut self, f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.format_number = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn format_string(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.format_string = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn format_variable(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.format_variable = Some(Arc::new(f));
        self
    }

    /// Print operator `name` as `mapped`, whatever its arity. Takes priority
    /// over [`operator_mapper`](Self::operator_mapper).
    #[must_use]
    pub fn map_operator(mut self, name: impl Into<String>, mapped: impl Into<String>) -> Self {
        self.operator_map.insert(name.into(), mapped.into());
        self
    }

    #[must_use]
    pub fn operator_mapper(
        mut self,
        f: impl Fn(&str, usize) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.operator_mapper = Some(Arc::new(f));
        self
    }

    /// Force the mapped operator name to print infix (or not) when it has
    /// two arguments.
    #[must_use]
    pub fn infix(mut self, mapped: impl Into<String>, infix: bool) -> Self {
        self.infix_operators.insert(mapped.into(), infix);
        self
    }

    /// Replace the precedence table.
    #[must_use]
    pub fn precedence(mut self, f: impl Fn(&str, usize) -> i32 + Send + Sync + 'static) -> Self {
        self.precedence = Some(Arc::new(f));
        self
    }

    /// Render applications of the mapped operator name with `f`.
    #[must_use]
    pub fn custom_operator(
        mut self,
        mapped: impl Into<String>,
        f: impl Fn(&[Node], &mut Printer<'_>) -> Result<(), PrintError> + Send + Sync + 'static,
    ) -> Self {
        self.custom_operators.insert(mapped.into(), Arc::new(f));
        self
    }

    /// Printed name of operator `name` at `arity`.
    pub fn mapped_name<'a>(&'a self, name: &'a str, arity: usize) -> Cow<'a, str> {
        if let Some(mapped) = self.operator_map.get(name) {
            return Cow::Borrowed(mapped.as_str());
        }
        self.operator_mapper
            .as_ref()
            .and_then(|mapper| mapper(name, arity))
            .filter(|mapped| !mapped.is_empty())
            .map_or(Cow::Borrowed(name), Cow::Owned)
    }

    fn is_infix(&self, mapped: &str) -> bool {
        match self.infix_operators.get(mapped) {
            Some(&infix) => infix,
            None => is_symbolic(mapped) || mapped == "in",
        }
    }

    /// Precedence of operator `name` (unmapped) at `arity`.
    pub fn operator_precedence(&self, name: &str, arity: usize) -> i32 {
        match &self.precedence {
            Some(precedence) => precedence(&*self.mapped_name(name, arity), arity),
            None => default_precedence(name, arity),
        }
    }

    /// Precedence of a node as an operand.
    pub fn node_precedence(&self, node: &Node) -> i32 {
        match node.kind() {
            NodeKind::Operator { name, args } => self.operator_precedence(name, args.len()),
            NodeKind::Literal(_) | NodeKind::Variable(_) => LEAF_PRECEDENCE,
        }
    }

    fn literal(&self, value: &Value, printer: &mut Printer<'_>) -> Result<(), PrintError> {
        let text = match value {
            Value::Bool(b) => match &self.format_bool {
                Some(f) => f(*b),
                None => b.to_string(),
            },
            Value::Number(n) => match &self.format_number {
                Some(f) => f(*n),
                None => n.to_string(),
            },
            Value::Str(s) => match &self.format_string {
                Some(f) => f(&**s),
                None => quote_string(s),
            },
            Value::Null | Value::List(_) => {
                return Err(PrintError::UnsupportedLiteral {
                    type_name: value.type_name(),
                });
            }
        };
        printer.append_str(&text);
        Ok(())
    }

    fn variable(&self, name: &str, printer: &mut Printer<'_>) {
        match &self.format_variable {
            Some(f) => printer.append_str(&f(name)),
            None => printer.append_str(name),
        }
    }

    fn operator(
        &self,
        name: &str,
        args: &[Node],
        printer: &mut Printer<'_>,
    ) -> Result<(), PrintError> {
        let arity = args.len();
        let mapped = self.mapped_name(name, arity);
        if let Some(render) = self.custom_operators.get(&*mapped) {
            return render(args, printer);
        }

        let own = self.operator_precedence(name, arity);
        match args {
            // x + y
            [left, right] if self.is_infix(&mapped) => {
                printer.append_group(left, self.node_precedence(left) < own);
                printer.append_str(" ");
                printer.append_str(&mapped);
                printer.append_str(" ");
                printer.append_group(right, self.node_precedence(right) <= own);
            }
            // !x
            [operand] if is_symbolic(&mapped) => {
                printer.append_str(&mapped);
                printer.append_group(operand, self.node_precedence(operand) < own);
            }
            // c ? x : y
            [cond, then, otherwise] if mapped == "if" => {
                printer.append_group(cond, self.node_precedence(cond) <= own);
                printer.append_str(" ? ");
                printer.append_group(then, self.node_precedence(then) <= own);
                printer.append_str(" : ");
                printer.append_group(otherwise, self.node_precedence(otherwise) < own);
            }
            // f(a, b)
            _ => {
                printer.append_str(&mapped);
                printer.append_str("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        printer.append_str(", ");
                    }
                    printer.append_node(arg);
                }
                printer.append_str(")");
            }
        }
        Ok(())
    }
}

impl NodeHandler for PrintConfig {
    fn handle(&self, node: &Node, printer: &mut Printer<'_>) -> Result<(), PrintError> {
        match node.kind() {
            NodeKind::Literal(value) => self.literal(value, printer),
            NodeKind::Variable(name) => {
                self.variable(name, printer);
                Ok(())
            }
            NodeKind::Operator { name, args } => self.operator(name, args, printer),
        }
    }
}

/// Non-empty and free of letters: prints as a symbol rather than a call.
fn is_symbolic(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_alphabetic)
}
