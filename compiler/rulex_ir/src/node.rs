//! Canonical expression tree.

use std::fmt;
use std::sync::Arc;

use rulex_stack::ensure_sufficient_stack;

use crate::{Span, Value};

/// The three shapes a node can take.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A constant.
    Literal(Value),
    /// A name resolved against the environment at evaluation time.
    Variable(Arc<str>),
    /// An operator application. Arity is decided by the operator, not here.
    Operator { name: Arc<str>, args: Arc<[Node]> },
}

/// Immutable expression tree node.
///
/// Cloning is O(1): operator children are shared through an `Arc`.
/// Equality compares shape and values and ignores spans.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    kind: NodeKind,
    span: Option<Span>,
}

impl Node {
    /// Build a literal node.
    pub fn literal(value: impl Into<Value>) -> Self {
        Node {
            kind: NodeKind::Literal(value.into()),
            span: None,
        }
    }

    /// Build a variable reference.
    pub fn variable(name: impl Into<Arc<str>>) -> Self {
        Node {
            kind: NodeKind::Variable(name.into()),
            span: None,
        }
    }

    /// Build an operator application.
    pub fn operator(name: impl Into<Arc<str>>, args: impl Into<Arc<[Node]>>) -> Self {
        Node {
            kind: NodeKind::Operator {
                name: name.into(),
                args: args.into(),
            },
            span: None,
        }
    }

    /// Attach a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Same operator (name and span) over a new argument list.
    ///
    /// Leaves are returned unchanged.
    #[must_use]
    pub fn with_args(&self, new_args: impl Into<Arc<[Node]>>) -> Self {
        match &self.kind {
            NodeKind::Operator { name, .. } => Node {
                kind: NodeKind::Operator {
                    name: Arc::clone(name),
                    args: new_args.into(),
                },
                span: self.span,
            },
            _ => self.clone(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Variable or operator name; `None` for literals.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Variable(name) | NodeKind::Operator { name, .. } => Some(&**name),
            NodeKind::Literal(_) => None,
        }
    }

    /// Operator arguments; empty for leaves.
    pub fn args(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Operator { args, .. } => &**args,
            _ => &[],
        }
    }

    /// Number of operator arguments; zero for leaves.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args().len()
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_operator_node(&self) -> bool {
        matches!(self.kind, NodeKind::Operator { .. })
    }

    /// Whether this is an application of the operator `name`.
    pub fn is_operator(&self, name: &str) -> bool {
        matches!(&self.kind, NodeKind::Operator { name: n, .. } if &**n == name)
    }

    /// Whether this is a literal equal to `value`.
    pub fn is_literal(&self, value: impl Into<Value>) -> bool {
        match &self.kind {
            NodeKind::Literal(v) => *v == value.into(),
            _ => false,
        }
    }

    /// True when both nodes are the same operator over the same shared
    /// argument slice, or equal leaves. Cheaper than `==` for deciding
    /// whether a rewrite changed anything.
    pub fn shares_args_with(&self, other: &Node) -> bool {
        match (&self.kind, &other.kind) {
            (
                NodeKind::Operator { name: a, args: x },
                NodeKind::Operator { name: b, args: y },
            ) => a == b && Arc::ptr_eq(x, y),
            _ => self.kind == other.kind,
        }
    }

    /// Longest root-to-leaf path, counting nodes. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        ensure_sufficient_stack(|| 1 + self.args().iter().map(Node::depth).max().unwrap_or(0))
    }

    /// Total number of nodes in the tree.
    pub fn size(&self) -> usize {
        ensure_sufficient_stack(|| 1 + self.args().iter().map(Node::size).sum::<usize>())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Unlinks uniquely owned subtrees one level at a time, so dropping a deep
/// chain uses heap space instead of one stack frame per level.
impl Drop for Node {
    fn drop(&mut self) {
        let NodeKind::Operator { args, .. } = &mut self.kind else {
            return;
        };
        if args.is_empty() {
            return;
        }
        let mut pending = vec![std::mem::replace(args, Arc::from(Vec::new()))];
        while let Some(mut level) = pending.pop() {
            let Some(children) = Arc::get_mut(&mut level) else {
                continue;
            };
            for child in children {
                if let NodeKind::Operator { args, .. } = &mut child.kind {
                    if !args.is_empty() {
                        pending.push(std::mem::replace(args, Arc::from(Vec::new())));
                    }
                }
            }
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::literal(value)
    }
}

/// Call-notation rendering (`+(x, 2)`), used for logs and debugging.
/// Source-like output is the printer's job.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match &self.kind {
            NodeKind::Literal(value) => write!(f, "{value}"),
            NodeKind::Variable(name) => f.write_str(name),
            NodeKind::Operator { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        })
    }
}
