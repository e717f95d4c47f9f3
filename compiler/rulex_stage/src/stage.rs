//! The legacy stage tree.

use std::fmt;
use std::sync::Arc;

use rulex_ir::{Span, Value};

use crate::StageError;

/// Parameter lookup handed to a stage accessor.
pub trait Parameters {
    fn get(&self, name: &str) -> Result<Value, StageError>;
}

/// A stage's evaluation closure. Value stages read a parameter, literal
/// stages ignore their argument.
pub type StageAccessor =
    Arc<dyn Fn(Option<&dyn Parameters>) -> Result<Value, StageError> + Send + Sync>;

/// Wrap a closure as a [`StageAccessor`].
pub fn accessor<F>(f: F) -> StageAccessor
where
    F: Fn(Option<&dyn Parameters>) -> Result<Value, StageError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a stage computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageSymbol {
    Value,
    Literal,
    /// Parentheses; the wrapped stage is the right child.
    Noop,
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    Req,
    Nreq,
    In,
    And,
    Or,
    Plus,
    Minus,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseLshift,
    BitwiseRshift,
    Multiply,
    Divide,
    Modulus,
    Exponent,
    Negate,
    Invert,
    BitwiseNot,
    TernaryTrue,
    TernaryFalse,
    Coalesce,
    Functional,
    Access,
    Separate,
}

impl StageSymbol {
    /// Operator name in the canonical tree, for symbols that have one.
    ///
    /// `Eq` is spelled `=` by the legacy parser and normalized to `==`.
    pub fn operator_name(self) -> Option<&'static str> {
        let name = match self {
            StageSymbol::Eq => "==",
            StageSymbol::Neq => "!=",
            StageSymbol::Gt => ">",
            StageSymbol::Lt => "<",
            StageSymbol::Gte => ">=",
            StageSymbol::Lte => "<=",
            StageSymbol::Req => "=~",
            StageSymbol::Nreq => "!~",
            StageSymbol::In => "in",
            StageSymbol::And => "&&",
            StageSymbol::Or => "||",
            StageSymbol::Plus => "+",
            StageSymbol::Minus | StageSymbol::Negate => "-",
            StageSymbol::BitwiseAnd => "&",
            StageSymbol::BitwiseOr => "|",
            StageSymbol::BitwiseXor => "^",
            StageSymbol::BitwiseLshift => "<<",
            StageSymbol::BitwiseRshift => ">>",
            StageSymbol::Multiply => "*",
            StageSymbol::Divide => "/",
            StageSymbol::Modulus => "%",
            StageSymbol::Exponent => "**",
            StageSymbol::Invert => "!",
            StageSymbol::BitwiseNot => "~",
            StageSymbol::TernaryTrue => "?",
            StageSymbol::TernaryFalse => ":",
            StageSymbol::Coalesce => "??",
            StageSymbol::Value
            | StageSymbol::Literal
            | StageSymbol::Noop
            | StageSymbol::Functional
            | StageSymbol::Access
            | StageSymbol::Separate => return None,
        };
        Some(name)
    }

    /// Legacy spelling, as the parser prints it.
    pub fn legacy_name(self) -> &'static str {
        match self {
            StageSymbol::Eq => "=",
            StageSymbol::Value => "VALUE",
            StageSymbol::Literal => "LITERAL",
            StageSymbol::Noop => "NOOP",
            StageSymbol::Functional => "FUNCTIONAL",
            StageSymbol::Access => "ACCESS",
            StageSymbol::Separate => "SEPARATE",
            other => other.operator_name().unwrap_or_default(),
        }
    }
}

impl fmt::Display for StageSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.legacy_name())
    }
}

/// One node of the legacy stage tree.
#[derive(Clone)]
pub struct Stage {
    pub symbol: StageSymbol,
    pub left: Option<Box<Stage>>,
    pub right: Option<Box<Stage>>,
    /// Evaluation closure. Only leaf stages need one for bridging.
    pub accessor: Option<StageAccessor>,
    /// Source position of the stage's token, when the parser tracked it.
    pub span: Option<Span>,
}

impl Stage {
    /// A stage with no children and no accessor.
    pub fn new(symbol: StageSymbol) -> Self {
        Self {
            symbol,
            left: None,
            right: None,
            accessor: None,
            span: None,
        }
    }

    /// A value stage with a custom accessor.
    pub fn value<F>(f: F) -> Self
    where
        F: Fn(Option<&dyn Parameters>) -> Result<Value, StageError> + Send + Sync + 'static,
    {
        Self::new(StageSymbol::Value).with_accessor(accessor(f))
    }

    /// A value stage reading parameter `name`, the way the parser builds
    /// them.
    pub fn parameter(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self::value(move |parameters| match parameters {
            Some(parameters) => parameters.get(&name),
            None => Err(StageError::MissingParameter { name: name.clone() }),
        })
    }

    /// A literal stage yielding `value`.
    pub fn literal(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(StageSymbol::Literal).with_accessor(accessor(move |_| Ok(value.clone())))
    }

    /// Parentheses around `inner`.
    pub fn group(inner: Stage) -> Self {
        Self::new(StageSymbol::Noop).with_right(inner)
    }

    pub fn binary(symbol: StageSymbol, left: Stage, right: Stage) -> Self {
        Self::new(symbol).with_left(left).with_right(right)
    }

    /// A prefix operator; the operand is the right child.
    pub fn unary(symbol: StageSymbol, operand: Stage) -> Self {
        Self::new(symbol).with_right(operand)
    }

    /// `cond ? then : otherwise` in the legacy two-stage encoding.
    pub fn ternary(cond: Stage, then: Stage, otherwise: Stage) -> Self {
        Self::binary(
            StageSymbol::TernaryFalse,
            Self::binary(StageSymbol::TernaryTrue, cond, then),
            otherwise,
        )
    }

    #[must_use]
    pub fn with_left(mut self, left: Stage) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: Stage) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    #[must_use]
    pub fn with_accessor(mut self, accessor: StageAccessor) -> Self {
        self.accessor = Some(accessor);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("symbol", &self.symbol)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("accessor", &self.accessor.is_some())
            .field("span", &self.span)
            .finish()
    }
}
