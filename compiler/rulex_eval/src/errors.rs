//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category callers match on. `EvalError`
//! wraps a kind with the source span of the node that failed and a chain of
//! context notes added as the failure travels up through operator
//! arguments (`rhs of +`, `argument #1 of if`, ...).
//!
//! Factory functions are the public way to build errors; they are `#[cold]`
//! so the happy path of the evaluator stays compact.

use std::fmt;

use rulex_ir::{Span, Value};

/// Result of evaluating a node.
pub type EvalResult = Result<Value, EvalError>;

/// Argument count an operator accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` arguments satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::OneOf(options) => options.contains(&count),
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::OneOf(options) => {
                for (i, n) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            }
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Structured error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    /// Variable name not bound in the environment.
    UndefinedVariable { name: String },
    /// Operator name not present in the registry.
    UndefinedOperator { name: String },
    /// Operator invoked with an argument count it does not accept.
    ArityMismatch { expected: Arity, got: usize },
    /// Fold operator invoked with zero arguments.
    EmptyArguments,
    /// A forced argument is not of the required kind.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// Integer modulus by zero.
    DivisionByZero,
    /// List index outside `0..len`.
    IndexOutOfBounds { index: i64, len: usize },
    /// Expression binding that would look itself up.
    CyclicBinding { name: String },
    /// Failure raised by a host-defined operator.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedOperator { name } => write!(f, "undefined operator: {name}"),
            Self::ArityMismatch { expected, got } => {
                write!(f, "wrong number of arguments: {got}, expected: {expected}")
            }
            Self::EmptyArguments => write!(f, "empty arguments"),
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: {index}, len: {len}")
            }
            Self::CyclicBinding { name } => write!(f, "cyclic expression binding: {name}"),
            Self::Custom { message } => f.write_str(message),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Span of the innermost node the failure is attributed to.
    pub span: Option<Span>,
    /// Context notes, innermost first.
    pub context: Vec<String>,
}

impl EvalError {
    /// Create a `Custom` error. Host operators use this for their own
    /// failure modes; built-in failures use the specific factories below.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            context: Vec::new(),
        }
    }

    /// Attach a span, replacing any existing one.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` only if the error does not carry one yet.
    #[must_use]
    pub fn or_span(mut self, span: Option<Span>) -> Self {
        if self.span.is_none() {
            self.span = span;
        }
        self
    }

    /// Push a context note. Notes added later describe outer positions.
    #[must_use]
    pub fn in_context(mut self, note: impl Into<String>) -> Self {
        self.context.push(note.into());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for note in self.context.iter().rev() {
            write!(f, "{note} / ")?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(span) = self.span {
            write!(f, " [{span}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_operator(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedOperator {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn empty_arguments() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyArguments)
}

#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn cyclic_binding(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CyclicBinding {
        name: name.to_string(),
    })
}

/// Fail with `ArityMismatch` unless `arity` accepts `count`.
#[inline]
pub fn check_arity(arity: Arity, count: usize) -> Result<(), EvalError> {
    if arity.accepts(count) {
        Ok(())
    } else {
        Err(arity_mismatch(arity, count))
    }
}
