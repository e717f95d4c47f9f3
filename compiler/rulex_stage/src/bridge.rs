//! Stage tree to node tree.

use std::cell::RefCell;

use rulex_ir::{Node, Span, Value};
use rulex_stack::ensure_sufficient_stack;

use crate::stage::{Parameters, Stage, StageSymbol};
use crate::{BridgeError, StageError};

/// Stands in for real parameters while a value stage's accessor runs, and
/// remembers the last name it was asked for.
#[derive(Default)]
struct ParameterProbe {
    queried: RefCell<Option<String>>,
}

impl Parameters for ParameterProbe {
    fn get(&self, name: &str) -> Result<Value, StageError> {
        *self.queried.borrow_mut() = Some(name.to_string());
        Ok(Value::Number(0.0))
    }
}

/// Convert a legacy stage tree into a node tree.
///
/// Node spans are copied from stage spans. A spliced ternary covers both
/// of its stages.
pub fn bridge(stage: &Stage) -> Result<Node, BridgeError> {
    ensure_sufficient_stack(|| convert(stage))
}

impl Stage {
    /// See [`bridge`].
    pub fn to_node(&self) -> Result<Node, BridgeError> {
        bridge(self)
    }
}

fn convert(stage: &Stage) -> Result<Node, BridgeError> {
    let node = match stage.symbol {
        StageSymbol::Value => variable(stage)?,
        StageSymbol::Literal => Node::literal(call_accessor(stage, None)?),
        StageSymbol::Noop => return bridge(right(stage)?),
        StageSymbol::TernaryFalse => return ternary(stage),
        symbol @ (StageSymbol::Negate | StageSymbol::Invert | StageSymbol::BitwiseNot) => {
            let operand = bridge(right(stage)?)?;
            Node::operator(operator_name(symbol)?, [operand])
        }
        symbol => {
            let name = operator_name(symbol)?;
            let lhs = bridge(left(stage)?)?;
            let rhs = bridge(right(stage)?)?;
            Node::operator(name, [lhs, rhs])
        }
    };
    Ok(spanned(node, stage.span))
}

fn variable(stage: &Stage) -> Result<Node, BridgeError> {
    let probe = ParameterProbe::default();
    call_accessor(stage, Some(&probe))?;
    let name = probe
        .queried
        .into_inner()
        .ok_or(BridgeError::NoParameterQueried)?;
    Ok(Node::variable(name))
}

/// `(cond ? then) : otherwise` becomes `if(cond, then, otherwise)`.
fn ternary(stage: &Stage) -> Result<Node, BridgeError> {
    let marker = bridge(left(stage)?)?;
    let otherwise = bridge(right(stage)?)?;
    let [cond, then] = marker.args() else {
        return Err(BridgeError::MalformedTernary {
            found: marker.to_string(),
        });
    };
    if !marker.is_operator("?") {
        return Err(BridgeError::MalformedTernary {
            found: marker.to_string(),
        });
    }
    tracing::trace!(cond = %cond, "spliced ternary");
    let node = Node::operator("if", [cond.clone(), then.clone(), otherwise]);
    let span = match (marker.span(), stage.span) {
        (Some(a), Some(b)) => Some(a.merge(b)),
        (a, b) => a.or(b),
    };
    Ok(spanned(node, span))
}

fn operator_name(symbol: StageSymbol) -> Result<&'static str, BridgeError> {
    symbol.operator_name().ok_or_else(|| {
        tracing::debug!(%symbol, "stage symbol has no tree equivalent");
        BridgeError::UnknownSymbol { symbol }
    })
}

fn call_accessor(
    stage: &Stage,
    parameters: Option<&dyn Parameters>,
) -> Result<Value, BridgeError> {
    let accessor = stage
        .accessor
        .as_ref()
        .ok_or(BridgeError::MissingAccessor {
            symbol: stage.symbol,
        })?;
    Ok(accessor(parameters)?)
}

fn left(stage: &Stage) -> Result<&Stage, BridgeError> {
    stage.left.as_deref().ok_or(BridgeError::MissingChild {
        symbol: stage.symbol,
        side: "left",
    })
}

fn right(stage: &Stage) -> Result<&Stage, BridgeError> {
    stage.right.as_deref().ok_or(BridgeError::MissingChild {
        symbol: stage.symbol,
        side: "right",
    })
}

fn spanned(node: Node, span: Option<Span>) -> Node {
    match span {
        Some(span) => node.with_span(span),
        None => node,
    }
}
