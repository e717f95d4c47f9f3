//! Operator implementations and the generic constructors they are built from.
//!
//! An [`Operator`] receives its arguments deferred and owns the decision of
//! how many it accepts and which ones to force. The constructors here cover
//! the common shapes (strict binary, strict unary, short-circuiting boolean
//! fold) and are public so hosts can build their own operators the same way
//! the built-in table does.

use std::sync::Arc;

use rulex_ir::Value;

use crate::errors::{check_arity, empty_arguments, Arity, EvalResult};
use crate::LazyArg;

/// An operator implementation: ordered deferred arguments in, value out.
pub type Operator = Arc<dyn Fn(&[LazyArg<'_>]) -> EvalResult + Send + Sync>;

/// Wrap a closure as an [`Operator`].
pub fn operator<F>(f: F) -> Operator
where
    F: Fn(&[LazyArg<'_>]) -> EvalResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Exactly two arguments, both forced in order, `f` applied to the raw values.
pub fn binary_op<F>(f: F) -> Operator
where
    F: Fn(Value, Value) -> Value + Send + Sync + 'static,
{
    operator(move |args| {
        check_arity(Arity::Exactly(2), args.len())?;
        let left = args[0].force()?;
        let right = args[1].force()?;
        Ok(f(left, right))
    })
}

/// Exactly two numeric arguments, forced in order.
pub fn binary_numeric_op<F>(f: F) -> Operator
where
    F: Fn(f64, f64) -> Value + Send + Sync + 'static,
{
    checked_binary_numeric_op(move |a, b| Ok(f(a, b)))
}

/// Like [`binary_numeric_op`] for operations that can fail on their inputs.
pub fn checked_binary_numeric_op<F>(f: F) -> Operator
where
    F: Fn(f64, f64) -> EvalResult + Send + Sync + 'static,
{
    operator(move |args| {
        check_arity(Arity::Exactly(2), args.len())?;
        let left = args[0].get_numeric()?;
        let right = args[1].get_numeric()?;
        f(left, right)
    })
}

/// Exactly one numeric argument.
pub fn unary_numeric_op<F>(f: F) -> Operator
where
    F: Fn(f64) -> Value + Send + Sync + 'static,
{
    operator(move |args| {
        check_arity(Arity::Exactly(1), args.len())?;
        Ok(f(args[0].get_numeric()?))
    })
}

/// Exactly one boolean argument.
pub fn unary_boolean_op<F>(f: F) -> Operator
where
    F: Fn(bool) -> Value + Send + Sync + 'static,
{
    operator(move |args| {
        check_arity(Arity::Exactly(1), args.len())?;
        Ok(f(args[0].get_boolean()?))
    })
}

/// Left fold over one or more boolean arguments.
///
/// Arguments are forced one at a time. `step(acc, value)` returns the new
/// accumulator and whether to stop; once it says stop, the accumulator is
/// returned and the remaining arguments are never forced.
pub fn boolean_fold<F>(initial: bool, step: F) -> Operator
where
    F: Fn(bool, bool) -> (bool, bool) + Send + Sync + 'static,
{
    operator(move |args| {
        if args.is_empty() {
            return Err(empty_arguments());
        }
        let mut acc = initial;
        for arg in args {
            let (next, stop) = step(acc, arg.get_boolean()?);
            if stop {
                return Ok(Value::Bool(next));
            }
            acc = next;
        }
        Ok(Value::Bool(acc))
    })
}

/// Fold over one or more numeric arguments, all of them forced.
pub fn numeric_fold<F>(step: F) -> Operator
where
    F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
{
    operator(move |args| {
        let Some((first, rest)) = args.split_first() else {
            return Err(empty_arguments());
        };
        let mut acc = first.get_numeric()?;
        for arg in rest {
            acc = step(acc, arg.get_numeric()?);
        }
        Ok(Value::Number(acc))
    })
}
