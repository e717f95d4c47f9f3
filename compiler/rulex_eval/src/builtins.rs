//! The default operator table.
//!
//! # Integer operators
//!
//! `&`, `|`, `^`, `<<`, `>>`, `%` and `~` work on integers. Operands are
//! truncated toward zero into `i64` with Rust's saturating float cast:
//! `NaN` becomes 0, magnitudes beyond the `i64` range clamp to
//! `i64::MIN`/`i64::MAX`. Results are widened back to `f64`, which rounds
//! integers above 2^53.
//!
//! Shift amounts are unsigned. A negative amount, or one of 64 or more,
//! shifts every bit out: `<<` yields 0 and `>>` yields 0, or -1 for a
//! negative operand.

use rulex_ir::Value;

use crate::errors::{check_arity, division_by_zero, index_out_of_bounds, Arity};
use crate::operators::{
    binary_numeric_op, binary_op, boolean_fold, checked_binary_numeric_op, numeric_fold,
    operator, unary_boolean_op, unary_numeric_op, Operator,
};
use crate::OperatorRegistry;

#[expect(
    clippy::cast_possible_truncation,
    reason = "truncation toward zero with saturation is the documented conversion"
)]
#[inline]
fn to_int(n: f64) -> i64 {
    n as i64
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer results are widened back into the float domain"
)]
#[inline]
fn to_float(n: i64) -> Value {
    Value::Number(n as f64)
}

/// Shift amount, `None` when it is negative or does not fit a `u32`.
#[inline]
fn shift_amount(n: f64) -> Option<u32> {
    u32::try_from(to_int(n)).ok()
}

fn shift_left(a: f64, b: f64) -> Value {
    let value = to_int(a);
    to_float(
        shift_amount(b)
            .and_then(|amount| value.checked_shl(amount))
            .unwrap_or(0),
    )
}

fn shift_right(a: f64, b: f64) -> Value {
    let value = to_int(a);
    to_float(
        shift_amount(b)
            .and_then(|amount| value.checked_shr(amount))
            .unwrap_or(if value < 0 { -1 } else { 0 }),
    )
}

fn integer_op(f: fn(i64, i64) -> i64) -> Operator {
    binary_numeric_op(move |a, b| to_float(f(to_int(a), to_int(b))))
}

fn math_fn(f: fn(f64) -> f64) -> Operator {
    unary_numeric_op(move |a| Value::Number(f(a)))
}

fn comparison(f: fn(f64, f64) -> bool) -> Operator {
    binary_numeric_op(move |a, b| Value::Bool(f(a, b)))
}

fn arithmetic(f: fn(f64, f64) -> f64) -> Operator {
    binary_numeric_op(move |a, b| Value::Number(f(a, b)))
}

/// Unary negation or binary subtraction, chosen by argument count.
fn minus() -> Operator {
    operator(|args| {
        check_arity(Arity::OneOf(&[1, 2]), args.len())?;
        if let [operand] = args {
            return Ok(Value::Number(-operand.get_numeric()?));
        }
        let left = args[0].get_numeric()?;
        let right = args[1].get_numeric()?;
        Ok(Value::Number(left - right))
    })
}

/// `if(cond, then, else)`: only the selected branch is forced.
fn conditional() -> Operator {
    operator(|args| {
        check_arity(Arity::Exactly(3), args.len())?;
        if args[0].get_boolean()? {
            args[1].force()
        } else {
            args[2].force()
        }
    })
}

/// `left ?? right`: right is forced only when left is null.
fn coalesce() -> Operator {
    operator(|args| {
        check_arity(Arity::Exactly(2), args.len())?;
        match args[0].force()? {
            Value::Null => args[1].force(),
            value => Ok(value),
        }
    })
}

fn modulus() -> Operator {
    checked_binary_numeric_op(|a, b| {
        let divisor = to_int(b);
        if divisor == 0 {
            return Err(division_by_zero());
        }
        Ok(to_float(to_int(a).wrapping_rem(divisor)))
    })
}

/// `array(a, b, ...)`: a list of every forced argument.
fn array() -> Operator {
    operator(|args| {
        let items = args
            .iter()
            .map(crate::LazyArg::force)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::list(items))
    })
}

/// `in(item, list)`: membership by value equality.
fn membership() -> Operator {
    operator(|args| {
        check_arity(Arity::Exactly(2), args.len())?;
        let item = args[0].force()?;
        let list = args[1].get_list()?;
        let found = list.as_list().is_some_and(|items| items.contains(&item));
        Ok(Value::Bool(found))
    })
}

/// `index(list, i)`: element `i`, with `i` truncated toward zero.
fn index() -> Operator {
    operator(|args| {
        check_arity(Arity::Exactly(2), args.len())?;
        let list = args[0].get_list()?;
        let position = to_int(args[1].get_numeric()?);
        let items = list.as_list().unwrap_or_default();
        usize::try_from(position)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(|| index_out_of_bounds(position, items.len()))
    })
}

fn equality(expect_equal: bool) -> Operator {
    binary_op(move |a, b| Value::Bool((a == b) == expect_equal))
}

/// Build the default table.
pub(crate) fn table() -> OperatorRegistry {
    let mut registry = OperatorRegistry::new();
    let mut add = |name: &str, op: Operator| {
        registry.register(name, op);
    };

    // Equality on raw values, no coercion.
    add("==", equality(true));
    add("!=", equality(false));

    // Numeric comparison.
    add(">", comparison(|a, b| a > b));
    add("<", comparison(|a, b| a < b));
    add(">=", comparison(|a, b| a >= b));
    add("<=", comparison(|a, b| a <= b));

    // Short-circuiting boolean folds.
    add("&&", boolean_fold(true, |acc, v| (acc && v, !v)));
    add("||", boolean_fold(false, |acc, v| (acc || v, v)));
    add("!", unary_boolean_op(|a| Value::Bool(!a)));

    // Arithmetic.
    add("+", arithmetic(|a, b| a + b));
    add("-", minus());
    add("*", arithmetic(|a, b| a * b));
    add("/", arithmetic(|a, b| a / b));
    add("**", arithmetic(f64::powf));

    // Integer operators.
    add("&", integer_op(|a, b| a & b));
    add("|", integer_op(|a, b| a | b));
    add("^", integer_op(|a, b| a ^ b));
    add("<<", binary_numeric_op(shift_left));
    add(">>", binary_numeric_op(shift_right));
    add("%", modulus());
    add("~", unary_numeric_op(|a| to_float(!to_int(a))));

    // Control flow.
    add("if", conditional());
    add("??", coalesce());

    // Math functions.
    add("floor", math_fn(f64::floor));
    add("ceil", math_fn(f64::ceil));
    add("round", math_fn(f64::round));
    add("abs", math_fn(f64::abs));
    add("sqrt", math_fn(f64::sqrt));
    add("sin", math_fn(f64::sin));
    add("cos", math_fn(f64::cos));
    add("tan", math_fn(f64::tan));
    add("tanh", math_fn(f64::tanh));
    add("log", math_fn(f64::ln));
    add("log2", math_fn(f64::log2));
    add("log10", math_fn(f64::log10));
    add("min", numeric_fold(f64::min));
    add("max", numeric_fold(f64::max));

    // Lists.
    add("array", array());
    add("in", membership());
    add("index", index());

    registry
}
