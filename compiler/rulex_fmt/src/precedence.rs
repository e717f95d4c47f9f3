//! Default binding strength of operators.

/// Precedence of literals and variables: they never need parentheses.
pub const LEAF_PRECEDENCE: i32 = i32::MAX;

/// Precedence of the operator `name` applied to `arity` arguments. Higher
/// binds tighter; unknown operators bind tightest of all operators.
pub fn default_precedence(name: &str, arity: usize) -> i32 {
    match name {
        "if" => 0,
        "??" => 1,
        "||" => 2,
        "&&" => 3,
        "==" | "!=" | ">" | "<" | ">=" | "<=" | "=~" | "!~" | "in" => 4,
        "&" | "|" | "^" | "<<" | ">>" => 5,
        "-" if arity == 1 => 8,
        "+" | "-" => 6,
        "*" | "/" | "%" => 7,
        "!" | "~" => 8,
        "**" => 9,
        _ => 10,
    }
}
