//! Built-in procedure library installed into every root environment
//!
//! Each native action receives its evaluated call arguments packaged as a
//! single `List` expression, even for zero or one arguments, and returns a
//! new expression or a descriptive [`EvaluatorError`].

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::debug;

use crate::error::EvaluatorError;
use crate::runtime::{Builtin, Environment, Expression, NativeFn, Number};

lazy_static! {
    /// Global table of native procedures, keyed by binding name
    static ref BUILTINS: HashMap<&'static str, NativeFn> = {
        let mut table: HashMap<&'static str, NativeFn> = HashMap::new();
        table.insert("+", native_add);
        table.insert("-", native_sub);
        table.insert("*", native_mul);
        table.insert("/", native_div);
        table.insert(">", native_gt);
        table.insert(">=", native_ge);
        table.insert("<", native_lt);
        table.insert("<=", native_le);
        table.insert("==", native_num_eq);
        table.insert("first", native_first);
        table.insert("rest", native_rest);
        table
    };
}

/// Installs every builtin plus the numeric constants into `env`
pub(crate) fn install(env: &mut Environment) {
    for (name, action) in BUILTINS.iter() {
        env.define(
            (*name).to_string(),
            Expression::Builtin(Builtin::new(*name, *action)),
        );
    }
    env.define(
        "PI".to_string(),
        Expression::Number(Number::Float(std::f64::consts::PI)),
    );
    env.define(
        "E".to_string(),
        Expression::Number(Number::Float(std::f64::consts::E)),
    );
    debug!("installed {} built-in procedures", BUILTINS.len());
}

/// Folds the argument list left to right, seeding from the first element
fn fold_numeric(
    operation: &str,
    args: &Expression,
    combine: fn(Number, Number) -> Number,
) -> Result<Expression, EvaluatorError> {
    let items = args.expect_list(operation)?;
    let (seed, rest) = items.split_first().ok_or_else(|| EvaluatorError::EmptyList {
        operation: operation.to_string(),
    })?;
    let mut acc = seed.expect_number(operation)?;
    for item in rest {
        acc = combine(acc, item.expect_number(operation)?);
    }
    Ok(Expression::Number(acc))
}

/// Pairwise-chained comparison over the widened numeric values
///
/// True only if the predicate holds between every consecutive pair, left to
/// right; every argument is still consumed (and type-checked) even after a
/// pair has failed.
fn chain_compare(
    operation: &str,
    args: &Expression,
    holds: fn(f64, f64) -> bool,
) -> Result<Expression, EvaluatorError> {
    let items = args.expect_list(operation)?;
    let mut widened = Vec::with_capacity(items.len());
    for item in items {
        widened.push(item.expect_number(operation)?.as_f64());
    }
    let result = widened.windows(2).all(|pair| holds(pair[0], pair[1]));
    Ok(Expression::Bool(result))
}

/// Unwraps the conventional single list argument of `first`/`rest`
fn single_list_argument<'a>(
    operation: &str,
    args: &'a Expression,
) -> Result<&'a [Expression], EvaluatorError> {
    let items = args.expect_list(operation)?;
    if items.len() != 1 {
        return Err(EvaluatorError::Arity {
            form: operation.to_string(),
            expected: "1".to_string(),
            got: items.len(),
        });
    }
    items[0].expect_list(operation)
}

fn native_add(args: Expression) -> Result<Expression, EvaluatorError> {
    fold_numeric("+", &args, Number::add)
}

fn native_sub(args: Expression) -> Result<Expression, EvaluatorError> {
    fold_numeric("-", &args, Number::sub)
}

fn native_mul(args: Expression) -> Result<Expression, EvaluatorError> {
    fold_numeric("*", &args, Number::mul)
}

fn native_div(args: Expression) -> Result<Expression, EvaluatorError> {
    fold_numeric("/", &args, Number::div)
}

fn native_gt(args: Expression) -> Result<Expression, EvaluatorError> {
    chain_compare(">", &args, |a, b| a > b)
}

fn native_ge(args: Expression) -> Result<Expression, EvaluatorError> {
    chain_compare(">=", &args, |a, b| a >= b)
}

fn native_lt(args: Expression) -> Result<Expression, EvaluatorError> {
    chain_compare("<", &args, |a, b| a < b)
}

fn native_le(args: Expression) -> Result<Expression, EvaluatorError> {
    chain_compare("<=", &args, |a, b| a <= b)
}

/// Numeric chained equality; structural equality over lists, strings and
/// bools is deliberately not provided
#[allow(clippy::float_cmp)]
fn native_num_eq(args: Expression) -> Result<Expression, EvaluatorError> {
    // Degenerate case: a bare symbol compares equal to itself
    if matches!(args, Expression::Symbol(_)) {
        return Ok(Expression::Bool(true));
    }
    chain_compare("==", &args, |a, b| a == b)
}

fn native_first(args: Expression) -> Result<Expression, EvaluatorError> {
    let list = single_list_argument("first", &args)?;
    list.first().cloned().ok_or_else(|| EvaluatorError::EmptyList {
        operation: "first".to_string(),
    })
}

fn native_rest(args: Expression) -> Result<Expression, EvaluatorError> {
    let list = single_list_argument("rest", &args)?;
    if list.is_empty() {
        return Err(EvaluatorError::EmptyList {
            operation: "rest".to_string(),
        });
    }
    Ok(Expression::List(list[1..].to_vec()))
}
