use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use crate::error::EvaluatorError;
use crate::runtime::{Closure, EnvRef, Environment, Expression};

/// Default cap on nested `eval` frames
///
/// Recursion depth equals expression nesting depth (including recursive user
/// procedures) and there is no tail-call elimination, so the evaluator's own
/// call stack is the limiting resource.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Tree-walking evaluator: special-form dispatch, procedure application and
/// closure construction
///
/// Evaluation is single-threaded, synchronous and recursive; `eval` runs to
/// completion or returns an error, which propagates unchanged with no local
/// recovery.
pub struct Evaluator {
    /// Maximum nested eval frames before evaluation aborts
    max_depth: usize,
    /// Current nesting depth
    depth: Cell<usize>,
}

impl Evaluator {
    /// Creates an evaluator with the default recursion guard
    pub fn new() -> Self {
        Evaluator {
            max_depth: DEFAULT_MAX_DEPTH,
            depth: Cell::new(0),
        }
    }

    /// Creates an evaluator with a custom recursion guard
    pub fn with_max_depth(max_depth: usize) -> Self {
        Evaluator {
            max_depth,
            depth: Cell::new(0),
        }
    }

    /// Evaluates an expression against an environment
    ///
    /// Symbols resolve through the environment chain; `Bool`, `Number` and
    /// `Str` are self-evaluating; lists dispatch to a special form or the
    /// generic evaluate-then-apply call path.
    pub fn eval(&self, expr: &Expression, env: &EnvRef) -> Result<Expression, EvaluatorError> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            return Err(EvaluatorError::RecursionLimit {
                limit: self.max_depth,
            });
        }
        self.depth.set(depth + 1);
        let result = self.eval_form(expr, env);
        self.depth.set(depth);
        result
    }

    fn eval_form(&self, expr: &Expression, env: &EnvRef) -> Result<Expression, EvaluatorError> {
        match expr {
            Expression::Symbol(name) => env.borrow().lookup(name),
            Expression::List(items) => self.eval_list(items, env),
            other => Ok(other.clone()),
        }
    }

    fn eval_list(
        &self,
        items: &[Expression],
        env: &EnvRef,
    ) -> Result<Expression, EvaluatorError> {
        let (operator, rest) = items.split_first().ok_or(EvaluatorError::EmptyCall)?;

        if let Expression::Symbol(name) = operator {
            match name.as_str() {
                "quote" => return self.eval_quote(rest),
                "if" => return self.eval_if(rest, env),
                "def" => return self.eval_def(rest, env),
                "lambda" | "fn" => return self.eval_lambda(rest, env),
                "do" => return self.eval_do(rest, env),
                "cons" => return self.eval_cons(rest, env),
                _ => {}
            }
        }

        // Generic call: evaluate the operator, then every argument left to
        // right against the same environment, then apply
        let callee = self.eval(operator, env)?;
        let mut args = Vec::with_capacity(rest.len());
        for arg in rest {
            args.push(self.eval(arg, env)?);
        }
        self.apply(callee, args)
    }

    fn apply(
        &self,
        callee: Expression,
        args: Vec<Expression>,
    ) -> Result<Expression, EvaluatorError> {
        match callee {
            Expression::Builtin(builtin) => builtin.invoke(Expression::List(args)),
            Expression::Closure(closure) => {
                trace!(params = closure.params.len(), "applying closure");
                let scope = Environment::bind(&closure.params, args, Rc::clone(&closure.env))?;
                self.eval(&closure.body, &scope)
            }
            other => Err(EvaluatorError::NotCallable {
                type_name: other.type_name().to_string(),
            }),
        }
    }

    /// `(quote expr)` returns the argument expression unevaluated
    fn eval_quote(&self, rest: &[Expression]) -> Result<Expression, EvaluatorError> {
        if rest.len() != 1 {
            return Err(arity("quote", "1", rest.len()));
        }
        Ok(rest[0].clone())
    }

    /// `(if cond then else)` evaluates only the chosen branch
    ///
    /// Only `false` selects the else branch; every other value, including
    /// non-booleans, selects the then branch.
    fn eval_if(&self, rest: &[Expression], env: &EnvRef) -> Result<Expression, EvaluatorError> {
        if rest.len() != 3 {
            return Err(arity("if", "3", rest.len()));
        }
        let condition = self.eval(&rest[0], env)?;
        let branch = if matches!(condition, Expression::Bool(false)) {
            &rest[2]
        } else {
            &rest[1]
        };
        self.eval(branch, env)
    }

    /// `(def name expr)` binds into the current environment; returns the
    /// bound value
    fn eval_def(&self, rest: &[Expression], env: &EnvRef) -> Result<Expression, EvaluatorError> {
        if rest.len() != 2 {
            return Err(arity("def", "2", rest.len()));
        }
        let name = rest[0].expect_symbol("def")?.to_string();
        let value = self.eval(&rest[1], env)?;
        env.borrow_mut().define(name, value.clone());
        Ok(value)
    }

    /// `(lambda (params...) body)` constructs a closure capturing the
    /// current environment by reference
    fn eval_lambda(
        &self,
        rest: &[Expression],
        env: &EnvRef,
    ) -> Result<Expression, EvaluatorError> {
        if rest.len() != 2 {
            return Err(arity("lambda", "2", rest.len()));
        }
        let mut params = Vec::new();
        for param in rest[0].expect_list("lambda")? {
            params.push(param.expect_symbol("lambda")?.to_string());
        }
        Ok(Expression::Closure(Closure {
            params,
            body: Rc::new(rest[1].clone()),
            env: Rc::clone(env),
        }))
    }

    /// `(do expr...)` evaluates each expression in order in the current
    /// environment and returns the last value
    fn eval_do(&self, rest: &[Expression], env: &EnvRef) -> Result<Expression, EvaluatorError> {
        let (last, effects) = rest.split_last().ok_or_else(|| arity("do", "at least 1", 0))?;
        for expr in effects {
            self.eval(expr, env)?;
        }
        self.eval(last, env)
    }

    /// `(cons head tail)` prepends the evaluated head onto the evaluated
    /// tail list, building a new list
    fn eval_cons(&self, rest: &[Expression], env: &EnvRef) -> Result<Expression, EvaluatorError> {
        if rest.len() != 2 {
            return Err(arity("cons", "2", rest.len()));
        }
        let head = self.eval(&rest[0], env)?;
        let tail = self.eval(&rest[1], env)?;
        match tail {
            Expression::List(mut items) => {
                items.insert(0, head);
                Ok(Expression::List(items))
            }
            other => Err(EvaluatorError::Type {
                operation: "cons".to_string(),
                expected: "list".to_string(),
                got: other.type_name().to_string(),
            }),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn arity(form: &str, expected: &str, got: usize) -> EvaluatorError {
    EvaluatorError::Arity {
        form: form.to_string(),
        expected: expected.to_string(),
        got,
    }
}
