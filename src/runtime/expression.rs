use std::fmt;
use std::rc::Rc;

use crate::error::EvaluatorError;
use crate::runtime::EnvRef;

/// The single polymorphic value type of the language
///
/// An `Expression` is both the structural form the reader produces for
/// unevaluated code and the value the evaluator returns; a call form is a
/// `List` whose first element is the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// An identifier; evaluates by environment lookup
    Symbol(String),
    /// An exact integer or a floating value
    Number(Number),
    /// Boolean value
    Bool(bool),
    /// Literal text
    Str(String),
    /// Ordered sequence of expressions; order is program order / list order
    List(Vec<Expression>),
    /// A host-provided procedure
    Builtin(Builtin),
    /// A user-defined procedure created by `lambda`/`fn`
    Closure(Closure),
}

impl Expression {
    /// Returns the variant name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Expression::Symbol(_) => "symbol",
            Expression::Number(_) => "number",
            Expression::Bool(_) => "bool",
            Expression::Str(_) => "string",
            Expression::List(_) => "list",
            Expression::Builtin(_) => "builtin",
            Expression::Closure(_) => "closure",
        }
    }

    /// Renders the canonical textual form used by the printer and the REPL
    pub fn to_lisp_text(&self) -> String {
        self.to_string()
    }

    /// Extracts the number, or fails naming the offending operation
    pub fn expect_number(&self, operation: &str) -> Result<Number, EvaluatorError> {
        match self {
            Expression::Number(n) => Ok(*n),
            other => Err(other.type_mismatch(operation, "number")),
        }
    }

    /// Extracts the list elements, or fails naming the offending operation
    pub fn expect_list(&self, operation: &str) -> Result<&[Expression], EvaluatorError> {
        match self {
            Expression::List(items) => Ok(items),
            other => Err(other.type_mismatch(operation, "list")),
        }
    }

    /// Extracts the symbol name, or fails naming the offending operation
    pub fn expect_symbol(&self, operation: &str) -> Result<&str, EvaluatorError> {
        match self {
            Expression::Symbol(name) => Ok(name),
            other => Err(other.type_mismatch(operation, "symbol")),
        }
    }

    fn type_mismatch(&self, operation: &str, expected: &str) -> EvaluatorError {
        EvaluatorError::Type {
            operation: operation.to_string(),
            expected: expected.to_string(),
            got: self.type_name().to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Symbol(name) => write!(f, "{}", name),
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Bool(b) => write!(f, "{}", b),
            Expression::Str(s) => write!(f, "\"{}\"", s),
            Expression::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Expression::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name()),
            Expression::Closure(closure) => {
                write!(f, "<closure({} params)>", closure.params.len())
            }
        }
    }
}

/// Numeric value: exactly one representation is authoritative
///
/// Arithmetic between the two representations is defined through
/// [`Number::as_f64`], which widens integers to float.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Exact 64-bit integer
    Int(i64),
    /// 64-bit floating value
    Float(f64),
}

impl Number {
    /// Widens to the shared floating representation used by arithmetic
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    pub(crate) fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a + b),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub(crate) fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a - b),
            (a, b) => Number::Float(a.as_f64() - b.as_f64()),
        }
    }

    pub(crate) fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a * b),
            (a, b) => Number::Float(a.as_f64() * b.as_f64()),
        }
    }

    /// Division always follows native floating division
    pub(crate) fn div(self, rhs: Self) -> Self {
        Number::Float(self.as_f64() / rhs.as_f64())
    }
}

impl PartialEq for Number {
    /// Numeric equality over the widened value, regardless of exactness
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            // Floats always print with a decimal point so the canonical
            // form distinguishes them from exact integers
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Native action signature shared by all built-in procedures
///
/// The argument is conventionally a `List` packaging the evaluated call
/// arguments, even for zero or one of them.
pub type NativeFn = fn(Expression) -> Result<Expression, EvaluatorError>;

/// A host-provided procedure exposed as a first-class value
#[derive(Clone)]
pub struct Builtin {
    name: &'static str,
    action: NativeFn,
}

impl Builtin {
    /// Creates a builtin from a name and its native action
    pub fn new(name: &'static str, action: NativeFn) -> Self {
        Builtin { name, action }
    }

    /// Binding name of the procedure
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the native action with the packaged argument list
    pub fn invoke(&self, args: Expression) -> Result<Expression, EvaluatorError> {
        (self.action)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A user-defined procedure pairing parameters, a body, and the captured
/// defining environment
///
/// The environment is captured by reference, not snapshot: mutations to the
/// defining scope after construction are visible on later calls.
#[derive(Clone)]
pub struct Closure {
    /// Parameter names bound positionally at call time
    pub params: Vec<String>,
    /// Body expression evaluated in the call scope
    pub body: Rc<Expression>,
    /// Shared handle to the defining environment
    pub env: EnvRef,
}

impl fmt::Debug for Closure {
    // The captured environment is omitted: its chain may lead back to a
    // binding holding this very closure
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Closure {
    /// Closures compare by identity of their body
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}
