use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::EvaluatorError;
use crate::runtime::{builtins, Expression};

/// Shared handle to an environment
///
/// Child scopes and closures hold these, so an environment may outlive the
/// call frame that created it.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A chained mapping from symbol names to expressions
///
/// Lookup walks from this scope outward through the parent chain, giving
/// standard lexical shadowing; `define` always writes into this scope only.
#[derive(Debug, Default)]
pub struct Environment {
    /// Bindings local to this scope
    bindings: HashMap<String, Expression>,
    /// Enclosing scope; the root environment has none
    parent: Option<EnvRef>,
}

impl Environment {
    /// Creates an empty scope with no parent
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Creates the root scope pre-populated with the built-in bindings
    pub fn global() -> EnvRef {
        let env = Environment::new();
        builtins::install(&mut env.borrow_mut());
        env
    }

    /// Creates a child scope chained to `parent`
    pub fn with_parent(parent: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: Some(parent),
        }))
    }

    /// Zips parameter names with argument values into a fresh call scope
    ///
    /// Binding proceeds positionally; a length mismatch is an arity error,
    /// the contract every call site relies on.
    pub fn bind(
        params: &[String],
        args: Vec<Expression>,
        parent: EnvRef,
    ) -> Result<EnvRef, EvaluatorError> {
        if params.len() != args.len() {
            return Err(EvaluatorError::Arity {
                form: "closure".to_string(),
                expected: params.len().to_string(),
                got: args.len(),
            });
        }
        let scope = Environment::with_parent(parent);
        {
            let mut inner = scope.borrow_mut();
            for (name, value) in params.iter().zip(args) {
                inner.define(name.clone(), value);
            }
        }
        Ok(scope)
    }

    /// Resolves a symbol in this scope or the nearest ancestor binding it
    pub fn lookup(&self, name: &str) -> Result<Expression, EvaluatorError> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => Err(EvaluatorError::UnboundSymbol {
                name: name.to_string(),
            }),
        }
    }

    /// Inserts or overwrites a binding in this scope only, never an ancestor
    pub fn define(&mut self, name: String, value: Expression) {
        self.bindings.insert(name, value);
    }

    /// Number of bindings local to this scope
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when this scope holds no local bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
