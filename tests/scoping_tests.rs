//! Lexical scoping and closure capture tests

use lisplet::{parse, Environment, Error, Evaluator, EvaluatorError, Expression, Number};

fn int(n: i64) -> Expression {
    Expression::Number(Number::Int(n))
}

/// Evaluates a sequence of top-level forms in one shared environment
fn eval_program(sources: &[&str]) -> Result<Expression, Error> {
    let env = Environment::global();
    let evaluator = Evaluator::new();
    let mut last = Expression::Bool(false);
    for source in sources {
        last = evaluator.eval(&parse(source)?, &env)?;
    }
    Ok(last)
}

#[test]
fn test_parameter_shadows_global() {
    let result = eval_program(&[
        "(def x 10)",
        "((lambda (x) (* x 2)) 3)",
    ])
    .unwrap();
    assert_eq!(result, int(6));
}

#[test]
fn test_shadowing_ends_with_the_inner_scope() {
    let result = eval_program(&[
        "(def x 10)",
        "((lambda (x) x) 99)",
        "x",
    ])
    .unwrap();
    assert_eq!(result, int(10));
}

#[test]
fn test_closure_reads_free_variables_from_defining_scope() {
    let result = eval_program(&[
        "(def base 100)",
        "(def add-base (lambda (n) (+ base n)))",
        "(add-base 5)",
    ])
    .unwrap();
    assert_eq!(result, int(105));
}

#[test]
fn test_capture_is_by_reference_not_snapshot() {
    // The closure references a free global redefined after the closure was
    // created but before the call; it must observe the updated value
    let result = eval_program(&[
        "(def scale 1)",
        "(def scaled (lambda (n) (* scale n)))",
        "(def scale 10)",
        "(scaled 4)",
    ])
    .unwrap();
    assert_eq!(result, int(40));
}

#[test]
fn test_closure_sees_globals_bound_after_creation() {
    let result = eval_program(&[
        "(def f (lambda (x) (+ x late)))",
        "(def late 10)",
        "(f 1)",
    ])
    .unwrap();
    assert_eq!(result, int(11));
}

#[test]
fn test_returned_closure_keeps_its_defining_scope_alive() {
    let result = eval_program(&[
        "(def make-adder (lambda (n) (lambda (x) (+ x n))))",
        "(def add3 (make-adder 3))",
        "(add3 4)",
    ])
    .unwrap();
    assert_eq!(result, int(7));
}

#[test]
fn test_two_closures_over_distinct_call_scopes() {
    let result = eval_program(&[
        "(def make-adder (lambda (n) (lambda (x) (+ x n))))",
        "(def add1 (make-adder 1))",
        "(def add10 (make-adder 10))",
        "(+ (add1 0) (add10 0))",
    ])
    .unwrap();
    assert_eq!(result, int(11));
}

#[test]
fn test_def_in_closure_body_binds_into_the_call_scope() {
    let result = eval_program(&[
        "((lambda (x) (do (def local 5) (+ x local))) 1)",
    ])
    .unwrap();
    assert_eq!(result, int(6));

    // The call scope is gone; the binding never reached the global scope
    let err = eval_program(&[
        "((lambda (x) (do (def local 5) local)) 1)",
        "local",
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Eval(EvaluatorError::UnboundSymbol { .. })
    ));
}

#[test]
fn test_recursive_procedure_through_global_binding() {
    let result = eval_program(&[
        "(def fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
        "(fact 5)",
    ])
    .unwrap();
    assert_eq!(result, int(120));
}

#[test]
fn test_fn_keyword_builds_the_same_closures() {
    let result = eval_program(&[
        "(def dec (fn (n) (- n 1)))",
        "(dec 8)",
    ])
    .unwrap();
    assert_eq!(result, int(7));
}

#[test]
fn test_deep_user_recursion_hits_the_stack_guard() {
    let env = Environment::global();
    let evaluator = Evaluator::with_max_depth(64);
    evaluator
        .eval(
            &parse("(def spin (lambda (n) (spin (+ n 1))))").unwrap(),
            &env,
        )
        .unwrap();
    let err = evaluator.eval(&parse("(spin 0)").unwrap(), &env).unwrap_err();
    assert!(matches!(err, EvaluatorError::RecursionLimit { .. }));
}
