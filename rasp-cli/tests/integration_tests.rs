//! End-to-end acceptance programs run through the whole pipeline, checked
//! against their printed results.

use rasp::{Environment, eval_program, register_stdlib};

fn eval_expr(source: &str) -> String {
    let env = Environment::new();
    register_stdlib(&env);
    match eval_program(source, &env) {
        Ok(result) => result.to_string(),
        Err(e) => format!("Error: {e}"),
    }
}

#[test]
fn test_basic_arithmetic() {
    assert_eq!(eval_expr("(+ 1 2)"), "3");
}

#[test]
fn test_variable_definition() {
    assert_eq!(
        eval_expr(
            "(define x 10)
             (define y 20)
             (+ x y)"
        ),
        "30"
    );
}

#[test]
fn test_quote_sugar() {
    assert_eq!(eval_expr("'x"), "x");
    assert_eq!(eval_expr("'(1 2 3)"), "(1 2 3)");
}

#[test]
fn test_fibonacci() {
    let source = "
        (define fibonacci
          (lambda (n)
            (if (< n 2)
                n
                (+ (fibonacci (- n 1))
                   (fibonacci (- n 2))))))
        (fibonacci 7)";
    assert_eq!(eval_expr(source), "13");
}

#[test]
fn test_nested_lists_and_functions() {
    let source = "
        (define lst1 (list 1 2 3))
        (define lst2 (list 4 5 6))
        (list (car lst1) (car (cdr lst2)))";
    assert_eq!(eval_expr(source), "(1 5)");
}

#[test]
fn test_reverse_via_accumulator() {
    let source = "
        (define reverse-helper
          (lambda (lst acc)
            (if (null? lst)
                acc
                (reverse-helper (cdr lst)
                                (cons (car lst) acc)))))
        (define reverse
          (lambda (lst)
            (reverse-helper lst '())))
        (reverse (list 1 2 3 4))";
    assert_eq!(eval_expr(source), "(4 3 2 1)");
}

#[test]
fn test_filter() {
    let source = "
        (define filter
          (lambda (pred lst)
            (if (null? lst)
                '()
                (if (pred (car lst))
                    (cons (car lst) (filter pred (cdr lst)))
                    (filter pred (cdr lst))))))
        (filter (lambda (x) (> x 2)) (list 1 2 3 4 5))";
    assert_eq!(eval_expr(source), "(3 4 5)");
}

#[test]
fn test_function_composition() {
    let source = "
        (define compose
          (lambda (f g)
            (lambda (x)
              (f (g x)))))
        (define double (lambda (x) (* 2 x)))
        (define square (lambda (x) (* x x)))
        ((compose double square) 3)";
    assert_eq!(eval_expr(source), "18");
}

#[test]
fn test_higher_order_map_with_lambda() {
    assert_eq!(
        eval_expr("(map (lambda (x) (* x x)) (list 1 2 3 4))"),
        "(1 4 9 16)"
    );
}

#[test]
fn test_complex_arithmetic() {
    let source = "
        (define square (lambda (x) (* x x)))
        (define cube (lambda (x) (* x x x)))
        (+ (square 3) (cube 2) (* 2 (+ 3 4)))";
    assert_eq!(eval_expr(source), "31");
}

#[test]
fn test_untaken_error_branch() {
    let source = r#"
        (if (= 1 1)
            (+ 1 2)
            (error "This should not happen"))"#;
    assert_eq!(eval_expr(source), "3");
}

#[test]
fn test_errors_render_with_their_kind() {
    assert_eq!(
        eval_expr("missing"),
        "Error: unbound symbol: missing"
    );
    assert_eq!(
        eval_expr(r#"(error "boom")"#),
        "Error: error: boom"
    );
    assert_eq!(eval_expr("(1 2"), "Error: syntax error: unexpected end of input");
}
