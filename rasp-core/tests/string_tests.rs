use rasp::{Environment, Error, Value, eval_program, register_stdlib};

fn run(source: &str) -> Result<Value, Error> {
    let env = Environment::new();
    register_stdlib(&env);
    eval_program(source, &env)
}

fn run_str(source: &str) -> String {
    run(source).unwrap().to_string()
}

#[test]
fn test_strings_are_self_evaluating() {
    assert_eq!(run_str(r#""hello world""#), r#""hello world""#);
}

#[test]
fn test_string_append() {
    assert_eq!(
        run_str(r#"(string-append "foo" "-" "bar")"#),
        r#""foo-bar""#
    );
    assert_eq!(run_str("(string-append)"), r#""""#);
}

#[test]
fn test_string_length_counts_characters_not_bytes() {
    assert_eq!(run_str(r#"(string-length "hello")"#), "5");
    assert_eq!(run_str(r#"(string-length "héllo")"#), "5");
    assert_eq!(run_str(r#"(string-length "")"#), "0");
}

#[test]
fn test_string_length_counts_grapheme_clusters() {
    // é written as 'e' + combining acute is still one perceived character
    assert_eq!(run_str("(string-length \"e\u{301}\")"), "1");
}

#[test]
fn test_substring() {
    assert_eq!(run_str(r#"(substring "hello" 1 3)"#), r#""el""#);
    assert_eq!(run_str(r#"(substring "hello" 0 5)"#), r#""hello""#);
    assert_eq!(run_str(r#"(substring "hello" 2 2)"#), r#""""#);
    assert_eq!(run_str(r#"(substring "héllo" 0 2)"#), r#""hé""#);
}

#[test]
fn test_substring_out_of_bounds_fails() {
    assert!(matches!(
        run(r#"(substring "abc" 0 4)"#),
        Err(Error::Runtime { .. })
    ));
    assert!(matches!(
        run(r#"(substring "abc" 2 1)"#),
        Err(Error::Runtime { .. })
    ));
    assert!(matches!(
        run(r#"(substring "abc" -1 2)"#),
        Err(Error::Runtime { .. })
    ));
}

#[test]
fn test_string_to_symbol() {
    assert_eq!(run_str(r#"(string->symbol "foo")"#), "foo");
    assert_eq!(run_str(r#"(symbol? (string->symbol "foo"))"#), "#t");
    assert_eq!(run_str(r#"(if (= 1 1) (string->symbol "yes") 'no)"#), "yes");
}

#[test]
fn test_escapes_round_trip_through_the_printer() {
    assert_eq!(run_str(r#""line1\nline2""#), r#""line1\nline2""#);
    assert_eq!(run_str(r#""quote: \"""#), r#""quote: \"""#);
}

#[test]
fn test_string_utilities_reject_non_strings() {
    assert!(matches!(run("(string-length 42)"), Err(Error::Runtime { .. })));
    assert!(matches!(
        run(r#"(string-append "a" 1)"#),
        Err(Error::Runtime { .. })
    ));
}
