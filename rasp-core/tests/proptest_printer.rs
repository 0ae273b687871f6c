use proptest::prelude::*;
use rasp::{Number, Symbol, Value, parse};

// ============================================================================
// Strategies for Generating Values
// ============================================================================

/// Symbol names that the lexer will classify as symbols again. The filter
/// drops the handful of names ("inf", "nan", ...) that read as floats.
fn symbol_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9?!*+<>=-]{0,8}".prop_filter("must not read back as a number", |s| {
        s.parse::<f64>().is_err()
    })
}

fn atom() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        symbol_name().prop_map(|name| Value::Symbol(Symbol::intern(&name))),
        "[a-zA-Z0-9 !?*+-]{0,12}".prop_map(|s| Value::Str(s.into())),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    atom().prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::list)
    })
}

// ============================================================================
// Printer / Reader Round-Trip Properties
// ============================================================================

proptest! {
    /// Printing is canonical: the printed form reads back as an equal value,
    /// and printing that value again changes nothing.
    #[test]
    fn printed_form_reads_back_unchanged(value in value()) {
        let printed = value.to_string();
        let reparsed = parse(&printed).unwrap();
        prop_assert_eq!(&reparsed, &value);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    /// Integer atoms survive the trip without becoming floats.
    #[test]
    fn integers_stay_integers(n in -1_000_000i64..1_000_000) {
        let printed = Value::from(n).to_string();
        prop_assert!(matches!(
            parse(&printed).unwrap(),
            Value::Number(Number::Int(m)) if m == n
        ));
    }

    /// Finite float atoms survive the trip without becoming integers.
    #[test]
    fn floats_stay_floats(x in -1.0e6f64..1.0e6) {
        let printed = Value::from(x).to_string();
        prop_assert!(matches!(
            parse(&printed).unwrap(),
            Value::Number(Number::Float(y)) if y == x
        ));
    }
}
