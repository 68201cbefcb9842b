
use gatekeep::{compile, Bindings, CompiledRule, FunctionRegistry, Value};
use proptest::prelude::*;
use strategies::{arb_expr, arb_sample, arb_token_soup};

fn finite() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("must be finite", |f| f.is_finite())
}

fn same_number(actual: &Value, expected: f64) -> bool {
    match actual {
        Value::Number(n) => n.to_bits() == expected.to_bits() || (n.is_nan() && expected.is_nan()),
        _ => false,
    }
}

proptest! {
    /// A compiled rule agrees with a direct computation over the same sample.
    #[test]
    fn evaluation_matches_oracle(expr in arb_expr(3), sample in arb_sample()) {
        let source = expr.source();
        let rule = CompiledRule::parse(&source).unwrap();
        prop_assert_eq!(rule.evaluate(&sample.bindings()), expr.expected(&sample), "source: {}", source);
    }

    /// The canonical form parses back to itself and means the same thing.
    #[test]
    fn canonical_form_is_stable(expr in arb_expr(3), sample in arb_sample()) {
        let rule = CompiledRule::parse(&expr.source()).unwrap();
        let printed = rule.to_string();
        let reparsed = CompiledRule::parse(&printed).unwrap();
        prop_assert_eq!(reparsed.to_string(), printed);
        let bindings = sample.bindings();
        prop_assert_eq!(reparsed.evaluate(&bindings), rule.evaluate(&bindings));
    }

    /// Evaluating the same rule twice gives the same answer.
    #[test]
    fn evaluation_is_idempotent(expr in arb_expr(2), sample in arb_sample()) {
        let rule = CompiledRule::parse(&expr.source()).unwrap();
        let bindings = sample.bindings();
        prop_assert_eq!(rule.evaluate(&bindings), rule.evaluate(&bindings));
    }

    /// Arithmetic over bindings follows IEEE-754 exactly.
    #[test]
    fn arithmetic_is_ieee(x in finite(), y in finite()) {
        let bindings = Bindings::new().set("x", x).set("y", y);
        let registry = FunctionRegistry::standard();
        let cases = [
            ("x + y", x + y),
            ("x - y", x - y),
            ("x * y", x * y),
            ("x / y", x / y),
            ("x % y", x % y),
            ("-x", -x),
        ];
        for (source, expected) in cases {
            let value = CompiledRule::parse(source).unwrap().evaluate_value(&bindings, registry);
            prop_assert!(same_number(&value, expected), "{} gave {:?}, expected {}", source, value, expected);
        }
    }

    /// Division by zero yields an infinity (or NaN for 0/0), never an error.
    #[test]
    fn division_by_zero_is_not_an_error(x in finite()) {
        let bindings = Bindings::new().set("x", x);
        let value = CompiledRule::parse("x / 0")
            .unwrap()
            .evaluate_value(&bindings, FunctionRegistry::standard());
        prop_assert!(same_number(&value, x / 0.0));
    }

    /// Number comparisons agree with `f64` comparisons.
    #[test]
    fn comparisons_match_f64(x in finite(), y in finite()) {
        let bindings = Bindings::new().set("x", x).set("y", y);
        let cases = [
            ("x < y", x < y),
            ("x <= y", x <= y),
            ("x > y", x > y),
            ("x >= y", x >= y),
            ("x == y", x == y),
            ("x != y", x != y),
        ];
        for (source, expected) in cases {
            prop_assert_eq!(CompiledRule::parse(source).unwrap().evaluate(&bindings), expected, "{}", source);
        }
    }

    /// Compiling and evaluating arbitrary text never panics.
    #[test]
    fn arbitrary_text_never_panics(source in "\\PC{0,64}") {
        let (rule, _) = compile(&source);
        let _ = rule.evaluate(&Bindings::new());
        let _ = rule.info();
    }

    /// Token soup never panics. Without diagnostics, `evaluate` is `true`
    /// exactly when the raw value is `Boolean(true)`.
    #[test]
    fn token_soup_never_panics(source in arb_token_soup()) {
        let (rule, diagnostics) = compile(&source);
        let bindings = Bindings::new().set("a", 1_i64).set("l", vec!["x"]);
        let value = rule.evaluate_value(&bindings, FunctionRegistry::standard());
        if diagnostics.is_empty() {
            prop_assert_eq!(rule.evaluate(&bindings), value == Value::Boolean(true));
        }
    }
}
