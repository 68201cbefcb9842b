use gatekeep::{Bindings, CompiledRule, FunctionRegistry};

fn main() {
    let rule = CompiledRule::parse(
        r#"age >= 18 and status == "active" and host not_contains @blocked_hosts"#,
    )
    .expect("failed to parse rule");

    let info = rule.info();
    println!("Rule: {rule}");
    println!("Required bindings: {:?}", info.required_bindings());
    println!();

    let bindings = Bindings::new()
        .set("age", 25_i64)
        .set("status", "active")
        .set("host", "shop.example.com")
        .set("blocked_hosts", vec![r"^evil\.", r"\.test$"]);
    let report = rule.evaluate_detailed(&bindings, FunctionRegistry::standard());
    println!("{report}");

    // A missing binding surfaces as an error value instead of a panic.
    let partial = Bindings::new().set("age", 25_i64);
    let report = rule.evaluate_detailed(&partial, FunctionRegistry::standard());
    println!("{report}");
    if let Some(error) = report.error() {
        println!("Error: {error}");
    }
}
