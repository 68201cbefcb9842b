use gatekeep::{compile, Bindings};

fn main() {
    let (rule, diagnostics) = compile(r#"age >= 18 and status == "active""#);
    if !diagnostics.is_empty() {
        for d in &diagnostics {
            eprintln!("{d}");
        }
        std::process::exit(1);
    }

    println!("{rule}");

    let bindings = Bindings::new().set("age", 25_i64).set("status", "active");
    println!("Result: {}", rule.evaluate(&bindings));
}
