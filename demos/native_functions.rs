use gatekeep::{Bindings, CompiledRule, Expr, FunctionError, FunctionRegistry, GatekeepError, Node, Value};
use tracing_subscriber::EnvFilter;

/// `any_of("a", "b", ...)`: a regex list matching any argument literally.
fn any_of(args: &[Expr]) -> Result<Value, FunctionError> {
    if args.is_empty() {
        return Err(FunctionError::new("any_of() needs at least one argument"));
    }
    let escaped = args.iter().map(|arg| regex::escape(arg.token_literal()));
    Ok(gatekeep::RegexList::new(escaped).into())
}

fn main() -> Result<(), GatekeepError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = FunctionRegistry::builder()
        .with_builtins()
        .register("any_of", any_of)
        .build()?;
    println!("{registry:?}");

    let rule = CompiledRule::parse(r#"path contains any_of("/admin", "/.env") or path contains list("\.php$")"#)?;
    println!("{rule}");

    for path in ["/admin/login", "/index.php", "/home", "/.env"] {
        let bindings = Bindings::new().set("path", path);
        println!("{path}: {}", rule.evaluate_with(&bindings, &registry));
    }

    // Unknown to the standard registry: evaluates to false.
    let bindings = Bindings::new().set("path", "/admin");
    println!("standard registry: {}", rule.evaluate(&bindings));

    Ok(())
}
