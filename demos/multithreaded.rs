use std::sync::Arc;
use std::thread;

use gatekeep::{Bindings, CompiledRule};

fn main() {
    let rule = Arc::new(
        CompiledRule::parse(r#"age >= 18 and status == "active""#)
            .expect("failed to parse rule"),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let age = 16_i64 + i64::from(i);
                let bindings = Bindings::new().set("age", age).set("status", "active");
                (age, rule.evaluate(&bindings))
            })
        })
        .collect();

    for handle in handles {
        let (age, allowed) = handle.join().expect("thread panicked");
        println!("age {age}: {allowed}");
    }
}
