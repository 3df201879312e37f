//! Objects with visible and hidden members.
//!
//! Run with: cargo run --example records

use serde_formquery::{encode_with_options, QueryOptions, Record, Scope, Value, Visibility};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut session = Record::new("Session").with_ancestor("Model");
    session
        .declare(Visibility::Public, "user", "ada")
        .declare(Visibility::Protected, "expires", 3600)
        .declare(Visibility::Private, "secret", "hunter2")
        .declare_inherited("Model", Visibility::Private, "table", "sessions")
        .declare_uninitialized(Visibility::Public, "cache");
    session.set("theme", "dark");
    let session = Value::from(session);

    for scope in [Scope::Public, Scope::class("Session"), Scope::class("Model")] {
        let options = QueryOptions::new().with_scope(scope.clone());
        let query = encode_with_options(&session, &options)?;
        println!("{:<28} {}", format!("{:?}", scope), query);
    }

    Ok(())
}
