//! Building values with the form! macro.
//!
//! Run with: cargo run --example macro

use serde_formquery::{encode, form};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let payload = form!({
        "action": "subscribe",
        "user": {
            "email": "ada@example.com",
            "lists": ["news", "releases"]
        },
        "confirm": true,
        "referrer": null
    });

    println!("{}", encode(&payload)?);

    // Integer keys keep their value; list entries continue after the largest one
    let sparse = form!({ 3: "three", 7: "seven" });
    println!("{}", encode(&sparse)?);

    Ok(())
}
