//! Encoding a derived struct as a query string.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_formquery::to_string;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Search {
    query: String,
    page: u32,
    per_page: Option<u32>,
    filters: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let search = Search {
        query: "rust serde".to_string(),
        page: 2,
        per_page: None,
        filters: vec!["lang:en".to_string(), "year>2020".to_string()],
    };

    let query = to_string(&search)?;
    println!("Query string:\n{}\n", query);

    assert_eq!(
        query,
        "query=rust+serde&page=2&filters%5B0%5D=lang%3Aen&filters%5B1%5D=year%3E2020"
    );
    println!("✓ None fields are left out");

    Ok(())
}
