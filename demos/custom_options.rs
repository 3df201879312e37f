//! Prefixes, separators and encoding modes.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_formquery::{
    encode_with_options, form, settings, to_string_with_options, EncodingMode, QueryOptions,
};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "My App".to_string(),
        version: "1.0.0~rc1".to_string(),
        debug: true,
    };

    println!("Legacy (default):");
    println!("{}\n", serde_formquery::to_string(&config)?);

    println!("Strict RFC 3986:");
    let strict = QueryOptions::new().with_mode(EncodingMode::Strict);
    println!("{}\n", to_string_with_options(&config, &strict)?);

    println!("HTML-safe separator:");
    let html = QueryOptions::new().with_separator("&amp;");
    println!("{}\n", to_string_with_options(&config, &html)?);

    println!("Numeric prefix for a list root:");
    let ids = form!([10, 20, 30]);
    let prefixed = QueryOptions::new().with_numeric_prefix("id_");
    println!("{}\n", encode_with_options(&ids, &prefixed)?);

    println!("Key prefix:");
    let keyed = QueryOptions::new().with_key_prefix("cfg_");
    println!("{}\n", to_string_with_options(&config, &keyed)?);

    println!("Process default separator:");
    let previous = settings::set_arg_separator(";");
    println!("{}", serde_formquery::to_string(&config)?);
    settings::set_arg_separator(previous);

    Ok(())
}
