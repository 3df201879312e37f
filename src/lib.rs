//! # serde_formquery
//!
//! Encode nested data as an `application/x-www-form-urlencoded` query string,
//! using the bracket convention understood by PHP, Rails and most form parsers.
//!
//! ## What does it produce?
//!
//! Nested keys are flattened into `outer[inner]` form, with the brackets
//! themselves percent-encoded:
//!
//! ```rust
//! use serde_formquery::{encode, form};
//!
//! let data = form!({ "a": { "b": 1, "c": 2 } });
//! assert_eq!(encode(&data).unwrap(), "a%5Bb%5D=1&a%5Bc%5D=2");
//! ```
//!
//! ## Key Features
//!
//! - **Ordered**: entries are emitted in insertion order, never sorted
//! - **Two encodings**: legacy form encoding (space as `+`) or strict RFC 3986 (space as `%20`)
//! - **Objects with visibility**: [`Record`] members are filtered by the caller's [`Scope`]
//! - **Cycle safe**: shared [objects](Value::Object) and [references](Value::Reference) that
//!   re-enter themselves are dropped instead of looping
//! - **Serde Compatible**: anything implementing `Serialize` can be encoded directly
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_formquery = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### From Rust types
//!
//! ```rust
//! use serde::Serialize;
//! use serde_formquery::to_string;
//!
//! #[derive(Serialize)]
//! struct Filter {
//!     q: String,
//!     page: u32,
//!     draft: Option<bool>,
//!     tags: Vec<String>,
//! }
//!
//! let filter = Filter {
//!     q: "hello world".to_string(),
//!     page: 1,
//!     draft: None,
//!     tags: vec!["a".to_string(), "b".to_string()],
//! };
//!
//! assert_eq!(
//!     to_string(&filter).unwrap(),
//!     "q=hello+world&page=1&tags%5B0%5D=a&tags%5B1%5D=b"
//! );
//! ```
//!
//! ### With options
//!
//! ```rust
//! use serde_formquery::{encode_with_options, form, EncodingMode, QueryOptions};
//!
//! let data = form!(["x", "y"]);
//! let options = QueryOptions::new()
//!     .with_numeric_prefix("item_")
//!     .with_separator(";")
//!     .with_mode(EncodingMode::Strict);
//!
//! assert_eq!(encode_with_options(&data, &options).unwrap(), "item_0=x;item_1=y");
//! ```
//!
//! ## Encoding rules
//!
//! - `null` values and resources are skipped entirely, and consume no separator
//! - booleans become `1` and `0`
//! - floats use the shortest representation that round-trips
//! - an empty nested container contributes nothing
//! - the top-level value must be a map or an object
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding a derived struct
//! - **`macro.rs`** - Building values with the form! macro
//! - **`nested_values.rs`** - Nested maps, lists and references
//! - **`records.rs`** - Objects with visibility and scopes
//! - **`custom_options.rs`** - Prefixes, separators and encoding modes
//!
//! Run any example with: `cargo run --example <name>`

pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod scalar;
pub mod ser;
pub mod settings;
pub mod value;
mod walk;

pub use error::{Error, Result};
pub use map::{FormMap, Key};
pub use options::{EncodingMode, QueryOptions};
pub use record::{Property, Record, Scope, Visibility};
pub use ser::{to_value, ValueSerializer};
pub use value::{HandleId, ObjectRef, Resource, Shared, Value, ValueRef};

use log::debug;
use scalar::Decoration;
use serde::Serialize;
use std::io;
use walk::Walker;

/// Encode a map or object as a query string with default options.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{encode, form};
///
/// let data = form!({ "flag": true, "skip": null, "n": 0 });
/// assert_eq!(encode(&data).unwrap(), "flag=1&n=0");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInputKind`] when `data` is not a map or an object.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(data: &Value) -> Result<String> {
    encode_with_options(data, &QueryOptions::default())
}

/// Encode a map or object as a query string with custom options.
///
/// The separator is resolved once per call: an explicit
/// [`QueryOptions::separator`] wins, otherwise the process default from
/// [`settings::arg_separator`] is used, falling back to `&`.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{encode_with_options, form, EncodingMode, QueryOptions};
///
/// let data = form!({ "q": "a b" });
/// let legacy = QueryOptions::new();
/// let strict = QueryOptions::new().with_mode(EncodingMode::Strict);
///
/// assert_eq!(encode_with_options(&data, &legacy).unwrap(), "q=a+b");
/// assert_eq!(encode_with_options(&data, &strict).unwrap(), "q=a%20b");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidInputKind`] when `data` is not a map or an object,
/// and [`Error::DepthLimitExceeded`] when nesting goes past
/// [`QueryOptions::max_depth`]. No partial output is returned on error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(data: &Value, options: &QueryOptions) -> Result<String> {
    let separator =
        settings::resolve_separator(options.separator.as_deref(), settings::arg_separator);
    debug!(
        "encoding {} as {} query with separator {:?}",
        data.kind_name(),
        options.mode,
        separator
    );

    let root = Decoration {
        prefix: options.key_prefix.as_deref().unwrap_or(""),
        suffix: "",
        numeric_prefix: options.numeric_prefix.as_deref().unwrap_or(""),
    };
    let mut walker = Walker::new(options, &separator);
    walker.walk_root(data, root)?;
    Ok(walker.into_inner())
}

/// Serialize any `T: Serialize` to a query string.
///
/// Structs and maps work at the top level. Sequences do too, and produce
/// index keys.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted, or if it is a scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &QueryOptions::default())
}

/// Serialize any `T: Serialize` to a query string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{to_string_with_options, QueryOptions};
/// use std::collections::BTreeMap;
///
/// let mut params = BTreeMap::new();
/// params.insert("a", 1);
/// params.insert("b", 2);
///
/// let options = QueryOptions::new().with_separator("&amp;");
/// assert_eq!(to_string_with_options(&params, &options).unwrap(), "a=1&amp;b=2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &QueryOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode_with_options(&to_value(value)?, options)
}

/// Serialize any `T: Serialize` to a writer as a query string.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x=1&y=2");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &QueryOptions::default())
}

/// Serialize any `T: Serialize` to a writer as a query string with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &QueryOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let query = to_string_with_options(value, options)?;
    writer
        .write_all(query.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
