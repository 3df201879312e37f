//! Configuration options for query-string encoding.
//!
//! This module provides types to customize the encoded output:
//!
//! - [`QueryOptions`]: Main configuration struct
//! - [`EncodingMode`]: Percent-encoding flavour (legacy form encoding or strict RFC 3986)
//!
//! ## Examples
//!
//! ```rust
//! use serde_formquery::{encode_with_options, form, EncodingMode, QueryOptions};
//!
//! let data = form!({ "q": "a b", "page": 2 });
//!
//! let options = QueryOptions::new().with_mode(EncodingMode::Strict);
//! assert_eq!(encode_with_options(&data, &options).unwrap(), "q=a%20b&page=2");
//!
//! let options = QueryOptions::new().with_separator(";");
//! assert_eq!(encode_with_options(&data, &options).unwrap(), "q=a+b;page=2");
//! ```

use crate::record::Scope;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Percent-encoding flavour applied to every key and value of one call.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::EncodingMode;
///
/// assert_eq!("rfc3986".parse::<EncodingMode>().unwrap(), EncodingMode::Strict);
/// assert_eq!(EncodingMode::default(), EncodingMode::Legacy);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EncodingMode {
    /// RFC 1738 / `application/x-www-form-urlencoded`: space becomes `+`, `~` is escaped.
    #[default]
    Legacy,
    /// RFC 3986: space becomes `%20`, `~` passes through.
    Strict,
}

impl EncodingMode {
    /// Returns the conventional name of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EncodingMode::Legacy => "rfc1738",
            EncodingMode::Strict => "rfc3986",
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "rfc1738" => Ok(EncodingMode::Legacy),
            "strict" | "rfc3986" => Ok(EncodingMode::Strict),
            _ => Err(Error::invalid_mode(s)),
        }
    }
}

/// Configuration options for one encoding call.
///
/// Every field is optional; the defaults reproduce plain form encoding with
/// the process-wide separator.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{EncodingMode, QueryOptions, Scope};
///
/// let options = QueryOptions::new()
///     .with_numeric_prefix("item_")
///     .with_separator("&amp;")
///     .with_mode(EncodingMode::Strict)
///     .with_scope(Scope::class("User"))
///     .with_max_depth(32);
/// assert_eq!(options.max_depth, Some(32));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptions {
    /// Literal prepended to integer keys of the top-level container.
    pub numeric_prefix: Option<String>,
    /// Literal prepended, unescaped, to every top-level key.
    pub key_prefix: Option<String>,
    /// Separator joining entries. `None` defers to [`settings`](crate::settings).
    pub separator: Option<String>,
    pub mode: EncodingMode,
    /// Calling context used for object member visibility.
    pub scope: Scope,
    /// Maximum container nesting below the top level. `None` means unbounded.
    pub max_depth: Option<usize>,
}

impl QueryOptions {
    /// Creates default options (legacy encoding, public scope, configured separator).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_formquery::{EncodingMode, QueryOptions};
    ///
    /// let options = QueryOptions::new();
    /// assert_eq!(options.mode, EncodingMode::Legacy);
    /// assert!(options.separator.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the literal placed in front of integer keys at the top level.
    ///
    /// Useful when the receiving side cannot accept keys that start with a digit.
    ///
    /// ```rust
    /// use serde_formquery::{encode_with_options, form, QueryOptions};
    ///
    /// let options = QueryOptions::new().with_numeric_prefix("n_");
    /// let out = encode_with_options(&form!(["a", "b"]), &options).unwrap();
    /// assert_eq!(out, "n_0=a&n_1=b");
    /// ```
    #[must_use]
    pub fn with_numeric_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.numeric_prefix = Some(prefix.into());
        self
    }

    /// Sets a literal written, unescaped, before every top-level key.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Sets the separator joining entries. An empty separator is used as-is.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EncodingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the calling context used to decide which object members are visible.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Caps container nesting. Encoding fails with
    /// [`Error::DepthLimitExceeded`] instead of recursing further.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
