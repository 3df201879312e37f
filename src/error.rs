//! Error types for form-query encoding.
//!
//! Encoding a well-formed mapping never fails. Errors come from three places:
//!
//! - **Input kind**: the top-level value is not mapping-like
//! - **Hardening**: an optional nesting cap was exceeded
//! - **Serde bridge**: a Rust value could not be turned into a [`Value`](crate::Value)
//!
//! ## Examples
//!
//! ```rust
//! use serde_formquery::{encode, Error, Value};
//!
//! let result = encode(&Value::from(42));
//! assert!(matches!(result, Err(Error::InvalidInputKind { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while building a query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The top-level value is neither a map nor an object.
    #[error("Invalid input kind: expected a map or object, found {found}")]
    InvalidInputKind { found: &'static str },

    /// Nesting went deeper than the configured `max_depth`.
    #[error("Depth limit exceeded: containers nested deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },

    /// A map key could not be used as a query key.
    #[error("Map keys must be integers or strings, found {0}")]
    KeyMustBeScalar(String),

    /// An encoding mode name that is not recognised.
    #[error("Invalid encoding mode: {0:?} (expected legacy, rfc1738, strict or rfc3986)")]
    InvalidMode(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid input error naming the kind that was found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_formquery::Error;
    ///
    /// let err = Error::invalid_input_kind("string");
    /// assert!(err.to_string().contains("found string"));
    /// ```
    pub fn invalid_input_kind(found: &'static str) -> Self {
        Error::InvalidInputKind { found }
    }

    pub fn depth_limit_exceeded(limit: usize) -> Self {
        Error::DepthLimitExceeded { limit }
    }

    /// Creates a key error for map keys that are not integer or string-like.
    pub fn key_must_be_scalar(found: &str) -> Self {
        Error::KeyMustBeScalar(found.to_string())
    }

    pub fn invalid_mode(name: &str) -> Self {
        Error::InvalidMode(name.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_formquery::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
