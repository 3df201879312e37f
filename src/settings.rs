//! Process-wide encoding settings.
//!
//! The only setting is the default argument separator, used whenever a call
//! does not pass [`QueryOptions::with_separator`](crate::QueryOptions::with_separator).
//! It starts out as the value of the `FORMQUERY_ARG_SEPARATOR` environment
//! variable (read once, on first use) and can be replaced at runtime.
//!
//! An empty configured separator means "unset": encoding then joins entries
//! with `&`.
//!
//! ```rust
//! use serde_formquery::settings;
//!
//! let previous = settings::set_arg_separator(";");
//! assert_eq!(settings::arg_separator(), ";");
//! settings::set_arg_separator(previous);
//! ```

use std::sync::{OnceLock, RwLock};

/// Environment variable consulted for the initial default separator.
pub const ARG_SEPARATOR_ENV: &str = "FORMQUERY_ARG_SEPARATOR";

/// Separator used when neither the call nor the process configures one.
pub const FALLBACK_SEPARATOR: &str = "&";

static ARG_SEPARATOR: OnceLock<RwLock<String>> = OnceLock::new();

fn arg_separator_cell() -> &'static RwLock<String> {
    ARG_SEPARATOR.get_or_init(|| RwLock::new(std::env::var(ARG_SEPARATOR_ENV).unwrap_or_default()))
}

/// Returns the configured default separator, which may be empty.
pub fn arg_separator() -> String {
    arg_separator_cell()
        .read()
        .unwrap_or_else(|err| err.into_inner())
        .clone()
}

/// Replaces the default separator and returns the previous one.
pub fn set_arg_separator(separator: impl Into<String>) -> String {
    let mut guard = arg_separator_cell()
        .write()
        .unwrap_or_else(|err| err.into_inner());
    std::mem::replace(&mut *guard, separator.into())
}

/// Picks the separator for one encoding call.
///
/// An explicit separator wins even when empty. Otherwise the configured
/// default is used, falling back to `&` when that is empty.
pub(crate) fn resolve_separator<F>(explicit: Option<&str>, configured: F) -> String
where
    F: FnOnce() -> String,
{
    match explicit {
        Some(separator) => separator.to_string(),
        None => {
            let configured = configured();
            if configured.is_empty() {
                FALLBACK_SEPARATOR.to_string()
            } else {
                configured
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_separator_wins() {
        let configured = || "|".to_string();
        assert_eq!(resolve_separator(Some(";"), configured), ";");
        assert_eq!(resolve_separator(Some(""), configured), "");
    }

    #[test]
    fn test_configured_separator() {
        assert_eq!(resolve_separator(None, || "&amp;".to_string()), "&amp;");
    }

    #[test]
    fn test_empty_configured_falls_back() {
        assert_eq!(resolve_separator(None, String::new), "&");
    }
}
