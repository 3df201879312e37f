//! Ordered map type for query containers.
//!
//! This module provides [`Key`] and [`FormMap`], a wrapper around [`IndexMap`]
//! that keeps entries in insertion order. Insertion order is emission order:
//! the encoder never sorts.
//!
//! Keys are either integer indices or string names, like the keys of a
//! PHP-style associative array. [`FormMap::push`] appends at the next free
//! index, so a map can double as a list.
//!
//! ## Examples
//!
//! ```rust
//! use serde_formquery::{FormMap, Key, Value};
//!
//! let mut map = FormMap::new();
//! map.insert("name", "Alice");
//! map.push("first");
//! map.push("second");
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec![Key::from("name"), Key::Index(0), Key::Index(1)]);
//! ```

use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::fmt;

/// A map key: an integer index or a string name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    #[inline]
    #[must_use]
    pub const fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => f.write_str(name),
        }
    }
}

macro_rules! impl_key_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::Index(i64::from(value))
                }
            }
        )*
    };
}

impl_key_from_integer!(i8, i16, i32, i64, u8, u16, u32);

/// Indices beyond `i64::MAX` become names.
impl From<u64> for Key {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Key::Index(i),
            Err(_) => Key::Name(value.to_string()),
        }
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::from(value as u64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<char> for Key {
    fn from(value: char) -> Self {
        Key::Name(value.to_string())
    }
}

/// Map keys produced by the serde bridge: integers and strings pass through,
/// booleans become `0`/`1` and null becomes the empty name.
impl TryFrom<Value> for Key {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(Key::Index(i)),
            Value::String(s) => Ok(Key::Name(s)),
            Value::Bool(b) => Ok(Key::Index(i64::from(b))),
            Value::Null => Ok(Key::Name(String::new())),
            other => Err(Error::key_must_be_scalar(other.kind_name())),
        }
    }
}

/// An insertion-ordered map of [`Key`]s to [`Value`]s.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{FormMap, Value};
///
/// let mut map = FormMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// // Iteration keeps insertion order
/// let names: Vec<_> = map.keys().map(|k| k.to_string()).collect();
/// assert_eq!(names, vec!["b", "a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormMap {
    entries: IndexMap<Key, Value>,
    next_index: i64,
}

impl FormMap {
    #[must_use]
    pub fn new() -> Self {
        FormMap {
            entries: IndexMap::new(),
            next_index: 0,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FormMap {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Builds a list: values keyed `0..n` in order.
    pub fn from_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut map = FormMap::new();
        for value in values {
            map.push(value);
        }
        map
    }

    /// Inserts a key-value pair.
    ///
    /// Re-inserting an existing key replaces the value in place, keeping its
    /// original position. Returns the old value if there was one.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Index(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value.into())
    }

    /// Appends a value at the next free index and returns that index.
    ///
    /// The next free index is one past the largest integer key ever inserted,
    /// or `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_formquery::FormMap;
    ///
    /// let mut map = FormMap::new();
    /// map.insert(5, "five");
    /// assert_eq!(map.push("six"), 6);
    /// ```
    pub fn push(&mut self, value: impl Into<Value>) -> i64 {
        let index = self.next_index;
        self.insert(index, value);
        index
    }

    #[must_use]
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into())
    }

    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.entries.get_mut(&key.into())
    }

    /// Removes an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries.shift_remove(&key.into())
    }

    #[must_use]
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }
}

/// Maps are equal when they hold the same entries in the same order.
impl PartialEq for FormMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

impl IntoIterator for FormMap {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for FormMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = FormMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
