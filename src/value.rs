//! Dynamic value representation for query encoding.
//!
//! This module provides the [`Value`] enum, the input model of the encoder,
//! together with [`Shared`], the handle type behind objects and references.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, integer, float, string, map, object, reference or resource
//! - [`Shared`]: an identity-carrying `Rc<RefCell<T>>`; clones alias the same container
//! - [`Resource`]: an opaque handle that is never encoded
//!
//! ## Sharing and cycles
//!
//! Maps are owned and form a tree. Objects and references are handles, so the
//! same container can be reachable from several places, including from inside
//! itself:
//!
//! ```rust
//! use serde_formquery::{encode, form, Value};
//!
//! let root = Value::reference(form!({ "id": 7 }));
//! if let Value::Reference(handle) = &root {
//!     if let Some(map) = handle.borrow_mut().as_map_mut() {
//!         map.insert("self", root.clone());
//!     }
//! }
//! // the self-reference is dropped where it would re-enter
//! assert_eq!(encode(&root).unwrap(), "id=7");
//! ```
//!
//! Handles compare and print by identity, never by content, so cyclic graphs
//! can be compared and debug-printed safely. A cycle made of `Rc` handles is
//! never freed; break it with [`Shared::replace`] when that matters.

use crate::{FormMap, Record};
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Shared`] container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(u64);

impl HandleId {
    fn next() -> Self {
        HandleId(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A shared, mutable container with a stable identity.
///
/// Cloning a `Shared` yields another handle to the same container; both
/// report the same [`HandleId`].
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{Shared, Value};
///
/// let a = Shared::new(Value::from(1));
/// let b = a.clone();
/// *b.borrow_mut() = Value::from(2);
/// assert_eq!(a.borrow().as_i64(), Some(2));
/// assert_eq!(a, b);
/// assert_ne!(a, Shared::new(Value::from(2)));
/// ```
pub struct Shared<T> {
    id: HandleId,
    cell: Rc<RefCell<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared {
            id: HandleId::next(),
            cell: Rc::new(RefCell::new(value)),
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Immutably borrows the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    /// Mutably borrows the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.cell.borrow_mut()
    }

    /// Replaces the contents, returning the old value.
    pub fn replace(&self, value: T) -> T {
        self.cell.replace(value)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared {
            id: self.id,
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Shared<T> {}

impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.id.0).finish()
    }
}

/// Handle to an object-like [`Record`].
pub type ObjectRef = Shared<Record>;

/// Handle to a referenced [`Value`].
pub type ValueRef = Shared<Value>;

/// An opaque external handle (file, socket, ...). Never encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub id: i64,
    pub kind: String,
}

impl Resource {
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Resource {
            id,
            kind: kind.into(),
        }
    }
}

/// A dynamically-typed value that can be flattened into a query string.
///
/// # Examples
///
/// ```rust
/// use serde_formquery::{FormMap, Value};
///
/// let mut map = FormMap::new();
/// map.insert("name", "Alice");
/// map.insert("age", 30);
/// let value = Value::from(map);
///
/// assert!(value.is_map());
/// assert_eq!(value.as_map().and_then(|m| m.get("age")), Some(&Value::Integer(30)));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Map(FormMap),
    Object(ObjectRef),
    Reference(ValueRef),
    Resource(Resource),
}

impl Value {
    /// Wraps a value in a fresh reference handle.
    pub fn reference(value: impl Into<Value>) -> Self {
        Value::Reference(Shared::new(value.into()))
    }

    /// Wraps a record in a fresh object handle.
    pub fn object(record: Record) -> Self {
        Value::Object(Shared::new(record))
    }

    /// Short name of the variant, used in error messages and logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Reference(_) => "reference",
            Value::Resource(_) => "resource",
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// Returns `true` for values the encoder never emits (null and resources).
    #[inline]
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Value::Null | Value::Resource(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64` for integers and floats.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&FormMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut FormMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

// TryFrom implementations for extracting scalars from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                other.kind_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.kind_name()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                other.kind_name()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind_name()
            ))),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::String(value.to_string()),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<FormMap> for Value {
    fn from(value: FormMap) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::object(value)
    }
}

impl From<Resource> for Value {
    fn from(value: Resource) -> Self {
        Value::Resource(value)
    }
}

/// Builds an index-keyed map, `0..n` in order.
impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Map(FormMap::from_list(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Timestamps are encoded as RFC 3339 strings.
impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::String(value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Big integers stay integers while they fit in `i64`, else become decimal strings.
impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        match i64::try_from(&value) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::String(value.to_string()),
        }
    }
}
