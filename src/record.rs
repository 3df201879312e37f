//! Object-like records with visibility-tagged members.
//!
//! A [`Record`] is a map whose members carry a [`Visibility`]. Members are
//! stored under *mangled* names so that a private member of a parent class and
//! a public member of the same name can coexist:
//!
//! | visibility  | stored key          |
//! |-------------|---------------------|
//! | public      | `name`              |
//! | protected   | `"\0*\0name"`       |
//! | private     | `"\0Class\0name"`   |
//!
//! When a record is encoded, only members visible from the caller's [`Scope`]
//! are emitted, under their plain (unmangled) name.
//!
//! ```rust
//! use serde_formquery::{encode_with_options, QueryOptions, Record, Scope, Value, Visibility};
//!
//! let mut user = Record::new("User");
//! user.declare(Visibility::Public, "name", "ada")
//!     .declare(Visibility::Private, "token", "s3cr3t");
//! let user = Value::from(user);
//!
//! let public = encode_with_options(&user, &QueryOptions::new()).unwrap();
//! assert_eq!(public, "name=ada");
//!
//! let inside = QueryOptions::new().with_scope(Scope::class("User"));
//! assert_eq!(encode_with_options(&user, &inside).unwrap(), "name=ada&token=s3cr3t");
//! ```

use crate::Value;
use indexmap::IndexMap;

/// Member visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// The calling context members are viewed from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Scope {
    /// Outside any class: public members only.
    #[default]
    Public,
    /// Inside a method of the named class.
    Class(String),
}

impl Scope {
    pub fn class(name: impl Into<String>) -> Self {
        Scope::Class(name.into())
    }
}

/// A decoded member key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberName<'a> {
    pub visibility: Visibility,
    /// Declaring class of a private member.
    pub class: Option<&'a str>,
    pub name: &'a str,
}

/// Builds the stored key for a member.
///
/// `class` is only used for private members.
///
/// ```rust
/// use serde_formquery::record::mangle;
/// use serde_formquery::Visibility;
///
/// assert_eq!(mangle(Visibility::Public, "User", "id"), "id");
/// assert_eq!(mangle(Visibility::Protected, "User", "id"), "\0*\0id");
/// assert_eq!(mangle(Visibility::Private, "User", "id"), "\0User\0id");
/// ```
#[must_use]
pub fn mangle(visibility: Visibility, class: &str, name: &str) -> String {
    match visibility {
        Visibility::Public => name.to_string(),
        Visibility::Protected => format!("\0*\0{}", name),
        Visibility::Private => format!("\0{}\0{}", class, name),
    }
}

/// Splits a stored key back into visibility, declaring class and plain name.
///
/// Keys that do not follow the mangling scheme are treated as public names.
#[must_use]
pub fn unmangle(key: &str) -> MemberName<'_> {
    let public = MemberName {
        visibility: Visibility::Public,
        class: None,
        name: key,
    };
    let Some(rest) = key.strip_prefix('\0') else {
        return public;
    };
    match rest.split_once('\0') {
        Some(("*", name)) => MemberName {
            visibility: Visibility::Protected,
            class: None,
            name,
        },
        Some((class, name)) if !class.is_empty() => MemberName {
            visibility: Visibility::Private,
            class: Some(class),
            name,
        },
        _ => public,
    }
}

/// A single member slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    value: Option<Value>,
    dynamic: bool,
}

impl Property {
    /// The member's value, or `None` for a declared member that was never set.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Dynamic members were added at runtime rather than declared.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }
}

/// An object-like value: a class name plus ordered, visibility-tagged members.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    class: String,
    ancestors: Vec<String>,
    properties: IndexMap<String, Property>,
}

impl Record {
    pub fn new(class: impl Into<String>) -> Self {
        Record {
            class: class.into(),
            ancestors: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Adds a parent class, nearest first.
    #[must_use]
    pub fn with_ancestor(mut self, class: impl Into<String>) -> Self {
        self.ancestors.push(class.into());
        self
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Declares a member of this record's own class.
    pub fn declare(
        &mut self,
        visibility: Visibility,
        name: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        let key = mangle(visibility, &self.class, name);
        self.put(key, Some(value.into()), false)
    }

    /// Declares a member inherited from `declaring_class`.
    ///
    /// Only matters for private members, which stay keyed by the class that
    /// declared them.
    pub fn declare_inherited(
        &mut self,
        declaring_class: &str,
        visibility: Visibility,
        name: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        let key = mangle(visibility, declaring_class, name);
        self.put(key, Some(value.into()), false)
    }

    /// Declares a member that has no value yet. It is skipped when encoding.
    pub fn declare_uninitialized(&mut self, visibility: Visibility, name: &str) -> &mut Self {
        let key = mangle(visibility, &self.class, name);
        self.put(key, None, false)
    }

    /// Sets a public member, adding it as a dynamic member when undeclared.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        match self.properties.get_mut(name) {
            Some(property) => {
                property.value = Some(value.into());
                self
            }
            None => self.put(name.to_string(), Some(value.into()), true),
        }
    }

    fn put(&mut self, key: String, value: Option<Value>, dynamic: bool) -> &mut Self {
        self.properties.insert(key, Property { value, dynamic });
        self
    }

    /// Looks up a member by its stored (mangled) key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Iterates members in declaration order, keyed by stored (mangled) name.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(k, p)| (k.as_str(), p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether the member stored under `key` can be read from `scope`.
    ///
    /// Public members are always visible. Protected members are visible from
    /// this record's class and its ancestors. Private members are visible only
    /// from the class that declared them.
    #[must_use]
    pub fn is_visible(&self, key: &str, scope: &Scope) -> bool {
        let member = unmangle(key);
        match (member.visibility, scope) {
            (Visibility::Public, _) => true,
            (_, Scope::Public) => false,
            (Visibility::Protected, Scope::Class(caller)) => {
                *caller == self.class || self.ancestors.iter().any(|a| a == caller)
            }
            (Visibility::Private, Scope::Class(caller)) => member.class == Some(caller.as_str()),
        }
    }
}
