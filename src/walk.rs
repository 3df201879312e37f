//! Structural walker: depth-first flattening of maps and objects.
//!
//! Each container level hands its children a key decoration. The top level
//! has none (apart from the caller's literal prefixes). Descending through a
//! key `k` produces the prefix `<prefix><k><suffix>%5B` and the suffix `%5D`,
//! so a leaf two levels down is written as `a%5Bb%5D%5Bc%5D=...`.
//!
//! Objects and references are handles that may alias each other. The walker
//! keeps the set of handles on the current path and silently drops any entry
//! that would re-enter one of them.

use crate::record::Scope;
use crate::scalar::{push_key, write_scalar, Decoration, KeyRef, Scalar};
use crate::value::HandleId;
use crate::{EncodingMode, Error, FormMap, QueryOptions, Record, Result, Shared, Value};
use log::{debug, trace};
use std::collections::HashSet;

const OPEN_BRACKET: &str = "%5B";
const CLOSE_BRACKET: &str = "%5D";

/// Decoration and depth of the container currently being walked.
#[derive(Clone, Copy, Debug)]
struct Level<'a> {
    deco: Decoration<'a>,
    depth: usize,
}

pub(crate) struct Walker<'a> {
    output: String,
    separator: &'a str,
    mode: EncodingMode,
    scope: &'a Scope,
    max_depth: Option<usize>,
    /// Handles entered on the active path.
    active: HashSet<HandleId>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(options: &'a QueryOptions, separator: &'a str) -> Self {
        Walker {
            output: String::with_capacity(128),
            separator,
            mode: options.mode,
            scope: &options.scope,
            max_depth: options.max_depth,
            active: HashSet::new(),
        }
    }

    pub(crate) fn into_inner(self) -> String {
        self.output
    }

    /// Walks the top-level value, which must be a map or an object
    /// (possibly behind references).
    pub(crate) fn walk_root(&mut self, value: &Value, root: Decoration<'_>) -> Result<()> {
        let level = Level {
            deco: root,
            depth: 0,
        };
        match value {
            Value::Map(map) => self.walk_map(map, level),
            Value::Object(handle) => {
                self.guarded(handle, |walker, record: &Record| walker.walk_record(record, level))
            }
            Value::Reference(handle) => {
                if self.active.contains(&handle.id()) {
                    return Err(Error::invalid_input_kind("reference"));
                }
                self.guarded(handle, |walker, target: &Value| walker.walk_root(target, root))
            }
            other => Err(Error::invalid_input_kind(other.kind_name())),
        }
    }

    fn walk_map(&mut self, map: &FormMap, level: Level<'_>) -> Result<()> {
        for (key, value) in map {
            let key = match key {
                crate::Key::Index(i) => KeyRef::Index(*i),
                crate::Key::Name(name) => KeyRef::Name(name),
            };
            self.walk_entry(key, value, level)?;
        }
        Ok(())
    }

    fn walk_record(&mut self, record: &Record, level: Level<'_>) -> Result<()> {
        for (stored, property) in record.properties() {
            if !record.is_visible(stored, self.scope) {
                trace!(
                    "skipping member {:?} of {} not visible from {:?}",
                    stored,
                    record.class(),
                    self.scope
                );
                continue;
            }
            let Some(value) = property.value() else {
                trace!("skipping uninitialized member {:?} of {}", stored, record.class());
                continue;
            };
            let name = crate::record::unmangle(stored).name;
            self.walk_entry(KeyRef::Name(name), value, level)?;
        }
        Ok(())
    }

    fn walk_entry(&mut self, key: KeyRef<'_>, value: &Value, level: Level<'_>) -> Result<()> {
        let scalar = match value {
            Value::Null | Value::Resource(_) => {
                trace!("skipping {} value at {:?}", value.kind_name(), key);
                return Ok(());
            }
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Integer(i) => Scalar::Int(*i),
            Value::Float(f) => Scalar::Float(*f),
            Value::String(s) => Scalar::Str(s),
            Value::Map(map) => {
                return self.descend(key, level, |walker, child| walker.walk_map(map, child));
            }
            Value::Object(handle) => {
                if self.is_active(handle) {
                    return Ok(());
                }
                return self.guarded(handle, |walker, record: &Record| {
                    walker.descend(key, level, |walker, child| walker.walk_record(record, child))
                });
            }
            Value::Reference(handle) => {
                if self.is_active(handle) {
                    return Ok(());
                }
                return self.guarded(handle, |walker, target: &Value| {
                    walker.walk_entry(key, target, level)
                });
            }
        };
        write_scalar(
            &mut self.output,
            key,
            scalar,
            &level.deco,
            self.separator,
            self.mode,
        );
        Ok(())
    }

    /// Builds the child decoration for `key` and walks one level down.
    fn descend<F>(&mut self, key: KeyRef<'_>, level: Level<'_>, walk: F) -> Result<()>
    where
        F: FnOnce(&mut Self, Level<'_>) -> Result<()>,
    {
        let depth = level.depth + 1;
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(Error::depth_limit_exceeded(limit));
            }
        }

        let mut prefix = String::with_capacity(level.deco.prefix.len() + 16);
        push_key(&mut prefix, key, &level.deco, self.mode);
        prefix.push_str(OPEN_BRACKET);

        let child = Level {
            deco: Decoration {
                prefix: &prefix,
                suffix: CLOSE_BRACKET,
                numeric_prefix: "",
            },
            depth,
        };
        walk(self, child)
    }

    fn is_active<T>(&self, handle: &Shared<T>) -> bool {
        let active = self.active.contains(&handle.id());
        if active {
            debug!("breaking cycle at handle {}", handle.id().get());
        }
        active
    }

    /// Runs `walk` on the handle's contents with the handle marked active.
    fn guarded<T, F>(&mut self, handle: &Shared<T>, walk: F) -> Result<()>
    where
        F: FnOnce(&mut Self, &T) -> Result<()>,
    {
        self.active.insert(handle.id());
        let contents = handle.borrow();
        let result = walk(self, &*contents);
        drop(contents);
        self.active.remove(&handle.id());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{form, Visibility};

    fn walk(value: &Value, options: &QueryOptions) -> Result<String> {
        let mut walker = Walker::new(options, "&");
        walker.walk_root(value, Decoration::default())?;
        Ok(walker.into_inner())
    }

    fn walk_default(value: &Value) -> String {
        walk(value, &QueryOptions::new()).unwrap()
    }

    #[test]
    fn test_flat_map() {
        let value = form!({ "a": 1, "b": "x y", "c": true });
        assert_eq!(walk_default(&value), "a=1&b=x+y&c=1");
    }

    #[test]
    fn test_nested_brackets() {
        let value = form!({ "a": { "b": 1, "c": { "d": 2 } } });
        assert_eq!(walk_default(&value), "a%5Bb%5D=1&a%5Bc%5D%5Bd%5D=2");
    }

    #[test]
    fn test_nested_index_keys() {
        let value = form!({ "list": ["x", "y"] });
        assert_eq!(walk_default(&value), "list%5B0%5D=x&list%5B1%5D=y");
    }

    #[test]
    fn test_skipped_values_consume_no_separator() {
        let mut map = FormMap::new();
        map.insert("a", Value::Null);
        map.insert("b", Value::Resource(crate::Resource::new(3, "stream")));
        map.insert("c", 1);
        map.insert("d", Value::Null);
        assert_eq!(walk_default(&Value::Map(map)), "c=1");
    }

    #[test]
    fn test_empty_nested_map_emits_nothing() {
        let value = form!({ "a": {}, "b": 2 });
        assert_eq!(walk_default(&value), "b=2");
    }

    #[test]
    fn test_rejects_scalar_root() {
        let err = walk(&Value::from("x"), &QueryOptions::new()).unwrap_err();
        assert_eq!(err, Error::InvalidInputKind { found: "string" });
    }

    #[test]
    fn test_reference_root_is_dereferenced() {
        let root = Value::reference(form!({ "k": "v" }));
        assert_eq!(walk_default(&root), "k=v");
    }

    #[test]
    fn test_self_reference_is_dropped() {
        let handle = Shared::new(form!({ "a": 1 }));
        if let Some(map) = handle.borrow_mut().as_map_mut() {
            map.insert("again", Value::Reference(handle.clone()));
            map.insert("b", 2);
        }
        let root = Value::Reference(handle.clone());
        assert_eq!(walk_default(&root), "a=1&b=2");
        handle.replace(Value::Null);
    }

    #[test]
    fn test_object_cycle_through_child() {
        let parent = Shared::new(Record::new("Node"));
        let child = Shared::new(Record::new("Node"));
        parent
            .borrow_mut()
            .declare(Visibility::Public, "name", "root")
            .declare(Visibility::Public, "child", Value::Object(child.clone()));
        child
            .borrow_mut()
            .declare(Visibility::Public, "name", "leaf")
            .declare(Visibility::Public, "parent", Value::Object(parent.clone()));

        let out = walk_default(&Value::Object(parent.clone()));
        assert_eq!(out, "name=root&child%5Bname%5D=leaf");

        child.replace(Record::new("Node"));
    }

    #[test]
    fn test_shared_sibling_encoded_twice() {
        let shared = Shared::new(form!({ "v": 1 }));
        let mut map = FormMap::new();
        map.insert("x", Value::Reference(shared.clone()));
        map.insert("y", Value::Reference(shared.clone()));
        assert_eq!(walk_default(&Value::Map(map)), "x%5Bv%5D=1&y%5Bv%5D=1");
    }

    #[test]
    fn test_reference_to_scalar() {
        let mut map = FormMap::new();
        map.insert("n", Value::reference(5));
        assert_eq!(walk_default(&Value::Map(map)), "n=5");
    }

    #[test]
    fn test_depth_limit() {
        let value = form!({ "a": { "b": { "c": 1 } } });
        let options = QueryOptions::new().with_max_depth(1);
        assert_eq!(walk(&value, &options), Err(Error::DepthLimitExceeded { limit: 1 }));

        let options = QueryOptions::new().with_max_depth(2);
        assert_eq!(walk(&value, &options).unwrap(), "a%5Bb%5D%5Bc%5D=1");
    }

    #[test]
    fn test_record_visibility_and_unmangling() {
        let mut record = Record::new("Account");
        record
            .declare(Visibility::Public, "id", 9)
            .declare(Visibility::Protected, "role", "admin")
            .declare(Visibility::Private, "pin", 1234)
            .declare_uninitialized(Visibility::Public, "cache");
        let value = Value::from(record);

        assert_eq!(walk_default(&value), "id=9");

        let inside = QueryOptions::new().with_scope(Scope::class("Account"));
        assert_eq!(walk(&value, &inside).unwrap(), "id=9&role=admin&pin=1234");
    }

    #[test]
    fn test_nested_record_uses_same_scope() {
        let mut inner = Record::new("Secret");
        inner
            .declare(Visibility::Public, "label", "x")
            .declare(Visibility::Private, "key", "k");
        let mut outer = FormMap::new();
        outer.insert("s", inner);

        let value = Value::Map(outer);
        assert_eq!(walk_default(&value), "s%5Blabel%5D=x");

        let inside = QueryOptions::new().with_scope(Scope::class("Secret"));
        assert_eq!(walk(&value, &inside).unwrap(), "s%5Blabel%5D=x&s%5Bkey%5D=k");
    }

    #[test]
    fn test_map_keys_are_not_unmangled() {
        let mut map = FormMap::new();
        map.insert("\0*\0p", 1);
        assert_eq!(walk_default(&Value::Map(map)), "%00%2A%00p=1");
    }
}
