// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-event context: a typed bag of named fields.
//!
//! A context is created when a filesystem event is ingested, deep-copied
//! once per candidate pipeline, mutated by processors, and discarded when
//! the pipeline chain ends. `Clone` is a deep copy; two clones never share
//! state.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Well-known context keys.
pub mod keys {
    pub const SOURCE: &str = "source";
    pub const ORIGINAL: &str = "original";
    pub const RELATIVE_PATH: &str = "relative_path";
    pub const DESTINATION: &str = "destination";
    pub const EVENT: &str = "event";
    pub const IS_DIR: &str = "is_dir";
    pub const TIMESTAMP: &str = "timestamp";
    pub const DATETIME: &str = "datetime";
    pub const FILENAME: &str = "filename";
    pub const PARENT: &str = "parent";
    pub const RELATIVE_PARENT: &str = "relative_parent";
    pub const SUFFIX: &str = "suffix";
    pub const STEM: &str = "stem";
    pub const DIGEST: &str = "digest";
    pub const UUID: &str = "uuid";
    pub const OK: &str = "_ok";
    pub const NAME: &str = "name";
}

/// A scalar stored in a context field.
///
/// User-declared constants from a pipeline's `context` block deserialize
/// into the matching variant; paths produced by the engine keep their
/// `PathBuf` form so processors don't round-trip through strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Path(PathBuf),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Render the value for template substitution.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Path(p) => p.display().to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a scalar (string, integer, float, or bool)")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                i64::try_from(v)
                    .map(Value::Int)
                    .map_err(|_| E::custom("integer out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                Ok(Value::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
                Ok(Value::Str(v))
            }
        }

        d.deserialize_any(ScalarVisitor)
    }
}

/// The mutable record flowing through one pipeline execution.
#[derive(Debug, Clone, Default)]
pub struct Context {
    fields: IndexMap<String, Value>,
    locks: BTreeSet<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Render a field for template substitution.
    pub fn render_field(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(Value::render)
    }

    /// Merge constants into this context, overwriting existing keys.
    pub fn merge(&mut self, constants: &IndexMap<String, Value>) {
        for (k, v) in constants {
            self.fields.insert(k.clone(), v.clone());
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.get(keys::SOURCE).and_then(Value::as_path)
    }

    pub fn set_source(&mut self, path: PathBuf) {
        self.set(keys::SOURCE, Value::Path(path));
    }

    pub fn relative_path(&self) -> Option<&Path> {
        self.get(keys::RELATIVE_PATH).and_then(Value::as_path)
    }

    pub fn destination(&self) -> Option<&Path> {
        self.get(keys::DESTINATION).and_then(Value::as_path)
    }

    pub fn event(&self) -> Option<&str> {
        self.get(keys::EVENT).and_then(Value::as_str)
    }

    pub fn is_dir(&self) -> bool {
        self.get(keys::IS_DIR)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Ingestion timestamp in nanoseconds since the epoch.
    pub fn timestamp_ns(&self) -> Option<i64> {
        self.get(keys::TIMESTAMP).and_then(Value::as_int)
    }

    /// Chain status. A context with no explicit `_ok` counts as good.
    pub fn ok(&self) -> bool {
        self.get(keys::OK).and_then(Value::as_bool).unwrap_or(true)
    }

    pub fn set_ok(&mut self, ok: bool) {
        self.set(keys::OK, Value::Bool(ok));
    }

    /// Lock names currently held on behalf of this context.
    pub fn locks(&self) -> &BTreeSet<String> {
        &self.locks
    }

    pub fn add_lock(&mut self, name: impl Into<String>) {
        self.locks.insert(name.into());
    }

    pub fn remove_lock(&mut self, name: &str) {
        self.locks.remove(name);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
