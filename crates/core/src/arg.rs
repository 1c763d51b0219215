// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processor arguments.
//!
//! A step's `arg` is whatever YAML the configuration author wrote: a
//! scalar for `delay` or `digest`, a list for `execute`, a map for
//! `publish`. The engine deep-copies the declared arg for every
//! invocation and expands all string scalars against the current context,
//! so pipeline definitions stay reusable across events.

use crate::template::{expand, TemplateError};
use crate::Context;
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Arg {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Arg>),
    Map(IndexMap<String, Arg>),
}

impl Arg {
    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Arg]> {
        match self {
            Arg::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Arg>> {
        match self {
            Arg::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Render a scalar to a string; `None` for null, sequences, and maps.
    pub fn render_scalar(&self) -> Option<String> {
        match self {
            Arg::Bool(b) => Some(b.to_string()),
            Arg::Int(i) => Some(i.to_string()),
            Arg::Float(f) => Some(f.to_string()),
            Arg::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Interpret the arg as one name or a list of names.
    ///
    /// `"x"` yields `["x"]`; `["x", "y"]` yields both. Anything else
    /// (including a list with non-string items) is `None`.
    pub fn as_str_list(&self) -> Option<Vec<String>> {
        match self {
            Arg::Str(s) => Some(vec![s.clone()]),
            Arg::Seq(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// Deep-copy with every string scalar expanded against the context,
    /// recursing through sequences and maps.
    pub fn expand(&self, ctx: &Context) -> Result<Arg, TemplateError> {
        Ok(match self {
            Arg::Str(s) => Arg::Str(expand(s, ctx)?),
            Arg::Seq(items) => Arg::Seq(
                items
                    .iter()
                    .map(|item| item.expand(ctx))
                    .collect::<Result<_, _>>()?,
            ),
            Arg::Map(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.expand(ctx)?);
                }
                Arg::Map(out)
            }
            other => other.clone(),
        })
    }
}

impl<'de> Deserialize<'de> for Arg {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct ArgVisitor;

        impl<'de> Visitor<'de> for ArgVisitor {
            type Value = Arg;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a YAML value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Arg, E> {
                Ok(Arg::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Arg, E> {
                Ok(Arg::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Arg, E> {
                Ok(Arg::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Arg, E> {
                Ok(Arg::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Arg, E> {
                i64::try_from(v)
                    .map(Arg::Int)
                    .map_err(|_| E::custom("integer out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Arg, E> {
                Ok(Arg::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Arg, E> {
                Ok(Arg::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Arg, E> {
                Ok(Arg::Str(v))
            }

            fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Arg, S::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Arg::Seq(items))
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Arg, M::Error> {
                let mut out = IndexMap::new();
                while let Some((k, v)) = map.next_entry::<String, Arg>()? {
                    out.insert(k, v);
                }
                Ok(Arg::Map(out))
            }
        }

        d.deserialize_any(ArgVisitor)
    }
}

#[cfg(test)]
#[path = "arg_tests.rs"]
mod tests;
