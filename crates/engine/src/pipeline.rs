// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled pipelines.
//!
//! Declarations from `hq-config` are compiled once at startup: matchers
//! become anchored regexes or glob patterns, blacklist entries become
//! patterns, and every step is resolved against the processor registry.
//! Anything unresolvable fails the load.

use crate::error::CompileError;
use crate::processors::{resolve_path, ProcessorFn, Registry};
use hq_config::{PipelineDef, StepDef};
use hq_core::{Arg, Value};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

enum Matcher {
    /// Anchored: the whole relative path must match.
    Re(regex::Regex),
    Glob(glob::Pattern),
}

impl Matcher {
    fn matches(&self, relative: &str) -> bool {
        match self {
            Matcher::Re(re) => re.is_match(relative),
            Matcher::Glob(pattern) => pattern.matches(relative),
        }
    }
}

/// One resolved processor step.
pub struct Step {
    pub kind: String,
    pub run: ProcessorFn,
    pub arg: Arg,
}

/// A pipeline, frozen after configuration load.
pub struct Pipeline {
    pub name: String,
    pub input: PathBuf,
    matcher: Matcher,
    blacklist: Vec<glob::Pattern>,
    context: IndexMap<String, Value>,
    pub process: Vec<Step>,
    pub failure: Vec<Step>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("input", &self.input)
            .finish()
    }
}

impl Pipeline {
    pub fn compile(def: &PipelineDef, registry: &Registry) -> Result<Self, CompileError> {
        let matcher = match (&def.re, &def.glob) {
            (Some(re), None) => Matcher::Re(
                regex::Regex::new(&format!("^(?:{re})$")).map_err(|source| {
                    CompileError::InvalidRegex {
                        pipeline: def.name.clone(),
                        source,
                    }
                })?,
            ),
            (None, Some(pattern)) => {
                Matcher::Glob(compile_pattern(&def.name, pattern)?)
            }
            _ => {
                return Err(CompileError::Matcher {
                    pipeline: def.name.clone(),
                })
            }
        };

        let blacklist = def
            .blacklist
            .iter()
            .map(|pattern| compile_pattern(&def.name, pattern))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            name: def.name.clone(),
            input: resolve_path(&def.input),
            matcher,
            blacklist,
            context: def.context.clone(),
            process: compile_steps(&def.name, &def.process, registry)?,
            failure: compile_steps(&def.name, &def.failure, registry)?,
        })
    }

    /// Decide whether this pipeline handles `source`, returning the
    /// relative path on acceptance. The watched root itself is never
    /// handled.
    pub fn admit(&self, source: &Path) -> Option<PathBuf> {
        if source == self.input {
            return None;
        }
        let relative = source.strip_prefix(&self.input).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        if !self.matcher.matches(&relative.to_string_lossy()) {
            return None;
        }
        if self.is_blacklisted(relative) {
            return None;
        }
        Some(relative.to_path_buf())
    }

    /// Blacklist entries match against every single path component.
    fn is_blacklisted(&self, relative: &Path) -> bool {
        relative.components().any(|component| {
            let component = component.as_os_str().to_string_lossy();
            self.blacklist
                .iter()
                .any(|pattern| pattern.matches(&component))
        })
    }

    /// Constants merged into the context on match.
    pub fn context(&self) -> &IndexMap<String, Value> {
        &self.context
    }
}

fn compile_pattern(pipeline: &str, pattern: &str) -> Result<glob::Pattern, CompileError> {
    glob::Pattern::new(pattern).map_err(|source| CompileError::InvalidPattern {
        pipeline: pipeline.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_steps(
    pipeline: &str,
    steps: &[StepDef],
    registry: &Registry,
) -> Result<Vec<Step>, CompileError> {
    steps
        .iter()
        .map(|step| {
            let entry = registry
                .get(&step.kind)
                .ok_or_else(|| CompileError::UnknownProcessor {
                    pipeline: pipeline.to_string(),
                    kind: step.kind.clone(),
                })?;
            Ok(Step {
                kind: step.kind.clone(),
                run: entry.run,
                arg: step.arg.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
