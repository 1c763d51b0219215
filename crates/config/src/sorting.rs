// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sorting configuration: the ordered pipeline list.

use crate::ConfigError;
use hq_core::{Arg, Value};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One processor step: `{type: <processor>, arg: <any>}`.
///
/// `arg` defaults to null when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct StepDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub arg: Arg,
}

/// One declared pipeline, immutable after load.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineDef {
    /// Unique display identifier.
    pub name: String,
    /// Watched root; events outside it never reach this pipeline.
    pub input: PathBuf,
    /// Regular expression over the relative path (exclusive with `glob`).
    #[serde(default)]
    pub re: Option<String>,
    /// Shell-style pattern over the relative path (exclusive with `re`).
    #[serde(default)]
    pub glob: Option<String>,
    /// Shell patterns matched against every single component of the
    /// relative path; any hit skips the pipeline.
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Constants merged into the event context on match.
    #[serde(default)]
    pub context: IndexMap<String, Value>,
    /// The success chain.
    #[serde(default)]
    pub process: Vec<StepDef>,
    /// Cleanup chain, run when the success chain aborts.
    #[serde(default)]
    pub failure: Vec<StepDef>,
}

/// The `pipelines` document of a sorting agent.
#[derive(Debug, Clone, Deserialize)]
pub struct SortingConfig {
    pub pipelines: Vec<PipelineDef>,
}

impl SortingConfig {
    /// Load and validate a sorting config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    /// Parse and validate a sorting config document.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for pipeline in &self.pipelines {
            if matches!(
                (&pipeline.re, &pipeline.glob),
                (Some(_), Some(_)) | (None, None)
            ) {
                return Err(ConfigError::Matcher(pipeline.name.clone()));
            }
            if !seen.insert(pipeline.name.as_str()) {
                return Err(ConfigError::DuplicateName(pipeline.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sorting_tests.rs"]
mod tests;
