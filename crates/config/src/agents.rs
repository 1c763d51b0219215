// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The agents file: which agents the host starts, and from what config.

use crate::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One agent declaration. `kind` is matched by the host factory;
/// unrecognized kinds are skipped with a warning.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentDecl {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub config: Option<PathBuf>,
}

impl AgentDecl {
    /// The declaration's config path, required for the built-in kinds.
    pub fn config_path(&self) -> Result<&Path, ConfigError> {
        self.config
            .as_deref()
            .ok_or_else(|| ConfigError::MissingAgentConfig(self.name.clone()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentsConfig {
    pub agents: Vec<AgentDecl>,
}

impl AgentsConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
