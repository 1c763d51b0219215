// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dove configuration: the notification channel set of one dove agent.

use crate::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Per-type channel settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoveArg {
    /// API key (required by the HTTP channel types).
    #[serde(default)]
    pub key: Option<String>,
    /// Default message group (bark).
    #[serde(default)]
    pub group: Option<String>,
    /// Default delivery channel (serverchan).
    #[serde(default)]
    pub channel: Option<String>,
}

/// One declared channel. An omitted `name` gets a random identifier at
/// construction time.
#[derive(Debug, Clone, Deserialize)]
pub struct DoveDecl {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub arg: DoveArg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoveConfig {
    pub doves: Vec<DoveDecl>,
}

impl DoveConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

#[cfg(test)]
#[path = "dove_tests.rs"]
mod tests;
