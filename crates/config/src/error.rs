// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration errors, all fatal at load.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("pipeline {0}: exactly one of `re` or `glob` must be set")]
    Matcher(String),

    #[error("duplicate pipeline name: {0}")]
    DuplicateName(String),

    #[error("agent {0}: missing `config` path")]
    MissingAgentConfig(String),
}
