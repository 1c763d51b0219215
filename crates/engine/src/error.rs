// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for pipeline compilation and processor execution.

use hq_adapters::NotifyError;
use hq_core::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration-time errors raised while compiling pipelines.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("pipeline {pipeline}: unknown processor: {kind}")]
    UnknownProcessor { pipeline: String, kind: String },

    #[error("pipeline {pipeline}: invalid regex: {source}")]
    InvalidRegex {
        pipeline: String,
        #[source]
        source: regex::Error,
    },

    #[error("pipeline {pipeline}: invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pipeline: String,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("pipeline {pipeline}: exactly one of `re` or `glob` must be set")]
    Matcher { pipeline: String },
}

/// Per-event processor failures. The engine catches these at the step
/// boundary and turns them into an aborted chain (`_ok = false`).
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("{processor}: expected {expected}")]
    BadArg {
        processor: &'static str,
        expected: &'static str,
    },

    #[error("missing context field: {0}")]
    MissingField(String),

    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("error processor raised")]
    Raised,
}

impl ProcessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProcessError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ProcessError::MissingField(field.into())
    }
}
