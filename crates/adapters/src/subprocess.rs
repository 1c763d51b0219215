// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers.

use std::time::{Duration, Instant};
use tokio::process::Command;

/// Result of one subprocess run.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    pub success: bool,
    pub code: Option<i32>,
    /// First line of stdout, for log correlation.
    pub first_line: String,
    pub elapsed: Duration,
}

/// Run an argv vector directly (no shell), waiting for completion and
/// capturing output. There is deliberately no timeout: a sorting step may
/// legitimately run a long transcode or archive job, and the only
/// cancellation source is process shutdown.
pub async fn run_argv(argv: &[String]) -> Result<ExecOutcome, std::io::Error> {
    let Some((program, args)) = argv.split_first() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty argv",
        ));
    };
    let started = Instant::now();
    let mut cmd = Command::new(program);
    cmd.args(args);
    let output = cmd.output().await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(ExecOutcome {
        success: output.status.success(),
        code: output.status.code(),
        first_line: stdout.lines().next().unwrap_or_default().to_string(),
        elapsed: started.elapsed(),
    })
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
