// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `execute` processor: spawn an argv vector, no shell involved.

use super::{ProcFuture, Services};
use crate::error::ProcessError;
use hq_adapters::run_argv;
use hq_core::{Arg, Context};

pub(super) fn execute<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let items = arg.as_seq().ok_or(ProcessError::BadArg {
            processor: "execute",
            expected: "an argv list",
        })?;
        let argv: Vec<String> = items
            .iter()
            .map(|item| {
                item.render_scalar().ok_or(ProcessError::BadArg {
                    processor: "execute",
                    expected: "scalar argv elements",
                })
            })
            .collect::<Result<_, _>>()?;

        if argv.is_empty() {
            tracing::error!("execute got an empty argv");
            ctx.set_ok(false);
            return Ok(());
        }

        let outcome = run_argv(&argv)
            .await
            .map_err(|e| ProcessError::io(&argv[0], e))?;
        tracing::info!(
            command = %argv[0],
            code = ?outcome.code,
            stdout = %outcome.first_line,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "executed"
        );
        ctx.set_ok(outcome.success);
        Ok(())
    })
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
