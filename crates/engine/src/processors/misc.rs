// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small processors: timing, identifiers, field plumbing, and the
//! control processors that steer the chain.

use super::{ProcFuture, Services};
use crate::error::ProcessError;
use hq_core::{keys, random_short_id, Arg, Context, Value};
use std::fmt::Write as _;
use std::time::Duration;

fn seconds_arg(arg: &Arg, processor: &'static str) -> Result<Duration, ProcessError> {
    let bad = || ProcessError::BadArg {
        processor,
        expected: "a non-negative number of seconds",
    };
    let secs = match arg {
        Arg::Int(i) => *i as f64,
        Arg::Float(f) => *f,
        Arg::Str(s) => s.trim().parse::<f64>().map_err(|_| bad())?,
        _ => return Err(bad()),
    };
    Duration::try_from_secs_f64(secs).map_err(|_| bad())
}

pub(super) fn delay<'a>(
    _services: &'a Services,
    _ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let duration = seconds_arg(arg, "delay")?;
        tracing::debug!(seconds = duration.as_secs_f64(), "delay");
        tokio::time::sleep(duration).await;
        Ok(())
    })
}

pub(super) fn generate_uuid<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let bad = || ProcessError::BadArg {
            processor: "generate_uuid",
            expected: "a length",
        };
        let length = match arg {
            Arg::Int(i) if *i >= 0 => *i as usize,
            Arg::Str(s) => s.trim().parse::<usize>().map_err(|_| bad())?,
            _ => return Err(bad()),
        };
        ctx.set(keys::UUID, Value::Str(random_short_id(length)));
        Ok(())
    })
}

pub(super) fn get_datetime<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let format = arg.as_str().ok_or(ProcessError::BadArg {
            processor: "get_datetime",
            expected: "a strftime format string",
        })?;
        let timestamp = ctx
            .timestamp_ns()
            .ok_or(ProcessError::missing(keys::TIMESTAMP))?;
        let moment =
            chrono::DateTime::from_timestamp_nanos(timestamp).with_timezone(&chrono::Local);

        // DelayedFormat surfaces bad format strings through fmt::Error.
        let mut rendered = String::new();
        if write!(rendered, "{}", moment.format(format)).is_err() {
            return Err(ProcessError::BadArg {
                processor: "get_datetime",
                expected: "a valid strftime format string",
            });
        }
        ctx.set(keys::DATETIME, Value::Str(rendered));
        Ok(())
    })
}

pub(super) fn copy_field<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let fields: Option<(&str, &str)> = arg.as_seq().and_then(|items| match items {
            [src, dst] => Some((src.as_str()?, dst.as_str()?)),
            _ => None,
        });
        let Some((src, dst)) = fields else {
            tracing::error!(?arg, "copy_field needs a [source, destination] pair");
            ctx.set_ok(false);
            return Ok(());
        };
        let value = ctx
            .get(src)
            .cloned()
            .ok_or_else(|| ProcessError::missing(src))?;
        ctx.set(dst.to_string(), value);
        Ok(())
    })
}

pub(super) fn debug_info<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    _arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        tracing::info!(context = ?ctx, "debug_info");
        Ok(())
    })
}

pub(super) fn skip_directory<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    _arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        ctx.set_ok(!ctx.is_dir());
        Ok(())
    })
}

pub(super) fn failure<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    _arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        ctx.set_ok(false);
        Ok(())
    })
}

pub(super) fn error<'a>(
    _services: &'a Services,
    _ctx: &'a mut Context,
    _arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move { Err(ProcessError::Raised) })
}

#[cfg(test)]
#[path = "misc_tests.rs"]
mod tests;
