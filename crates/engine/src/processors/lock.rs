// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock processors, delegating to the engine's [`LockManager`].

use super::{ProcFuture, Services};
use crate::error::ProcessError;
use hq_core::{Arg, Context};

pub(super) fn lock_acquire<'a>(
    services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let names = arg.as_str_list().ok_or(ProcessError::BadArg {
            processor: "lock_acquire",
            expected: "a lock name or list of names",
        })?;
        services.locks.acquire(ctx, &names).await;
        Ok(())
    })
}

pub(super) fn lock_release<'a>(
    services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let names = if arg.is_null() {
            None
        } else {
            Some(arg.as_str_list().ok_or(ProcessError::BadArg {
                processor: "lock_release",
                expected: "a lock name, list of names, or null",
            })?)
        };
        services.locks.release(ctx, names.as_deref());
        Ok(())
    })
}
