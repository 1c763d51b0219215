// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `publish` processor: hand a message to a dove server.
//!
//! The arg map arrives with its string values already expanded, so the
//! message text can reference any context field.

use super::{ProcFuture, Services};
use crate::error::ProcessError;
use hq_adapters::Message;
use hq_core::{Arg, Context};
use indexmap::IndexMap;

fn optional_str(map: &IndexMap<String, Arg>, key: &str) -> Option<String> {
    map.get(key).and_then(Arg::as_str).map(str::to_string)
}

pub(super) fn publish<'a>(
    services: &'a Services,
    _ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let map = arg.as_map().ok_or(ProcessError::BadArg {
            processor: "publish",
            expected: "a map with server and msg",
        })?;
        let server = optional_str(map, "server").ok_or(ProcessError::BadArg {
            processor: "publish",
            expected: "a server name",
        })?;
        let msg = optional_str(map, "msg").ok_or(ProcessError::BadArg {
            processor: "publish",
            expected: "a msg field",
        })?;
        let names = match map.get("names") {
            None | Some(Arg::Null) => None,
            Some(arg) => Some(arg.as_str_list().ok_or(ProcessError::BadArg {
                processor: "publish",
                expected: "names as a string or list of strings",
            })?),
        };

        let message = Message {
            title: optional_str(map, "title"),
            msg,
            group: optional_str(map, "group"),
            short: optional_str(map, "short"),
            channel: optional_str(map, "channel"),
        };
        services
            .doves
            .publish(&server, &message, names.as_deref())
            .await?;
        Ok(())
    })
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
