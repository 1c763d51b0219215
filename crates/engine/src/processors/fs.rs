// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem processors: ownership, path creation, move, name parsing.

use super::{ProcFuture, Services};
use crate::error::ProcessError;
use hq_core::{keys, Arg, Context, Value};
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Component, Path, PathBuf};

/// Mode for directories created by `mkpath`: NAS shares are mixed-user
/// territory, every directory level must stay writable for siblings.
const MKPATH_MODE: u32 = 0o777;

/// Absolutize against the current directory and resolve `.`/`..`
/// lexically. Unlike `canonicalize`, works for paths that don't exist
/// yet (move destinations).
pub(crate) fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    };
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Set `path`'s uid/gid to those of its parent directory.
fn chown_like_parent(path: &Path) -> Result<(), ProcessError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let meta = parent
        .metadata()
        .map_err(|e| ProcessError::io(parent, e))?;
    std::os::unix::fs::chown(path, Some(meta.uid()), Some(meta.gid()))
        .map_err(|e| ProcessError::io(path, e))
}

/// Create `path` and any missing ancestors. Each new directory inherits
/// its parent's owner and gets [`MKPATH_MODE`]. Returns `false` when the
/// filesystem root is reached without finding an existing ancestor.
fn make_path(path: &Path) -> Result<bool, ProcessError> {
    if path.exists() {
        return Ok(true);
    }
    let Some(parent) = path.parent() else {
        return Ok(false);
    };
    if !parent.exists() && !make_path(parent)? {
        return Ok(false);
    }
    std::fs::create_dir(path).map_err(|e| ProcessError::io(path, e))?;
    chown_like_parent(path)?;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(MKPATH_MODE))
        .map_err(|e| ProcessError::io(path, e))?;
    Ok(true)
}

/// All dotted suffixes of a file name, concatenated: `a.tar.gz` →
/// `.tar.gz`. Leading dots (hidden files) don't count; neither does a
/// trailing dot.
fn dotted_suffixes(name: &str) -> String {
    if name.ends_with('.') {
        return String::new();
    }
    let trimmed = name.trim_start_matches('.');
    match trimmed.find('.') {
        Some(idx) => trimmed[idx..].to_string(),
        None => String::new(),
    }
}

fn require_source(ctx: &Context) -> Result<PathBuf, ProcessError> {
    ctx.source()
        .map(Path::to_path_buf)
        .ok_or(ProcessError::missing(keys::SOURCE))
}

fn set_filename_fields(ctx: &mut Context, source: &Path) {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = dotted_suffixes(&name);
    let stem = name
        .strip_suffix(suffix.as_str())
        .unwrap_or(&name)
        .to_string();

    ctx.set(keys::FILENAME, Value::Str(name));
    ctx.set(
        keys::PARENT,
        Value::Path(source.parent().unwrap_or(source).to_path_buf()),
    );
    if let Some(relative) = ctx.relative_path() {
        let relative_parent = relative.parent().unwrap_or(Path::new("")).to_path_buf();
        ctx.set(keys::RELATIVE_PARENT, Value::Path(relative_parent));
    }
    ctx.set(keys::SUFFIX, Value::Str(suffix));
    ctx.set(keys::STEM, Value::Str(stem));
}

pub(super) fn chown_to_parent<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    _arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let source = require_source(ctx)?;
        chown_like_parent(&source)
    })
}

pub(super) fn mkpath<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let template = arg.as_str().ok_or(ProcessError::BadArg {
            processor: "mkpath",
            expected: "a path template string",
        })?;
        let target = resolve_path(Path::new(template));
        match make_path(&target) {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(path = %target.display(), "cannot make path, no existing ancestor");
                ctx.set_ok(false);
            }
            Err(e) => {
                tracing::error!(path = %target.display(), error = %e, "cannot make path");
                ctx.set_ok(false);
            }
        }
        Ok(())
    })
}

pub(super) fn move_source<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let template = arg.as_str().ok_or(ProcessError::BadArg {
            processor: "move",
            expected: "a destination template string",
        })?;
        let source = require_source(ctx)?;
        let destination = resolve_path(Path::new(template));
        ctx.set(keys::DESTINATION, Value::Path(destination.clone()));

        let parent = destination
            .parent()
            .ok_or(ProcessError::missing(keys::DESTINATION))?;
        match make_path(parent) {
            Ok(true) => {}
            Ok(false) | Err(_) => {
                tracing::error!(path = %parent.display(), "cannot make path for destination");
                ctx.set_ok(false);
                return Ok(());
            }
        }

        std::fs::rename(&source, &destination).map_err(|e| ProcessError::io(&source, e))?;
        tracing::info!(
            from = %source.display(),
            to = %destination.display(),
            "moved"
        );

        ctx.set_source(destination.clone());
        chown_like_parent(&destination)?;
        set_filename_fields(ctx, &destination);
        Ok(())
    })
}

pub(super) fn parse_filename<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    _arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let source = require_source(ctx)?;
        set_filename_fields(ctx, &source);
        Ok(())
    })
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
