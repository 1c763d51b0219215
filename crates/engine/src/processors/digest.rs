// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming file digests.

use super::{ProcFuture, Services};
use crate::error::ProcessError;
use hq_core::{keys, Arg, Context, Value};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read size per chunk; large files stream without ballooning memory
/// while the hash loop still yields between chunks.
const CHUNK_SIZE: usize = 16 * 1024 * 1024;

async fn hash_file<D: Digest>(path: &Path) -> Result<String, ProcessError> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| ProcessError::io(path, e))?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .await
            .map_err(|e| ProcessError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub(super) fn digest<'a>(
    _services: &'a Services,
    ctx: &'a mut Context,
    arg: &'a Arg,
) -> ProcFuture<'a> {
    Box::pin(async move {
        let algorithm = arg
            .as_str()
            .ok_or(ProcessError::BadArg {
                processor: "digest",
                expected: "an algorithm name (md5, sha1, sha256)",
            })?
            .to_lowercase();
        let source = ctx
            .source()
            .map(Path::to_path_buf)
            .ok_or(ProcessError::missing(keys::SOURCE))?;

        let hex_digest = match algorithm.as_str() {
            "md5" => hash_file::<Md5>(&source).await?,
            "sha1" => hash_file::<Sha1>(&source).await?,
            "sha256" => hash_file::<Sha256>(&source).await?,
            other => return Err(ProcessError::UnknownAlgorithm(other.to_string())),
        };

        tracing::debug!(source = %source.display(), %algorithm, digest = %hex_digest, "hashed");
        ctx.set(keys::DIGEST, Value::Str(hex_digest.clone()));
        ctx.set(algorithm, Value::Str(hex_digest));
        Ok(())
    })
}

#[cfg(test)]
#[path = "digest_tests.rs"]
mod tests;
