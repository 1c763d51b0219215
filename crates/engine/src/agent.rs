// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The sorting agent: event ingestion, debouncing, and chain execution.

use crate::locks::LockManager;
use crate::pipeline::{Pipeline, Step};
use crate::processors::{Registry, Services};
use crate::CompileError;
use hq_adapters::DoveRegistry;
use hq_core::{keys, Context, FsEvent, Value};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// How long a handler sleeps before running, coalescing event bursts
/// from the watch adapter.
const DEBOUNCE: Duration = Duration::from_secs(1);

/// Poll interval while draining at shutdown.
const DRAIN_POLL: Duration = Duration::from_millis(100);

/// One sorting agent. Cheap to clone; clones share the same engine.
#[derive(Clone)]
pub struct SortingAgent {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    pipelines: Vec<Pipeline>,
    services: Services,
    /// Debounce set: source paths with a handler in flight.
    in_flight: Mutex<HashSet<PathBuf>>,
    /// Log correlation only.
    counter: AtomicU64,
    debounce: Duration,
}

impl SortingAgent {
    /// Compile the configured pipelines and build the agent. Fails on
    /// any unknown processor or invalid matcher.
    pub fn new(
        name: impl Into<String>,
        config: &hq_config::SortingConfig,
        doves: DoveRegistry,
    ) -> Result<Self, CompileError> {
        let registry = Registry::standard();
        let pipelines = config
            .pipelines
            .iter()
            .map(|def| Pipeline::compile(def, &registry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            inner: Arc::new(Inner {
                name: name.into(),
                pipelines,
                services: Services {
                    locks: LockManager::new(),
                    doves,
                },
                in_flight: Mutex::new(HashSet::new()),
                counter: AtomicU64::new(0),
                debounce: DEBOUNCE,
            }),
        })
    }

    /// Replace the debounce interval. Tests shrink it to keep scenarios
    /// fast; production keeps the default.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.debounce = debounce;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The watched roots of all pipelines, deduplicated.
    pub fn inputs(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        for pipeline in &self.inner.pipelines {
            if !roots.contains(&pipeline.input) {
                roots.push(pipeline.input.clone());
            }
        }
        roots
    }

    /// Shared lock manager and dove registry.
    pub fn services(&self) -> &Services {
        &self.inner.services
    }

    /// Number of handlers currently in flight.
    pub fn in_flight_len(&self) -> usize {
        self.inner.in_flight.lock().len()
    }

    /// Ingest one filesystem event.
    ///
    /// Events for a source that already has a handler in flight collapse
    /// into it. Otherwise the context is stamped and a handler task
    /// starts; its entry leaves the debounce set when the task ends,
    /// panics included. Must be called from within a tokio runtime.
    pub fn push(&self, event: FsEvent) {
        let source = crate::processors::resolve_path(&event.path);
        {
            let mut in_flight = self.inner.in_flight.lock();
            if !in_flight.insert(source.clone()) {
                tracing::debug!(source = %source.display(), "event collapsed into in-flight handler");
                return;
            }
        }

        let mut ctx = Context::new();
        ctx.set(keys::SOURCE, Value::Path(source.clone()));
        ctx.set(keys::ORIGINAL, Value::Path(source.clone()));
        ctx.set(keys::EVENT, Value::Str(event.kind.as_str().to_string()));
        ctx.set(keys::IS_DIR, Value::Bool(event.is_dir));
        ctx.set(keys::TIMESTAMP, Value::Int(epoch_ns()));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let _guard = InFlightGuard {
                inner: Arc::clone(&inner),
                source,
            };
            inner.handle(ctx).await;
        });
    }

    /// Wait for in-flight handlers to finish, up to `timeout`. Returns
    /// whether the agent drained completely.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = self.in_flight_len();
            if remaining == 0 {
                return true;
            }
            if Instant::now() >= deadline {
                tracing::warn!(agent = %self.inner.name, remaining, "drain timed out");
                return false;
            }
            tokio::time::sleep(DRAIN_POLL).await;
        }
    }
}

/// Removes the debounce entry when the handler ends, however it ends.
struct InFlightGuard {
    inner: Arc<Inner>,
    source: PathBuf,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.inner.in_flight.lock().remove(&self.source);
    }
}

impl Inner {
    async fn handle(&self, ctx: Context) {
        tokio::time::sleep(self.debounce).await;
        let cnt = self.counter.fetch_add(1, Ordering::Relaxed);
        let source = match ctx.source() {
            Some(source) => source.to_path_buf(),
            None => return,
        };

        for pipeline in &self.pipelines {
            let Some(relative) = pipeline.admit(&source) else {
                continue;
            };
            let mut t = ctx.clone();
            t.set(keys::RELATIVE_PATH, Value::Path(relative));
            t.merge(pipeline.context());
            t.set(keys::NAME, Value::Str(pipeline.name.clone()));
            t.set_ok(true);
            tracing::debug!(cnt, pipeline = %pipeline.name, source = %source.display(), "pipeline matched");

            self.run_chain(&mut t, &pipeline.process, cnt, &pipeline.name).await;
            if t.ok() {
                tracing::info!(cnt, pipeline = %pipeline.name, source = %source.display(), "event handled");
                return;
            }
            self.run_cleanup(&mut t, &pipeline.failure, cnt, &pipeline.name)
                .await;
        }

        tracing::warn!(cnt, source = %source.display(), "no pipeline handled event");
    }

    /// The success chain: sequential, stops at the first failed step.
    async fn run_chain(&self, t: &mut Context, steps: &[Step], cnt: u64, pipeline: &str) {
        for step in steps {
            let arg = match step.arg.expand(t) {
                Ok(arg) => arg,
                Err(e) => {
                    tracing::error!(cnt, pipeline, step = %step.kind, error = %e, "arg expansion failed");
                    t.set_ok(false);
                    break;
                }
            };
            tracing::debug!(cnt, pipeline, step = %step.kind, "running processor");
            if let Err(e) = (step.run)(&self.services, t, &arg).await {
                tracing::error!(cnt, pipeline, step = %step.kind, error = %e, "processor failed");
                t.set_ok(false);
            }
            if !t.ok() {
                break;
            }
        }
    }

    /// The failure chain: every step is attempted, errors are swallowed
    /// so cleanup always completes.
    async fn run_cleanup(&self, t: &mut Context, steps: &[Step], cnt: u64, pipeline: &str) {
        for step in steps {
            let arg = match step.arg.expand(t) {
                Ok(arg) => arg,
                Err(e) => {
                    tracing::warn!(cnt, pipeline, step = %step.kind, error = %e, "cleanup arg expansion failed, skipping step");
                    continue;
                }
            };
            if let Err(e) = (step.run)(&self.services, t, &arg).await {
                tracing::warn!(cnt, pipeline, step = %step.kind, error = %e, "cleanup step failed, continuing");
            }
        }
    }
}

fn epoch_ns() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as i64
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
