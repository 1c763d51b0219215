// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host lifecycle: startup, signal loop, drain.

use hq_adapters::{
    initial_scan, spawn_watcher, DoveRegistry, Dovecote, NotifyError, WatchError, WatchHandle,
};
use hq_config::{AgentsConfig, ConfigError, DoveConfig, SortingConfig};
use hq_engine::{CompileError, SortingAgent};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How long shutdown waits for in-flight handlers.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Buffered watcher events per agent.
const EVENT_QUEUE: usize = 1024;

/// Host errors. Everything here is fatal to startup.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] std::io::Error),
}

impl HostError {
    /// Whether this failure is a configuration mistake (as opposed to a
    /// runtime fault); the CLI maps these to a dedicated exit code.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HostError::Config(_) | HostError::Compile(_) | HostError::Notify(_)
        )
    }
}

/// The built but not yet running host.
pub struct Headquarter {
    doves: DoveRegistry,
    agents: Vec<SortingAgent>,
}

impl std::fmt::Debug for Headquarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Headquarter")
            .field("agents", &self.agents.iter().map(SortingAgent::name).collect::<Vec<_>>())
            .finish()
    }
}

impl Headquarter {
    /// Load the agents file and construct every declared agent. Doves
    /// are built first so sorting agents can publish through them.
    pub fn build(agents_path: &Path) -> Result<Self, HostError> {
        info!(path = %agents_path.display(), "loading agents file");
        let config = AgentsConfig::load(agents_path)?;

        let mut dovecotes = HashMap::new();
        for decl in config.agents.iter().filter(|d| d.kind == "dove") {
            let dove_config = DoveConfig::load(decl.config_path()?)?;
            let cote = Dovecote::from_config(&decl.name, &dove_config)?;
            info!(name = %decl.name, "dove agent ready");
            dovecotes.insert(decl.name.clone(), cote);
        }
        let doves = DoveRegistry::new(dovecotes);

        let mut agents = Vec::new();
        for decl in &config.agents {
            match decl.kind.as_str() {
                "sorting_agent" => {
                    let sorting_config = SortingConfig::load(decl.config_path()?)?;
                    let agent = SortingAgent::new(&decl.name, &sorting_config, doves.clone())?;
                    info!(name = %decl.name, pipelines = sorting_config.pipelines.len(), "sorting agent ready");
                    agents.push(agent);
                }
                "dove" => {}
                other => warn!(kind = %other, name = %decl.name, "unknown agent type, skipping"),
            }
        }

        Ok(Self { doves, agents })
    }

    pub fn agents(&self) -> &[SortingAgent] {
        &self.agents
    }

    pub fn doves(&self) -> &DoveRegistry {
        &self.doves
    }

    /// Start watchers and event pumps, run the initial scan, and block
    /// until SIGINT or SIGTERM. Watch handles are dropped on signal,
    /// which closes each pump's channel; agents then drain best-effort.
    pub async fn run(self) -> Result<(), HostError> {
        let mut watch_handles: Vec<WatchHandle> = Vec::new();
        let mut pumps: Vec<JoinHandle<()>> = Vec::new();

        for agent in &self.agents {
            let roots = agent.inputs();
            let (tx, mut rx) = mpsc::channel(EVENT_QUEUE);
            watch_handles.push(spawn_watcher(&roots, tx)?);

            // Scan before the live loop so the startup state is sorted
            // ahead of any new activity.
            let scan = initial_scan(&roots);
            info!(agent = %agent.name(), entries = scan.len(), "initial scan");
            for event in scan {
                agent.push(event);
            }

            let pump_agent = agent.clone();
            pumps.push(tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    pump_agent.push(event);
                }
            }));
        }

        info!("agents started");

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = sigint.recv() => info!("SIGINT received, shutting down"),
            _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
        }

        // Stop feeding new events, then let in-flight handlers finish.
        drop(watch_handles);
        for pump in pumps {
            let _ = pump.await;
        }
        for agent in &self.agents {
            agent.drain(DRAIN_TIMEOUT).await;
        }

        info!("goodbye");
        Ok(())
    }
}

/// Build and run the host from an agents file.
pub async fn run(agents_path: &Path) -> Result<(), HostError> {
    Headquarter::build(agents_path)?.run().await
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
