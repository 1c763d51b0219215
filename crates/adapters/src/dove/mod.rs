// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dove notification channels.
//!
//! A dove is one outbound channel for human-readable messages. Channels
//! are grouped per dove agent into a [`Dovecote`]; the process-wide
//! [`DoveRegistry`] resolves a server name to its dovecote for the
//! `publish` processor.

mod bark;
mod desktop;
mod serverchan;

pub use bark::Bark;
pub use desktop::Desktop;
pub use serverchan::ServerChan;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDove;

use async_trait::async_trait;
use hq_config::{DoveConfig, DoveDecl};
use hq_core::random_short_id;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors from notification channels and their configuration.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("unknown dove type: {0}")]
    UnknownKind(String),

    #[error("dove {0}: missing required api key")]
    MissingKey(String),

    #[error("unknown server: {0}")]
    UnknownServer(String),

    #[error("server {server} has no channel named {channel}")]
    UnknownChannel { server: String, channel: String },

    #[error("post to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("post to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// One message, as handed over by the `publish` processor. Optional
/// fields are dropped from the wire body when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub title: Option<String>,
    pub msg: String,
    pub group: Option<String>,
    pub short: Option<String>,
    pub channel: Option<String>,
}

/// One notification channel.
#[async_trait]
pub trait Dove: Send + Sync {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError>;
}

/// Build a channel from its declaration. The channel type is matched
/// case-insensitively; unnamed declarations get a random name.
pub fn build_dove(decl: &DoveDecl) -> Result<(String, Box<dyn Dove>), NotifyError> {
    let name = decl
        .name
        .clone()
        .unwrap_or_else(|| random_short_id(22));
    let require_key = || {
        decl.arg
            .key
            .clone()
            .ok_or_else(|| NotifyError::MissingKey(name.clone()))
    };
    let dove: Box<dyn Dove> = match decl.kind.to_lowercase().as_str() {
        "bark" => Box::new(Bark::new(require_key()?, decl.arg.group.clone())),
        "serverchan" => Box::new(ServerChan::new(require_key()?, decl.arg.channel.clone())),
        "desktop" => Box::new(Desktop::new(name.clone())),
        other => return Err(NotifyError::UnknownKind(other.to_string())),
    };
    Ok((name, dove))
}

/// The named channel set of one dove agent.
#[derive(Default)]
pub struct Dovecote {
    name: String,
    channels: IndexMap<String, Box<dyn Dove>>,
}

impl Dovecote {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: IndexMap::new(),
        }
    }

    /// Build the channel set declared in a dove config.
    pub fn from_config(name: impl Into<String>, config: &DoveConfig) -> Result<Self, NotifyError> {
        let mut cote = Self::new(name);
        for decl in &config.doves {
            let (channel_name, dove) = build_dove(decl)?;
            tracing::debug!(server = %cote.name, channel = %channel_name, kind = %decl.kind, "dove channel ready");
            cote.insert(channel_name, dove);
        }
        Ok(cote)
    }

    pub fn insert(&mut self, name: impl Into<String>, dove: Box<dyn Dove>) {
        self.channels.insert(name.into(), dove);
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// Publish to the named channels, or to every channel when `names`
    /// is absent. Per-channel failures are logged; the first one is
    /// returned after all channels were attempted.
    pub async fn publish(
        &self,
        message: &Message,
        names: Option<&[String]>,
    ) -> Result<(), NotifyError> {
        let mut first_err = None;
        let targets: Vec<&str> = match names {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => self.channel_names().collect(),
        };
        for name in targets {
            let result = match self.channels.get(name) {
                Some(channel) => channel.publish(message).await,
                None => Err(NotifyError::UnknownChannel {
                    server: self.name.clone(),
                    channel: name.to_string(),
                }),
            };
            if let Err(e) = result {
                tracing::error!(server = %self.name, channel = %name, error = %e, "publish failed");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Process-wide map from server name to dovecote, frozen at startup.
#[derive(Clone, Default)]
pub struct DoveRegistry {
    servers: Arc<HashMap<String, Dovecote>>,
}

impl DoveRegistry {
    pub fn new(servers: HashMap<String, Dovecote>) -> Self {
        Self {
            servers: Arc::new(servers),
        }
    }

    pub async fn publish(
        &self,
        server: &str,
        message: &Message,
        names: Option<&[String]>,
    ) -> Result<(), NotifyError> {
        let cote = self
            .servers
            .get(server)
            .ok_or_else(|| NotifyError::UnknownServer(server.to_string()))?;
        cote.publish(message, names).await
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
