// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local desktop channel using notify-rust. Useful when the agent runs
//! on a workstation rather than a headless NAS.

use super::{Dove, Message, NotifyError};
use async_trait::async_trait;

pub struct Desktop {
    name: String,
}

impl Desktop {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Dove for Desktop {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError> {
        let summary = message.title.clone().unwrap_or_else(|| self.name.clone());
        let body = message.msg.clone();
        // notify_rust::Notification::show() is synchronous; run it on
        // tokio's blocking pool so the event loop keeps moving.
        tokio::task::spawn_blocking(move || {
            match notify_rust::Notification::new()
                .summary(&summary)
                .body(&body)
                .show()
            {
                Ok(_) => tracing::debug!(%summary, "desktop notification sent"),
                Err(e) => tracing::warn!(%summary, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}
