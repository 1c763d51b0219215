// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bark channel (<https://github.com/Finb/Bark>): push notifications to
//! iOS devices through api.day.app.

use super::{Dove, Message, NotifyError};
use async_trait::async_trait;

pub struct Bark {
    url: String,
    group: Option<String>,
    client: reqwest::Client,
}

impl Bark {
    pub fn new(key: impl AsRef<str>, group: Option<String>) -> Self {
        Self {
            url: format!("https://api.day.app/{}", key.as_ref()),
            group,
            client: reqwest::Client::new(),
        }
    }

    /// Form body: `body` is the message text; `title` only when present;
    /// `group` falls back to the channel's configured default.
    fn form(&self, message: &Message) -> Vec<(&'static str, String)> {
        let mut form = vec![("body", message.msg.clone())];
        if let Some(title) = &message.title {
            form.push(("title", title.clone()));
        }
        if let Some(group) = message.group.as_ref().or(self.group.as_ref()) {
            form.push(("group", group.clone()));
        }
        form
    }
}

#[async_trait]
impl Dove for Bark {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError> {
        let form = self.form(message);
        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await
            .map_err(|source| NotifyError::Transport {
                url: self.url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %self.url, status = status.as_u16(), "bark rejected publish");
            return Err(NotifyError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bark_tests.rs"]
mod tests;
