// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ServerChan channel (<https://sct.ftqq.com>): WeChat push via
//! sctapi.ftqq.com.

use super::{Dove, Message, NotifyError};
use async_trait::async_trait;

pub struct ServerChan {
    url: String,
    channel: Option<String>,
    client: reqwest::Client,
}

impl ServerChan {
    pub fn new(key: impl AsRef<str>, channel: Option<String>) -> Self {
        Self {
            url: format!("https://sctapi.ftqq.com/{}.send", key.as_ref()),
            channel,
            client: reqwest::Client::new(),
        }
    }

    /// Form body: `desp` is the message text; `title`/`short` only when
    /// present; `channel` comes from the channel's configured default.
    fn form(&self, message: &Message) -> Vec<(&'static str, String)> {
        let mut form = vec![("desp", message.msg.clone())];
        if let Some(title) = &message.title {
            form.push(("title", title.clone()));
        }
        if let Some(short) = &message.short {
            form.push(("short", short.clone()));
        }
        if let Some(channel) = &self.channel {
            form.push(("channel", channel.clone()));
        }
        form
    }
}

#[async_trait]
impl Dove for ServerChan {
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
            tracing::error!(url = %self.url, status = status.as_u16(), "serverchan rejected publish");
            return Err(NotifyError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "serverchan_tests.rs"]
mod tests;
