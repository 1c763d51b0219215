// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake dove for tests: records every published message.

use super::{Dove, Message, NotifyError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct FakeDove {
    published: Arc<Mutex<Vec<Message>>>,
    fail: bool,
}

impl FakeDove {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake whose every publish fails with a transport-style error.
    pub fn failing() -> Self {
        Self {
            published: Arc::default(),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<Message> {
        self.published.lock().clone()
    }
}

#[async_trait]
impl Dove for FakeDove {
    async fn publish(&self, message: &Message) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Status {
                url: "fake://".to_string(),
                status: 500,
            });
        }
        self.published.lock().push(message.clone());
        Ok(())
    }
}
