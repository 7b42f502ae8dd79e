//! Outbox mailer that keeps sent messages in memory.

use crate::booking::ports::{EmailMessage, Mailer, MailerError, MailerResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mailer that stores every accepted message in an outbox.
///
/// Messages without an `@` in the recipient are rejected.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailer {
    outbox: Arc<Mutex<Vec<EmailMessage>>>,
}

impl InMemoryMailer {
    /// Creates a mailer with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delivered messages in send order.
    #[must_use]
    pub fn outbox(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, message: &EmailMessage) -> MailerResult<()> {
        if !message.to.contains('@') {
            return Err(MailerError::RecipientRejected(message.to.clone()));
        }
        self.outbox
            .lock()
            .map_err(|err| MailerError::transport(std::io::Error::other(err.to_string())))?
            .push(message.clone());
        Ok(())
    }
}
