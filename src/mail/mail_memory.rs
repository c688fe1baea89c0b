use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::mail::mail_draft::MailDraft;
use crate::mail::mail_environment::MailEnvironment;
use crate::mail::mail_handler::MailHandler;
use crate::mail::mail_mime;

/// One delivered envelope as recorded by [`MemoryHandler`].
#[derive(Debug, Clone)]
pub struct MailRecord {
    pub sender: Option<String>,
    pub recipients: Vec<String>,
    pub message: Bytes,
}

/// A handler that keeps sent mail in memory instead of delivering it.
///
/// Drop-in stand-in for the transport handlers in tests: it validates,
/// renders and batches exactly like them, then records one [`MailRecord`]
/// per envelope.
pub struct MemoryHandler {
    environment: MailEnvironment,
    outbox: Mutex<Vec<MailRecord>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        MemoryHandler {
            environment: MailEnvironment::detect(),
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn environment(mut self, environment: MailEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Everything recorded so far, in delivery order.
    pub fn sent(&self) -> Vec<MailRecord> {
        self.outbox.lock().expect("outbox lock poisoned").clone()
    }

    pub fn clear(&self) {
        self.outbox.lock().expect("outbox lock poisoned").clear();
    }
}

impl Default for MemoryHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailHandler for MemoryHandler {
    async fn send(&self, draft: &mut MailDraft, clear_after: bool) -> anyhow::Result<()> {
        if draft.config.validate {
            draft.validate()?;
        }
        if draft.recipient_count() == 0 {
            anyhow::bail!("message has no recipients");
        }

        let message = mail_mime::render(draft, &self.environment).await?;
        let sender = draft.from.as_ref().map(|from| from.email.clone());

        let mut outbox = self.outbox.lock().expect("outbox lock poisoned");
        for group in draft.delivery_groups() {
            tracing::debug!("recording delivery to {} recipient(s)", group.len());
            outbox.push(MailRecord {
                sender: sender.clone(),
                recipients: group.into_iter().map(|address| address.email).collect(),
                message: message.clone(),
            });
        }
        drop(outbox);

        if clear_after {
            draft.reset(true);
        }
        Ok(())
    }
}
