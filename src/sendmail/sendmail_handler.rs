use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::{AsyncSendmailTransport, AsyncTransport, Tokio1Executor};

use crate::mail::mail_draft::MailDraft;
use crate::mail::mail_environment::MailEnvironment;
use crate::mail::mail_handler::MailHandler;
use crate::mail::mail_mime;

/// Delivers drafts through the local sendmail binary.
pub struct SendmailHandler {
    command: Option<PathBuf>,
    environment: MailEnvironment,
}

impl SendmailHandler {
    pub fn new() -> Self {
        SendmailHandler {
            command: None,
            environment: MailEnvironment::detect(),
        }
    }

    /// Overrides the sendmail binary, e.g. `/usr/sbin/sendmail`.
    pub fn command<T: AsRef<Path>>(mut self, command: T) -> Self {
        self.command = Some(command.as_ref().to_path_buf());
        self
    }

    pub fn environment(mut self, environment: MailEnvironment) -> Self {
        self.environment = environment;
        self
    }

    fn build_transport(&self) -> AsyncSendmailTransport<Tokio1Executor> {
        match &self.command {
            Some(command) => AsyncSendmailTransport::new_with_command(command.clone()),
            None => AsyncSendmailTransport::new(),
        }
    }
}

impl Default for SendmailHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailHandler for SendmailHandler {
    async fn send(&self, draft: &mut MailDraft, clear_after: bool) -> anyhow::Result<()> {
        if draft.config.validate {
            draft.validate()?;
        }
        if draft.recipient_count() == 0 {
            anyhow::bail!("message has no recipients");
        }

        let message = mail_mime::render(draft, &self.environment).await?;
        let transport = self.build_transport();
        let sender = match &draft.from {
            Some(from) => Some(from.email.parse::<lettre::Address>()?),
            None => None,
        };

        for group in draft.delivery_groups() {
            let recipients = group
                .iter()
                .map(|address| address.email.parse::<lettre::Address>())
                .collect::<Result<Vec<_>, _>>()?;
            let envelope = Envelope::new(sender.clone(), recipients)?;

            transport.send_raw(&envelope, &message).await?;
            tracing::debug!("handed {} recipient(s) to sendmail", group.len());
        }

        if clear_after {
            draft.reset(true);
        }
        Ok(())
    }
}
