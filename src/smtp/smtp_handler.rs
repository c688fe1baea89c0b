use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::mail::mail_draft::MailDraft;
use crate::mail::mail_environment::MailEnvironment;
use crate::mail::mail_handler::MailHandler;
use crate::mail::mail_mime;
use crate::smtp::smtp_credentials::SmtpCredentials;
use crate::smtp::smtp_mode::SmtpMode;

/// Delivers drafts over SMTP.
///
/// The draft's blind carbon copy recipients are carried on the envelope
/// only, split into one delivery per [`MailDraft::delivery_groups`] group
/// when BCC batching is enabled.
pub struct SmtpHandler {
    host: String,
    mode: SmtpMode,
    credentials: Option<SmtpCredentials>,
    environment: MailEnvironment,
}

impl SmtpHandler {
    /// Builds a new SmtpHandler with the relay host, with an optional
    /// `host:port` format. Port defaults to 25.
    pub fn new<T: AsRef<str>>(host: T) -> Self {
        SmtpHandler {
            host: host.as_ref().to_string(),
            mode: SmtpMode::RelayEsmtp,
            credentials: None,
            environment: MailEnvironment::detect(),
        }
    }

    pub fn mode(mut self, mode: SmtpMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn credentials<T: AsRef<str>>(mut self, user: T, password: T) -> Self {
        self.credentials = Some(SmtpCredentials {
            user: user.as_ref().to_string(),
            password: password.as_ref().to_string(),
        });
        self
    }

    pub fn environment(mut self, environment: MailEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub(crate) fn build_transport(&self) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
        let (host, port) = parse_host(&self.host, 25)?;

        let mut builder = match &self.mode {
            SmtpMode::RelayEsmtp => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?.port(port),
            SmtpMode::RelayStartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(port),
            SmtpMode::Testing => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port),
        };

        if let Some(credentials) = &self.credentials {
            builder = builder.credentials(Credentials::new(credentials.user.clone(), credentials.password.clone()));
        }

        Ok(builder.build())
    }
}

#[async_trait]
impl MailHandler for SmtpHandler {
    async fn send(&self, draft: &mut MailDraft, clear_after: bool) -> anyhow::Result<()> {
        if draft.config.validate {
            draft.validate()?;
        }
        if draft.recipient_count() == 0 {
            anyhow::bail!("message has no recipients");
        }

        let message = mail_mime::render(draft, &self.environment).await?;
        let transport = self.build_transport()?;
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
            tracing::debug!("delivered to {} recipient(s) via {}", group.len(), self.host);
        }

        if clear_after {
            draft.reset(true);
        }
        Ok(())
    }
}

pub(crate) fn parse_host(host: &str, default_port: u16) -> anyhow::Result<(&str, u16)> {
    if let Some((host, port)) = host.split_once(":") {
        let port: u16 = port.parse()?;
        Ok((host, port))
    } else {
        Ok((host, default_port))
    }
}
