use crate::mail::mail_address::MailAddress;
use crate::mail::mail_attachment::MailAttachment;
use crate::mail::mail_config::MailConfig;
use crate::mail::mail_format::MailFormat;

/// The mutable message under composition.
///
/// Setters return `&mut Self` so a chain operates on one draft and the
/// draft can be reset and reused across a send loop:
///
/// ```
/// use rust_mail_services::mail::mail_draft::MailDraft;
///
/// let mut draft = MailDraft::new();
/// draft
///     .from("noreply@example.com", Some("Example"))
///     .to("user@example.com")
///     .subject("Welcome")
///     .message_text("Hello!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MailDraft {
    pub config: MailConfig,
    pub from: Option<MailAddress>,
    pub reply_to: Option<MailAddress>,
    pub to: Vec<MailAddress>,
    pub cc: Vec<MailAddress>,
    pub bcc: Vec<MailAddress>,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub headers: Vec<(String, String)>,
    pub attachments: Vec<MailAttachment>,
}

impl MailDraft {
    pub fn new() -> Self {
        Self::with_config(MailConfig::default())
    }

    pub fn with_config(config: MailConfig) -> Self {
        MailDraft {
            config,
            ..Default::default()
        }
    }

    /// Builds a draft from classic string option pairs, see
    /// [`MailConfig::from_map`].
    pub fn from_map<K, V, I>(options: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::with_config(MailConfig::from_map(options))
    }

    /// Adds a recipient.
    pub fn to<T: AsRef<str>>(&mut self, email: T) -> &mut Self {
        self.to.push(MailAddress::new(email));
        self
    }

    /// Adds a carbon copy recipient.
    pub fn cc<T: AsRef<str>>(&mut self, email: T) -> &mut Self {
        self.cc.push(MailAddress::new(email));
        self
    }

    /// Adds a blind carbon copy recipient.
    pub fn bcc<T: AsRef<str>>(&mut self, email: T) -> &mut Self {
        self.bcc.push(MailAddress::new(email));
        self
    }

    /// Sets who the email is coming from.
    pub fn from<T: AsRef<str>>(&mut self, email: T, name: Option<T>) -> &mut Self {
        self.from = Some(address(email, name));
        self
    }

    /// Sets the reply to address.
    pub fn reply_to<T: AsRef<str>>(&mut self, email: T, name: Option<T>) -> &mut Self {
        self.reply_to = Some(address(email, name));
        self
    }

    /// Sets the subject line.
    pub fn subject<T: AsRef<str>>(&mut self, subject: T) -> &mut Self {
        self.subject = subject.as_ref().to_string();
        self
    }

    /// Sets the plain text portion of the message.
    pub fn message_text<T: AsRef<str>>(&mut self, message: T) -> &mut Self {
        self.text_body = Some(message.as_ref().to_string());
        self
    }

    /// Sets the HTML portion of the message.
    pub fn message_html<T: AsRef<str>>(&mut self, message: T) -> &mut Self {
        self.html_body = Some(message.as_ref().to_string());
        self
    }

    /// Sets the body variant to prefer when multipart delivery is disabled.
    pub fn format(&mut self, format: MailFormat) -> &mut Self {
        self.config.format = format;
        self
    }

    /// Sets a header field. Field names are case-sensitive and the last
    /// write per field wins.
    pub fn set_header<T: AsRef<str>>(&mut self, field: T, value: T) -> &mut Self {
        let field = field.as_ref();
        let value = value.as_ref().to_string();
        match self.headers.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((field.to_string(), value)),
        }
        self
    }

    /// Adds an attachment to the message being built.
    pub fn attach(&mut self, attachment: MailAttachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    /// Adds a plain file attachment.
    pub fn attach_file<T: AsRef<std::path::Path>>(&mut self, path: T) -> &mut Self {
        self.attach(MailAttachment::from_file(path))
    }

    /// Resets the draft to blank, ready for a new email, keeping the
    /// configuration. Useful when sending emails in a loop. Attachments
    /// are only dropped when `clear_attachments` is set.
    pub fn reset(&mut self, clear_attachments: bool) -> &mut Self {
        self.from = None;
        self.reply_to = None;
        self.to.clear();
        self.cc.clear();
        self.bcc.clear();
        self.subject.clear();
        self.text_body = None;
        self.html_body = None;
        self.headers.clear();
        if clear_attachments {
            self.attachments.clear();
        }
        self
    }

    /// Checks the syntax of every stored address. Handlers run this before
    /// delivery when `config.validate` is set.
    pub fn validate(&self) -> anyhow::Result<()> {
        let addresses = self
            .from
            .iter()
            .chain(self.reply_to.iter())
            .chain(self.to.iter())
            .chain(self.cc.iter())
            .chain(self.bcc.iter());

        for address in addresses {
            if !address.is_valid() {
                anyhow::bail!("invalid email address '{}'", address.email);
            }
        }
        Ok(())
    }

    /// Splits the recipients into envelope groups, one delivery each.
    ///
    /// Without BCC batching this is a single group of all recipients. With
    /// batching enabled and more blind recipients than the batch size, the
    /// first group carries to/cc plus the first batch and every further
    /// group carries one further batch.
    pub fn delivery_groups(&self) -> Vec<Vec<MailAddress>> {
        let mut base: Vec<MailAddress> = self.to.iter().chain(self.cc.iter()).cloned().collect();
        let batch_size = self.config.bcc_batch_size;

        if self.config.bcc_batch_mode && batch_size > 0 && self.bcc.len() > batch_size {
            let mut chunks = self.bcc.chunks(batch_size);
            if let Some(first) = chunks.next() {
                base.extend(first.iter().cloned());
            }
            let mut groups = vec![base];
            for chunk in chunks {
                groups.push(chunk.to_vec());
            }
            groups
        } else {
            base.extend(self.bcc.iter().cloned());
            vec![base]
        }
    }

    /// Number of recipients across all delivery groups.
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }

    /// Picks the body variants to render: both for multipart/alternative
    /// delivery, otherwise the configured format with a fallback to
    /// whichever variant exists.
    pub(crate) fn selected_bodies(&self) -> (Option<&str>, Option<&str>) {
        let text = self.text_body.as_deref();
        let html = self.html_body.as_deref();

        if self.config.send_multipart {
            return (text, html);
        }
        match self.config.format {
            MailFormat::Html if html.is_some() => (None, html),
            MailFormat::Html => (text, None),
            MailFormat::Text if text.is_some() => (text, None),
            MailFormat::Text => (None, html),
        }
    }
}

fn address<T: AsRef<str>>(email: T, name: Option<T>) -> MailAddress {
    match name {
        Some(name) if !name.as_ref().is_empty() => MailAddress::with_name(email, name),
        _ => MailAddress::new(email),
    }
}
