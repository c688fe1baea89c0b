use anyhow::Context;
use bytes::Bytes;
use mail_builder::MessageBuilder;
use mail_builder::headers::address::Address;
use mail_builder::headers::content_type::ContentType;
use mail_builder::headers::raw::Raw;
use mail_builder::mime::{BodyPart, MimePart};
use uuid::Uuid;

use crate::mail::mail_address::MailAddress;
use crate::mail::mail_attachment::{AttachmentContent, AttachmentDisposition};
use crate::mail::mail_draft::MailDraft;
use crate::mail::mail_environment::MailEnvironment;
use crate::mail::mail_newline::MailNewline;

/// Renders a draft into RFC 5322 message bytes.
///
/// Blind carbon copy recipients are deliberately left out of the rendered
/// headers, they only ever appear on the envelope.
pub async fn render(draft: &MailDraft, environment: &MailEnvironment) -> anyhow::Result<Bytes> {
    let config = &draft.config;
    let mut builder = MessageBuilder::new();

    if let Some(from) = &draft.from {
        builder = builder.from(mailbox(from));
    }
    if let Some(reply_to) = &draft.reply_to {
        builder = builder.reply_to(mailbox(reply_to));
    }
    if !draft.to.is_empty() {
        builder = builder.to(Address::new_list(draft.to.iter().map(mailbox).collect()));
    }
    if !draft.cc.is_empty() {
        builder = builder.cc(Address::new_list(draft.cc.iter().map(mailbox).collect()));
    }
    if !draft.subject.is_empty() {
        builder = builder.subject(draft.subject.clone());
    }

    builder = builder.message_id(format!("{}@{}", Uuid::new_v4(), environment.hostname));
    if !config.useragent.is_empty() {
        builder = builder
            .header("User-Agent", Raw::new(config.useragent.clone()))
            .header("X-Mailer", Raw::new(config.useragent.clone()));
    }
    builder = builder.header("X-Priority", Raw::new(config.priority.clamp(1, 5).to_string()));

    for (field, value) in &draft.headers {
        builder = builder.header(field.clone(), Raw::new(value.clone()));
    }

    let charset = config.charset.to_lowercase();
    let (text, html) = draft.selected_bodies();
    if let Some(text) = text {
        builder.text_body = Some(MimePart::new(
            ContentType::new("text/plain").attribute("charset", charset.clone()),
            BodyPart::Text(normalize_newlines(text, config.newline).into()),
        ));
    }
    if let Some(html) = html {
        builder.html_body = Some(MimePart::new(
            ContentType::new("text/html").attribute("charset", charset.clone()),
            BodyPart::Text(normalize_newlines(html, config.newline).into()),
        ));
    }

    for attachment in &draft.attachments {
        let content = match &attachment.content {
            AttachmentContent::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read attachment '{}'", path.display()))?,
            AttachmentContent::Bytes(bytes) => bytes.to_vec(),
        };
        let mime = attachment
            .mime
            .clone()
            .unwrap_or_else(|| String::from("application/octet-stream"));
        let name = attachment.delivery_name();

        builder = match attachment.disposition {
            AttachmentDisposition::Inline => builder.inline(mime, name, content),
            AttachmentDisposition::Attachment => builder.attachment(mime, name, content),
        };
    }

    tracing::trace!(
        "rendering message with {} header(s) and {} attachment(s)",
        draft.headers.len(),
        draft.attachments.len()
    );

    let mut message = Vec::new();
    builder.write_to(&mut message)?;
    Ok(Bytes::from(message))
}

/// Rewrites every line break to the configured sequence.
pub fn normalize_newlines(text: &str, newline: MailNewline) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(char) = chars.next() {
        match char {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                normalized.push_str(newline.as_str());
            }
            '\n' => normalized.push_str(newline.as_str()),
            _ => normalized.push(char),
        }
    }
    normalized
}

fn mailbox(address: &MailAddress) -> Address<'static> {
    Address::new_address(address.name.clone(), address.email.clone())
}
