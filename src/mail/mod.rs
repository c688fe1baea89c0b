#[cfg(feature = "mail")]
pub mod mail_address;
#[cfg(feature = "mail")]
pub mod mail_format;
#[cfg(feature = "mail")]
pub mod mail_newline;
#[cfg(feature = "mail")]
pub mod mail_config;
#[cfg(feature = "mail")]
pub mod mail_environment;
#[cfg(feature = "mail")]
pub mod mail_attachment;
#[cfg(feature = "mail")]
pub mod mail_draft;
#[cfg(feature = "mail")]
pub mod mail_handler;
#[cfg(feature = "mail")]
pub mod mail_mime;
#[cfg(feature = "mail")]
pub mod mail_memory;

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::mail::mail_attachment::{AttachmentDisposition, MailAttachment};
    use crate::mail::mail_config::MailConfig;
    use crate::mail::mail_draft::MailDraft;
    use crate::mail::mail_environment::MailEnvironment;
    use crate::mail::mail_format::MailFormat;
    use crate::mail::mail_handler::MailHandler;
    use crate::mail::mail_memory::MemoryHandler;
    use crate::mail::mail_mime;
    use crate::mail::mail_newline::MailNewline;

    fn environment() -> MailEnvironment {
        MailEnvironment::detect().hostname("mail.test")
    }

    #[test]
    fn config_charset_is_uppercased() {
        let mut options = HashMap::new();
        options.insert("charset", "iso-8859-1");

        let config = MailConfig::from_map(options);
        assert_eq!(config.charset, "ISO-8859-1");
    }

    #[test]
    fn config_ignores_unknown_keys() {
        let config = MailConfig::from_map([("bogus", "value"), ("protocol", "smtp")]);
        assert_eq!(config, MailConfig::default());
    }

    #[test]
    fn config_parses_known_options() {
        let config = MailConfig::from_map([
            ("mailtype", "html"),
            ("priority", "9"),
            ("newline", "\r\n"),
            ("BCCBatchMode", "true"),
            ("BCCBatchSize", "50"),
            ("sendMultipart", "false"),
        ]);
        assert_eq!(config.format, MailFormat::Html);
        assert_eq!(config.priority, 5);
        assert_eq!(config.newline, MailNewline::CrLf);
        assert!(config.bcc_batch_mode);
        assert_eq!(config.bcc_batch_size, 50);
        assert!(!config.send_multipart);
    }

    #[test]
    fn config_keeps_defaults_on_invalid_values() {
        let config = MailConfig::from_map([("priority", "high"), ("newline", "\r")]);
        assert_eq!(config.priority, 3);
        assert_eq!(config.newline, MailNewline::Lf);
    }

    #[test]
    fn from_stores_bare_address_or_pair() {
        let mut draft = MailDraft::new();
        draft.from("a@example.com", None);
        let from = draft.from.clone().unwrap();
        assert_eq!(from.email, "a@example.com");
        assert_eq!(from.name, None);

        draft.from("a@example.com", Some("Alice"));
        let from = draft.from.clone().unwrap();
        assert_eq!(from.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn chained_setters_fill_one_draft() {
        let mut draft = MailDraft::new();
        draft
            .to("one@example.com")
            .to("two@example.com")
            .cc("three@example.com")
            .subject("Greetings")
            .message_text("Hello!");

        assert_eq!(draft.to.len(), 2);
        assert_eq!(draft.cc.len(), 1);
        assert_eq!(draft.subject, "Greetings");
        assert_eq!(draft.text_body.as_deref(), Some("Hello!"));
    }

    #[test]
    fn set_header_last_write_wins() {
        let mut draft = MailDraft::new();
        draft.set_header("X-Test", "v").set_header("X-Test", "v2");

        assert_eq!(draft.headers.len(), 1);
        assert_eq!(draft.headers[0], (String::from("X-Test"), String::from("v2")));
    }

    #[test]
    fn reset_clears_message_fields_and_keeps_config() {
        let mut config = MailConfig::default();
        config.priority = 1;
        let mut draft = MailDraft::with_config(config);
        draft
            .from("a@example.com", Some("Alice"))
            .to("b@example.com")
            .bcc("c@example.com")
            .subject("Greetings")
            .message_text("text")
            .message_html("<p>html</p>")
            .set_header("X-Test", "v")
            .attach(MailAttachment::from_bytes("note.txt", "contents".as_bytes().to_vec()));

        draft.reset(false);
        assert!(draft.from.is_none());
        assert!(draft.reply_to.is_none());
        assert!(draft.to.is_empty());
        assert!(draft.bcc.is_empty());
        assert!(draft.subject.is_empty());
        assert!(draft.text_body.is_none());
        assert!(draft.html_body.is_none());
        assert!(draft.headers.is_empty());
        assert_eq!(draft.attachments.len(), 1);
        assert_eq!(draft.config.priority, 1);

        draft.reset(true);
        assert!(draft.attachments.is_empty());
    }

    #[test]
    fn validate_rejects_malformed_addresses() {
        let mut draft = MailDraft::new();
        draft.to("valid@example.com");
        assert!(draft.validate().is_ok());

        draft.cc("not an address");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn delivery_groups_without_batching() {
        let mut draft = MailDraft::new();
        draft.to("a@example.com").cc("b@example.com").bcc("c@example.com");

        let groups = draft.delivery_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn delivery_groups_chunk_blind_recipients() {
        let mut draft = MailDraft::new();
        draft.config.bcc_batch_mode = true;
        draft.config.bcc_batch_size = 2;
        draft.to("to@example.com").cc("cc@example.com");
        for n in 0..5 {
            draft.bcc(format!("bcc{n}@example.com"));
        }

        let groups = draft.delivery_groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[2].len(), 1);
    }

    #[test]
    fn normalize_newlines_rewrites_all_sequences() {
        let text = "one\r\ntwo\nthree\rfour";
        assert_eq!(
            mail_mime::normalize_newlines(text, MailNewline::CrLf),
            "one\r\ntwo\r\nthree\r\nfour"
        );
        assert_eq!(
            mail_mime::normalize_newlines(text, MailNewline::Lf),
            "one\ntwo\nthree\nfour"
        );
    }

    #[tokio::test]
    async fn render_builds_multipart_alternative() {
        let mut draft = MailDraft::new();
        draft
            .from("noreply@example.com", Some("Example"))
            .to("user@example.com")
            .subject("Greetings")
            .message_text("Hello!")
            .message_html("<p>Hello!</p>")
            .set_header("X-Campaign", "launch");

        let message = mail_mime::render(&draft, &environment()).await.unwrap();
        let message = String::from_utf8(message.to_vec()).unwrap();

        assert!(message.contains("multipart/alternative"));
        assert!(message.contains("text/plain"));
        assert!(message.contains("text/html"));
        assert!(message.contains("charset=\"utf-8\""));
        assert!(message.contains("Subject: Greetings"));
        assert!(message.contains("X-Priority: 3"));
        assert!(message.contains("X-Mailer: rust-mail-services"));
        assert!(message.contains("X-Campaign: launch"));
        assert!(message.contains("@mail.test>"));
    }

    #[tokio::test]
    async fn render_picks_single_variant_without_multipart() {
        let mut draft = MailDraft::new();
        draft.config.send_multipart = false;
        draft
            .to("user@example.com")
            .format(MailFormat::Html)
            .message_text("Hello!")
            .message_html("<p>Hello!</p>");

        let message = mail_mime::render(&draft, &environment()).await.unwrap();
        let message = String::from_utf8(message.to_vec()).unwrap();

        assert!(!message.contains("multipart/alternative"));
        assert!(message.contains("text/html"));
        assert!(!message.contains("Hello!\r\n"));
    }

    #[tokio::test]
    async fn render_keeps_blind_recipients_off_the_wire() {
        let mut draft = MailDraft::new();
        draft
            .to("user@example.com")
            .bcc("secret@example.com")
            .message_text("Hello!");

        let message = mail_mime::render(&draft, &environment()).await.unwrap();
        let message = String::from_utf8(message.to_vec()).unwrap();

        assert!(message.contains("user@example.com"));
        assert!(!message.contains("secret@example.com"));
    }

    #[tokio::test]
    async fn render_attaches_bytes_and_inline_parts() {
        let mut draft = MailDraft::new();
        draft
            .to("user@example.com")
            .message_html("<p><img src=\"cid:logo.png\"/></p>")
            .attach(MailAttachment::from_bytes("report.csv", "a,b\n1,2".as_bytes().to_vec()).mime("text/csv"))
            .attach(
                MailAttachment::from_bytes("logo.png", vec![0x89, 0x50, 0x4e, 0x47])
                    .disposition(AttachmentDisposition::Inline),
            );

        let message = mail_mime::render(&draft, &environment()).await.unwrap();
        let message = String::from_utf8(message.to_vec()).unwrap();

        assert!(message.contains("multipart/mixed"));
        assert!(message.contains("Content-Disposition: attachment"));
        assert!(message.contains("report.csv"));
        assert!(message.contains("text/csv"));
        assert!(message.contains("Content-Disposition: inline"));
        assert!(message.contains("Content-ID"));
    }

    #[tokio::test]
    async fn memory_handler_records_one_delivery_per_group() {
        let handler = MemoryHandler::new().environment(environment());
        let mut draft = MailDraft::new();
        draft.config.bcc_batch_mode = true;
        draft.config.bcc_batch_size = 2;
        draft
            .from("noreply@example.com", None)
            .to("to@example.com")
            .cc("cc@example.com")
            .subject("Greetings")
            .message_text("Hello!");
        for n in 0..5 {
            draft.bcc(format!("bcc{n}@example.com"));
        }

        handler.send(&mut draft, true).await.unwrap();

        let sent = handler.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].recipients.len(), 4);
        assert_eq!(sent[1].recipients.len(), 2);
        assert_eq!(sent[2].recipients.len(), 1);
        assert_eq!(sent[0].sender.as_deref(), Some("noreply@example.com"));
        assert_eq!(sent[0].message, sent[2].message);

        // clear_after resets the draft for the next message in the loop.
        assert!(draft.subject.is_empty());
        assert_eq!(draft.recipient_count(), 0);
    }

    #[tokio::test]
    async fn memory_handler_rejects_empty_recipient_list() {
        let handler = MemoryHandler::new();
        let mut draft = MailDraft::new();
        draft.message_text("Hello!");

        assert!(handler.send(&mut draft, false).await.is_err());
    }

    #[tokio::test]
    async fn memory_handler_validates_when_configured() {
        let handler = MemoryHandler::new();
        let mut draft = MailDraft::new();
        draft.to("broken address").message_text("Hello!");
        assert!(handler.send(&mut draft, false).await.is_err());

        draft.config.validate = false;
        // Without validation the syntactically broken recipient is accepted
        // and recorded as-is.
        assert!(handler.send(&mut draft, false).await.is_ok());
    }
}
