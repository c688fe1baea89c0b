use crate::mail::mail_format::MailFormat;
use crate::mail::mail_newline::MailNewline;

/// Delivery options applied to every message built from a draft.
///
/// The typed fields are the primary interface. [`MailConfig::from_map`]
/// additionally accepts the classic string option map, applying only the
/// allow-listed keys below and ignoring everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Used as the User-Agent and X-Mailer headers' value.
    pub useragent: String,
    /// Body variant to prefer when multipart delivery is disabled.
    pub format: MailFormat,
    /// Character set label for text parts, always stored upper-cased.
    pub charset: String,
    /// Whether handlers check address syntax before delivery.
    pub validate: bool,
    /// X-Priority header value, clamped to 1-5.
    pub priority: u8,
    /// Line ending sequence bodies are normalized to before encoding.
    pub newline: MailNewline,
    /// Retained from the classic option map. Quoted-printable line endings
    /// are owned by the MIME encoder.
    pub crlf: MailNewline,
    /// Delivery Status Notification flag, configuration only.
    pub dsn: bool,
    /// Whether to send both body variants as multipart/alternative.
    pub send_multipart: bool,
    /// Whether to send to BCC recipients in batches.
    pub bcc_batch_mode: bool,
    /// BCC batch max size.
    pub bcc_batch_size: usize,
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            useragent: String::from("rust-mail-services"),
            format: MailFormat::Text,
            charset: String::from("UTF-8"),
            validate: true,
            priority: 3,
            newline: MailNewline::Lf,
            crlf: MailNewline::Lf,
            dsn: false,
            send_multipart: true,
            bcc_batch_mode: false,
            bcc_batch_size: 200,
        }
    }
}

impl MailConfig {
    /// Builds a config from string option pairs. Keys mirror the classic
    /// option names. Unknown keys and unparseable values are ignored with
    /// a debug log line, never an error.
    pub fn from_map<K, V, I>(options: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut config = MailConfig::default();
        for (key, value) in options {
            config.apply(key.as_ref(), value.as_ref());
        }
        config
    }

    /// Applies a single allow-listed option. See [`MailConfig::from_map`].
    pub fn apply(&mut self, key: &str, value: &str) {
        match key {
            "useragent" => self.useragent = value.to_string(),
            "mailtype" => match MailFormat::from_name(value) {
                Some(format) => self.format = format,
                None => tracing::debug!("ignoring invalid mailtype '{}'", value),
            },
            "charset" => self.charset = value.to_uppercase(),
            "validate" => match parse_bool(value) {
                Some(validate) => self.validate = validate,
                None => tracing::debug!("ignoring invalid validate '{}'", value),
            },
            "priority" => match value.parse::<u8>() {
                Ok(priority) => self.priority = priority.clamp(1, 5),
                Err(_) => tracing::debug!("ignoring invalid priority '{}'", value),
            },
            "newline" => match MailNewline::from_sequence(value) {
                Some(newline) => self.newline = newline,
                None => tracing::debug!("ignoring invalid newline sequence"),
            },
            "crlf" => match MailNewline::from_sequence(value) {
                Some(crlf) => self.crlf = crlf,
                None => tracing::debug!("ignoring invalid crlf sequence"),
            },
            "DSN" => match parse_bool(value) {
                Some(dsn) => self.dsn = dsn,
                None => tracing::debug!("ignoring invalid DSN '{}'", value),
            },
            "sendMultipart" => match parse_bool(value) {
                Some(send_multipart) => self.send_multipart = send_multipart,
                None => tracing::debug!("ignoring invalid sendMultipart '{}'", value),
            },
            "BCCBatchMode" => match parse_bool(value) {
                Some(bcc_batch_mode) => self.bcc_batch_mode = bcc_batch_mode,
                None => tracing::debug!("ignoring invalid BCCBatchMode '{}'", value),
            },
            "BCCBatchSize" => match value.parse::<usize>() {
                Ok(bcc_batch_size) => self.bcc_batch_size = bcc_batch_size,
                Err(_) => tracing::debug!("ignoring invalid BCCBatchSize '{}'", value),
            },
            _ => tracing::debug!("ignoring unknown mail option '{}'", key),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
