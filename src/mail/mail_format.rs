#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailFormat {
    /// Plain text message body
    Text,
    /// HTML message body
    Html,
}

impl MailFormat {
    /// Parses the `mailtype` option value. Anything other than `text` or
    /// `html` is rejected.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(MailFormat::Text),
            "html" => Some(MailFormat::Html),
            _ => None,
        }
    }
}
