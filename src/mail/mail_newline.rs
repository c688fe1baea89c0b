/// Line ending convention for message bodies. Only the two sequences the
/// mail RFCs mention are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailNewline {
    Lf,
    CrLf,
}

impl MailNewline {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailNewline::Lf => "\n",
            MailNewline::CrLf => "\r\n",
        }
    }

    /// Parses the literal `newline` / `crlf` option values.
    pub fn from_sequence(sequence: &str) -> Option<Self> {
        match sequence {
            "\n" => Some(MailNewline::Lf),
            "\r\n" => Some(MailNewline::CrLf),
            _ => None,
        }
    }
}
