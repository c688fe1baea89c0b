/// Host environment facts captured once at startup and passed to handlers.
///
/// Detect this explicitly at process start instead of reading it lazily
/// from global state inside the handlers.
#[derive(Debug, Clone)]
pub struct MailEnvironment {
    /// Domain part of generated Message-ID headers.
    pub hostname: String,
}

impl MailEnvironment {
    pub fn detect() -> Self {
        let hostname = std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .ok()
            .filter(|hostname| !hostname.is_empty())
            .unwrap_or_else(|| String::from("localhost"));

        MailEnvironment { hostname }
    }

    pub fn hostname<T: AsRef<str>>(mut self, hostname: T) -> Self {
        self.hostname = hostname.as_ref().to_string();
        self
    }
}
